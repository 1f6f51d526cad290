//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_location` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_location::initialization::init_logger_with;
use domain_location::{run_locate, Config, StorageKind};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format)
        .context("Failed to initialize logger")?;

    let destination = match config.storage {
        StorageKind::Sqlite => config.db_path.clone(),
        StorageKind::Jsonl => config.output_dir.clone(),
    };

    match run_locate(config).await {
        Ok(report) => {
            println!(
                "✅ Located {} of {} domain{} ({} failed) in {:.1}s",
                report.successful,
                report.total_domains,
                if report.total_domains == 1 { "" } else { "s" },
                report.failed,
                report.elapsed_seconds
            );
            println!("Results saved in {} ({})", destination.display(), report.run_id);
            Ok(())
        }
        Err(e) => {
            eprintln!("domain_location error: {:#}", e);
            process::exit(1);
        }
    }
}

//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DB_PATH, DEFAULT_PROVIDER_URL, DEFAULT_USER_AGENT, DNS_TIMEOUT_SECS, FETCH_TIMEOUT_SECS,
    OUTPUT_DIR, SEMAPHORE_LIMIT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Where location records are persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    /// One table per collection in a SQLite database (`--db-path`)
    Sqlite,
    /// One `<collection>.jsonl` file per collection (`--output-dir`)
    Jsonl,
}

/// Library and command-line configuration.
///
/// Can be constructed programmatically through `Default` or parsed from the
/// command line with `Config::parse()`.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// domain_location domains.txt
///
/// # Read from stdin, write JSON lines instead of SQLite
/// cat domains.txt | domain_location - --storage jsonl --output-dir ./out
///
/// # Tighter network budgets
/// domain_location domains.txt --dns-timeout-seconds 2 --fetch-timeout-seconds 5
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "domain_location",
    about = "Resolves domains and records the geolocation of their IP addresses."
)]
pub struct Config {
    /// File to read domains from (`-` reads stdin)
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Storage backend: sqlite|jsonl
    #[arg(long, value_enum, default_value_t = StorageKind::Sqlite)]
    pub storage: StorageKind,

    /// Database path (SQLite file)
    #[arg(long, value_parser, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Output directory for the jsonl storage backend
    #[arg(long, value_parser, default_value = OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum concurrent domain lookups
    #[arg(long, default_value_t = SEMAPHORE_LIMIT)]
    pub max_concurrency: usize,

    /// DNS lookup timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub dns_timeout_seconds: u64,

    /// Geolocation provider request timeout in seconds
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub fetch_timeout_seconds: u64,

    /// Geolocation provider base URL
    #[arg(long, default_value = DEFAULT_PROVIDER_URL)]
    pub provider_url: String,

    /// HTTP User-Agent header value sent to the provider
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("domains.txt"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            storage: StorageKind::Sqlite,
            db_path: PathBuf::from(DB_PATH),
            output_dir: PathBuf::from(OUTPUT_DIR),
            max_concurrency: SEMAPHORE_LIMIT,
            dns_timeout_seconds: DNS_TIMEOUT_SECS,
            fetch_timeout_seconds: FETCH_TIMEOUT_SECS,
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

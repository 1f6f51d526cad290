//! domain_location library: domain to IP geolocation pipeline
//!
//! This library resolves domains to IP addresses, looks up the geolocation of
//! each address with a remote provider, and reports every result to a typed
//! event bus, a result logger and a pluggable storage sink.
//!
//! # Example
//!
//! ```no_run
//! use domain_location::{run_locate, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("domains.txt"),
//!     max_concurrency: 20,
//!     ..Default::default()
//! };
//!
//! let report = run_locate(config).await?;
//! println!("Located {} of {} domains", report.successful, report.total_domains);
//! # Ok(())
//! # }
//! ```
//!
//! The pipeline itself can be driven directly through
//! [`pipeline::DomainLocationModule`] with custom collaborators.
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

mod app;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod events;
pub mod geolocation;
pub mod initialization;
pub mod pipeline;
pub mod reporting;
pub mod storage;

// Re-export public API
pub use app::validate_and_normalize_url;
pub use config::{Config, LogFormat, LogLevel, StorageKind};
pub use error_handling::{ErrorType, LocateError};
pub use geolocation::{LocationRecord, Summary};
pub use pipeline::{DomainLocationModule, PipelineDeps, Target};
pub use run::{run_locate, run_locate_with, LocateReport};

// Internal run module (contains the batch driver)
mod run {
    use anyhow::{Context, Result};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{debug, info, warn};
    use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
    use tokio::sync::broadcast;
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        log_progress, print_error_statistics, shutdown_gracefully, validate_and_normalize_url,
    };
    use crate::config::{Config, StorageKind, EVENT_DRAIN_TIMEOUT, LOGGING_INTERVAL};
    use crate::error_handling::ProcessingStats;
    use crate::events::{EventBus, ModuleEvent};
    use crate::initialization::{init_client, init_resolver, init_semaphore};
    use crate::pipeline::{DomainLocationModule, PipelineDeps};
    use crate::reporting::ConsoleResultLogger;
    use crate::storage::{init_db_pool_with_path, JsonlStore, SqliteStore, StorageSink};

    /// Results of a batch run.
    #[derive(Debug, Clone)]
    pub struct LocateReport {
        /// Number of domains handed to the pipeline
        pub total_domains: usize,
        /// Number of domains whose record was stored
        pub successful: usize,
        /// Number of domains that failed
        pub failed: usize,
        /// Run identifier (format: `run_<timestamp_millis>`)
        pub run_id: String,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    async fn open_input(config: &Config) -> Result<Box<dyn AsyncRead + Unpin + Send>> {
        let reader: Box<dyn AsyncRead + Unpin + Send> = if config.file.as_os_str() == "-" {
            info!("Reading domains from stdin");
            Box::new(tokio::io::stdin())
        } else {
            let file = tokio::fs::File::open(&config.file)
                .await
                .with_context(|| format!("Failed to open input file {}", config.file.display()))?;
            Box::new(file)
        };
        Ok(reader)
    }

    /// Logs every bus event at debug level until the bus is dropped.
    async fn trace_events(mut events: broadcast::Receiver<ModuleEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => match event.result() {
                    Some(payload) => debug!(
                        "[{}] {} -> {} ({})",
                        event.name(),
                        payload.url,
                        payload.result.ip_address,
                        payload.result.country_code
                    ),
                    None => debug!("[{}] {}", event.name(), event.module().id),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!("Event tracer skipped {skipped} events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    /// Locates every domain listed in `config.file` (or stdin for `-`).
    ///
    /// Blank lines and lines starting with `#` are skipped; invalid lines are
    /// logged and skipped. Domains are processed concurrently, bounded by
    /// `config.max_concurrency`. Ctrl-C cancels in-flight lookups and stops
    /// reading input.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file cannot be opened or read
    /// - The storage sink or network resources cannot be initialized
    /// - The `domain_location` store cannot be installed
    ///
    /// Failures of individual domains are counted, never returned.
    pub async fn run_locate(config: Config) -> Result<LocateReport> {
        let input = open_input(&config).await?;

        let cancel = CancellationToken::new();
        let interrupt_cancel = cancel.clone();
        let interrupt_task = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling in-flight lookups");
                interrupt_cancel.cancel();
            }
        });

        let report = run_locate_with(config, input, cancel).await;
        interrupt_task.abort();
        report
    }

    /// Like [`run_locate`], reading domains from `input` instead of
    /// `config.file` and stopping when `cancel` fires.
    ///
    /// Cancellation stops reading input even while a read is pending, and
    /// cancels lookups in flight. The report covers the domains handed to
    /// the pipeline before that point.
    ///
    /// # Errors
    ///
    /// Same as [`run_locate`]. A read error ends the run: lookups already
    /// started are awaited, then the error is returned.
    pub async fn run_locate_with<R>(
        config: Config,
        input: R,
        cancel: CancellationToken,
    ) -> Result<LocateReport>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut lines = BufReader::new(input).lines();

        let start_time_epoch = Utc::now().timestamp_millis();
        let run_id = format!("run_{}", start_time_epoch);
        info!("Starting run: {}", run_id);

        let mut sqlite_pool = None;
        let storage: Arc<dyn StorageSink> = match config.storage {
            StorageKind::Sqlite => {
                let pool = init_db_pool_with_path(&config.db_path)
                    .await
                    .context("Failed to initialize database pool")?;
                sqlite_pool = Some(Arc::clone(&pool));
                Arc::new(SqliteStore::new(pool, Some(run_id.clone())))
            }
            StorageKind::Jsonl => Arc::new(JsonlStore::new(&config.output_dir)),
        };
        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let resolver = init_resolver(Duration::from_secs(config.dns_timeout_seconds))
            .context("Failed to initialize DNS resolver")?;

        let events = EventBus::new();
        let event_task = tokio::spawn(trace_events(events.subscribe()));

        let deps = PipelineDeps::new(
            events,
            storage,
            Arc::new(ConsoleResultLogger::new(config.log_format)),
            resolver,
            client,
        )
        .configured(&config);
        let module = Arc::new(DomainLocationModule::new(deps));
        module
            .init()
            .await
            .context("Failed to initialize the domain location module")?;

        let start_time = std::time::Instant::now();
        let error_stats = Arc::new(ProcessingStats::new());
        let completed = Arc::new(AtomicUsize::new(0));
        let failed = Arc::new(AtomicUsize::new(0));
        let mut total_domains = 0usize;

        let shutdown = CancellationToken::new();
        let logging_task = {
            let shutdown = shutdown.child_token();
            let completed = Arc::clone(&completed);
            let failed = Arc::clone(&failed);
            tokio::spawn(async move {
                let mut interval =
                    tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL as u64));
                interval.tick().await;
                loop {
                    tokio::select! {
                        _ = interval.tick() => log_progress(start_time, &completed, &failed),
                        _ = shutdown.cancelled() => break,
                    }
                }
            })
        };

        let semaphore = init_semaphore(config.max_concurrency);
        let mut tasks = FuturesUnordered::new();

        let mut input_error = None;

        loop {
            let line = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Run cancelled, no further input is read");
                    break;
                }
                line = lines.next_line() => line,
            };
            let line = match line {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read line from input: {e}");
                    input_error = Some(e);
                    break;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some(target) = validate_and_normalize_url(trimmed) else {
                continue;
            };

            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => {
                        warn!("Semaphore closed, skipping {target}");
                        continue;
                    }
                },
            };

            total_domains += 1;
            let module = Arc::clone(&module);
            let cancel = cancel.clone();
            let error_stats = Arc::clone(&error_stats);
            let completed = Arc::clone(&completed);
            let failed = Arc::clone(&failed);
            tasks.push(tokio::spawn(async move {
                let _permit = permit;
                match module.locate(&target, &cancel).await {
                    Ok(_) => {
                        completed.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => {
                        failed.fetch_add(1, Ordering::SeqCst);
                        error_stats.record_failure(&e);
                    }
                }
            }));
        }

        while let Some(task_result) = tasks.next().await {
            if let Err(join_error) = task_result {
                failed.fetch_add(1, Ordering::SeqCst);
                warn!("Task panicked: {:?}", join_error);
            }
        }

        module.finish();
        // Last bus handle: dropping it lets the event tracer drain and exit
        drop(module);
        shutdown_gracefully(
            shutdown,
            Some(logging_task),
            Some(event_task),
            EVENT_DRAIN_TIMEOUT,
        )
        .await;

        log_progress(start_time, &completed, &failed);
        print_error_statistics(&error_stats);

        if let Some(pool) = sqlite_pool {
            if let Err(e) = sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
                .execute(pool.as_ref())
                .await
            {
                warn!("Failed to checkpoint WAL file (this is non-critical): {}", e);
            }
        }

        if let Some(e) = input_error {
            return Err(anyhow::Error::new(e).context("Failed to read input"));
        }

        Ok(LocateReport {
            total_domains,
            successful: completed.load(Ordering::SeqCst),
            failed: failed.load(Ordering::SeqCst),
            run_id,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}

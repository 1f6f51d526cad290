//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the application,
//! including timeouts, the geolocation provider endpoint and input limits.

use std::time::Duration;

/// Maximum concurrent pipeline runs (semaphore limit)
pub const SEMAPHORE_LIMIT: usize = 10;
/// Progress logging interval in seconds
pub const LOGGING_INTERVAL: usize = 5;
pub const DB_PATH: &str = "./domain_location.db";
/// Directory used by the JSONL storage backend
pub const OUTPUT_DIR: &str = "./domain_location_output";

/// Collection (table) name the pipeline writes its records to.
pub const DOMAIN_LOCATION_COLLECTION: &str = "domain_location";

/// Base URL of the IP geolocation provider.
///
/// Lookups are issued as `GET <base>/api/json/<ip-address>` with no auth header
/// and no query parameters.
pub const DEFAULT_PROVIDER_URL: &str = "https://freeipapi.com";

// Network operation timeouts
/// DNS lookup timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 5;
/// Geolocation fetch timeout in seconds (connect + request + body)
pub const FETCH_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// DNS resolver attempts per query
pub const DNS_ATTEMPTS: usize = 2;

/// Grace period the batch driver waits for the event tracer to drain on shutdown.
pub const EVENT_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Capacity of the broadcast channel behind the event bus.
///
/// Slow subscribers that fall further behind than this lose the oldest events.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Default User-Agent string for provider requests.
pub const DEFAULT_USER_AGENT: &str = concat!("domain_location/", env!("CARGO_PKG_VERSION"));

/// Maximum input line length (2048 characters), matching common URL limits.
pub const MAX_INPUT_LENGTH: usize = 2048;

//! Error type definitions.
//!
//! This module defines the errors raised while setting up shared resources,
//! while talking to a storage sink, and while locating a single domain.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Invalid HTTP client settings.
    #[error("HTTP client configuration error: {0}")]
    HttpClientConfigError(String),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Error types for storage sink operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// A record could not be converted into a storable row.
    #[error("Record serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A collection or field name is not a plain identifier.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A record was written to a collection that was never installed.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Filesystem error from a file-backed sink.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The external call a timeout was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Hostname to IP address resolution.
    DnsLookup,
    /// HTTP request to the geolocation provider.
    GeolocationFetch,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::DnsLookup => f.write_str("DNS lookup"),
            Stage::GeolocationFetch => f.write_str("geolocation fetch"),
        }
    }
}

/// Why locating a single domain failed.
///
/// Every variant maps onto exactly one [`ErrorType`]; callers that only need a
/// success flag use `Result::is_ok`.
#[derive(Error, Debug)]
pub enum LocateError {
    /// The hostname did not resolve to any address.
    #[error("DNS resolution failed for {host}: {source}")]
    ResolutionFailed {
        host: String,
        #[source]
        source: anyhow::Error,
    },

    /// Transport failure or non-success status from the provider.
    #[error("Geolocation fetch failed: {0}")]
    FetchFailed(#[source] ReqwestError),

    /// The provider body was not a JSON location record.
    #[error("Geolocation response decode failed: {0}")]
    DecodeFailed(#[from] serde_json::Error),

    /// An external call did not finish within its budget.
    #[error("{stage} timed out after {}s", .after.as_secs_f64())]
    Timeout { stage: Stage, after: Duration },

    /// The run was cancelled before it finished.
    #[error("Lookup cancelled")]
    Cancelled,

    /// The storage sink rejected the record.
    #[error("Storing location record failed: {0}")]
    StoreFailed(#[from] DatabaseError),
}

impl LocateError {
    /// Returns the failure kind used for statistics.
    pub fn kind(&self) -> ErrorType {
        match self {
            LocateError::ResolutionFailed { .. } => ErrorType::ResolutionFailed,
            LocateError::FetchFailed(_) => ErrorType::FetchFailed,
            LocateError::DecodeFailed(_) => ErrorType::DecodeFailed,
            LocateError::Timeout { .. } => ErrorType::Timeout,
            LocateError::Cancelled => ErrorType::Cancelled,
            LocateError::StoreFailed(_) => ErrorType::StoreFailed,
        }
    }
}

/// Kinds of failure a single domain lookup can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    ResolutionFailed,
    FetchFailed,
    DecodeFailed,
    Timeout,
    Cancelled,
    StoreFailed,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ResolutionFailed => "DNS resolution failed",
            ErrorType::FetchFailed => "Geolocation fetch failed",
            ErrorType::DecodeFailed => "Geolocation decode failed",
            ErrorType::Timeout => "Timeout",
            ErrorType::Cancelled => "Cancelled",
            ErrorType::StoreFailed => "Store failed",
        }
    }
}

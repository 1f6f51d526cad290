//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, storage and per-domain runs
//! - The closed failure kind enumeration (`ErrorType`)
//! - Processing statistics tracking (failures per kind)

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{DatabaseError, ErrorType, InitializationError, LocateError, Stage};

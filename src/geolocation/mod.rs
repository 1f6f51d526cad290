//! IP geolocation through a remote HTTP provider.
//!
//! This module defines the location record the pipeline produces, the
//! human-facing summary projection, the storage schema describing every record
//! field, and the client call that fetches a record for an IP address.

mod provider;
mod types;

// Re-export public API
pub use provider::{fetch_location, provider_endpoint};
pub use types::{LocationRecord, Summary, LOCATION_SCHEMA};

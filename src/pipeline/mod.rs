//! The resolver-enricher pipeline.
//!
//! For each [`Target`] the [`DomainLocationModule`] resolves the hostname,
//! fetches the geolocation of the resulting address, and reports the record to
//! the event bus, the result logger and the storage sink, in that order.
//! All collaborators are injected through [`PipelineDeps`].

mod deps;
mod module;
mod target;

// Re-export public API
pub use deps::PipelineDeps;
pub use module::{DomainLocationModule, DOMAIN_LOCATION_MODULE};
pub use target::Target;

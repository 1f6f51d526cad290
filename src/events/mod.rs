//! Typed event bus.
//!
//! Every notification the pipeline publishes is a [`ModuleEvent`] variant
//! with a fixed payload shape. Subscribers that only care about the generic
//! contract match on `StartsComputing`/`EndsComputing`/`AnalyseResult`; the
//! domain-specific variants carry the same data under this module's own names.

mod bus;
mod types;

// Re-export public API
pub use bus::EventBus;
pub use types::{ModuleEvent, ModuleRef, ResultPayload};

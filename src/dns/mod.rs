//! Hostname resolution.
//!
//! This module provides the [`HostResolver`] seam the pipeline resolves
//! through, and its production implementation on top of `hickory-resolver`
//! (A/AAAA lookups, system DNS configuration).

mod resolution;

// Re-export public API
pub use resolution::{resolve_host_to_ip, HostResolver, SystemResolver};

//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use log::{debug, warn};

use crate::config::DNS_ATTEMPTS;
use crate::dns::SystemResolver;
use crate::error_handling::InitializationError;

/// Initializes the DNS resolver for hostname lookups.
///
/// Reads the system resolver configuration (`/etc/resolv.conf` on Unix) and
/// falls back to the hickory default configuration when it cannot be read.
/// The per-query timeout is `timeout`; the pipeline additionally bounds the
/// whole lookup with the same budget.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the resolver cannot be
/// built. With the fallback in place this does not happen in practice.
pub fn init_resolver(timeout: Duration) -> Result<Arc<SystemResolver>, InitializationError> {
    if timeout.is_zero() {
        return Err(InitializationError::DnsResolverError(
            "DNS timeout must be greater than zero".to_string(),
        ));
    }

    let resolver = match hickory_resolver::system_conf::read_system_conf() {
        Ok((config, mut opts)) => {
            debug!("Using system DNS configuration");
            apply_opts(&mut opts, timeout);
            TokioAsyncResolver::tokio(config, opts)
        }
        Err(e) => {
            warn!("Failed to read system DNS configuration ({e}), using default resolvers");
            let mut opts = ResolverOpts::default();
            apply_opts(&mut opts, timeout);
            TokioAsyncResolver::tokio(ResolverConfig::default(), opts)
        }
    };

    Ok(Arc::new(SystemResolver::new(resolver)))
}

fn apply_opts(opts: &mut ResolverOpts, timeout: Duration) {
    opts.timeout = timeout;
    opts.attempts = DNS_ATTEMPTS;
}

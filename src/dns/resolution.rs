//! IP address resolution.
//!
//! This module provides functions to resolve hostnames to IP addresses.

use std::net::IpAddr;

use anyhow::{Error, Result};
use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

/// Resolves a hostname to a single IP address.
///
/// Implementations return the first address the underlying resolver yields and
/// perform no retry, timeout or address family preference of their own.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn lookup(&self, host: &str) -> Result<IpAddr, Error>;
}

/// [`HostResolver`] backed by the system DNS configuration.
pub struct SystemResolver {
    inner: TokioAsyncResolver,
}

impl SystemResolver {
    pub fn new(inner: TokioAsyncResolver) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn lookup(&self, host: &str) -> Result<IpAddr, Error> {
        resolve_host_to_ip(host, &self.inner).await
    }
}

/// Resolves a hostname to an IP address using DNS.
///
/// IP literals (including bracketed IPv6 hosts as they appear in URLs) are
/// returned as-is without a query.
///
/// # Returns
///
/// The first IP address found, or an error if resolution fails.
///
/// # Errors
///
/// Returns an error if DNS resolution fails or no IP addresses are found.
pub async fn resolve_host_to_ip(host: &str, resolver: &TokioAsyncResolver) -> Result<IpAddr, Error> {
    let literal = host.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = literal.parse::<IpAddr>() {
        return Ok(ip);
    }

    let response = resolver.lookup_ip(host).await.map_err(Error::new)?;
    response
        .iter()
        .next()
        .ok_or_else(|| Error::msg("No IP addresses found"))
}

//! Injected collaborators of the pipeline.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, DEFAULT_PROVIDER_URL, DNS_TIMEOUT_SECS, FETCH_TIMEOUT_SECS};
use crate::dns::HostResolver;
use crate::events::EventBus;
use crate::reporting::ResultLogger;
use crate::storage::StorageSink;

/// Everything a [`DomainLocationModule`](super::DomainLocationModule) talks to.
///
/// There is no ambient state: the module only reaches collaborators through
/// this set, which is handed over at construction.
#[derive(Clone)]
pub struct PipelineDeps {
    pub events: EventBus,
    pub storage: Arc<dyn StorageSink>,
    pub logger: Arc<dyn ResultLogger>,
    pub resolver: Arc<dyn HostResolver>,
    pub client: Arc<reqwest::Client>,
    /// Geolocation provider base URL
    pub provider_url: String,
    /// Budget for the DNS lookup
    pub dns_timeout: Duration,
    /// Budget for the provider request, body included
    pub fetch_timeout: Duration,
}

impl PipelineDeps {
    /// Creates a dependency set with the default provider and timeouts.
    pub fn new(
        events: EventBus,
        storage: Arc<dyn StorageSink>,
        logger: Arc<dyn ResultLogger>,
        resolver: Arc<dyn HostResolver>,
        client: Arc<reqwest::Client>,
    ) -> Self {
        Self {
            events,
            storage,
            logger,
            resolver,
            client,
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            dns_timeout: Duration::from_secs(DNS_TIMEOUT_SECS),
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }

    /// Takes provider URL and timeouts from `config`.
    pub fn configured(mut self, config: &Config) -> Self {
        self.provider_url = config.provider_url.clone();
        self.dns_timeout = Duration::from_secs(config.dns_timeout_seconds);
        self.fetch_timeout = Duration::from_secs(config.fetch_timeout_seconds);
        self
    }
}

impl std::fmt::Debug for PipelineDeps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineDeps")
            .field("provider_url", &self.provider_url)
            .field("dns_timeout", &self.dns_timeout)
            .field("fetch_timeout", &self.fetch_timeout)
            .finish_non_exhaustive()
    }
}

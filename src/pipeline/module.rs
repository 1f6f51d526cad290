//! Domain location module.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use super::deps::PipelineDeps;
use super::target::Target;
use crate::config::DOMAIN_LOCATION_COLLECTION;
use crate::error_handling::{DatabaseError, LocateError, Stage};
use crate::events::{EventBus, ModuleEvent, ModuleRef, ResultPayload};
use crate::geolocation::{fetch_location, LocationRecord, Summary, LOCATION_SCHEMA};
use crate::storage::to_row;

/// Identity carried on every event this module emits.
pub const DOMAIN_LOCATION_MODULE: ModuleRef = ModuleRef {
    id: "domain_location",
    name: "Domain Location",
};

/// Resolves domains and records the geolocation of their IP addresses.
///
/// Call [`init`](Self::init) once, then [`locate`](Self::locate) or
/// [`analyse_domain`](Self::analyse_domain) for any number of targets,
/// concurrently if desired: runs share no mutable state.
///
/// A successful run reports its record in this order: module result event,
/// generic result event, result logger, storage sink. A failed run reports
/// nothing. `startsComputing` and `endsComputing` bracket every run, failed
/// runs included.
#[derive(Debug)]
pub struct DomainLocationModule {
    deps: PipelineDeps,
}

impl DomainLocationModule {
    pub fn new(deps: PipelineDeps) -> Self {
        Self { deps }
    }

    pub fn id(&self) -> &'static str {
        DOMAIN_LOCATION_MODULE.id
    }

    pub fn name(&self) -> &'static str {
        DOMAIN_LOCATION_MODULE.name
    }

    pub fn events(&self) -> &EventBus {
        &self.deps.events
    }

    /// Installs the `domain_location` store and announces the module.
    ///
    /// # Errors
    ///
    /// Returns the storage sink's error if the store cannot be installed; no
    /// event is emitted in that case.
    pub async fn init(&self) -> Result<(), DatabaseError> {
        self.deps
            .storage
            .install_store(DOMAIN_LOCATION_COLLECTION, LOCATION_SCHEMA)
            .await?;
        self.deps.events.emit(ModuleEvent::CreateDomainLocationModule {
            module: DOMAIN_LOCATION_MODULE,
        });
        info!("{} module ready", self.name());
        Ok(())
    }

    /// Boolean view of [`locate`](Self::locate): `true` iff a record was stored.
    pub async fn analyse_domain(&self, target: &Target, cancel: &CancellationToken) -> bool {
        self.locate(target, cancel).await.is_ok()
    }

    /// Runs the pipeline for `target` and returns the stored record.
    ///
    /// # Errors
    ///
    /// - `ResolutionFailed` if the hostname does not resolve
    /// - `FetchFailed` / `DecodeFailed` if the provider call fails
    /// - `Timeout` if the DNS lookup or provider call exceeds its budget
    /// - `Cancelled` if `cancel` fires before the external calls complete
    /// - `StoreFailed` if the storage sink rejects the record
    pub async fn locate(
        &self,
        target: &Target,
        cancel: &CancellationToken,
    ) -> Result<Arc<LocationRecord>, LocateError> {
        self.deps.events.emit(ModuleEvent::StartsComputing {
            module: DOMAIN_LOCATION_MODULE,
        });

        let outcome = self.run(target, cancel).await;
        if let Err(e) = &outcome {
            warn!(
                "Failed to locate {} ({}): {e}",
                target.hostname(),
                e.kind().as_str()
            );
        }

        self.deps.events.emit(ModuleEvent::EndsComputing {
            module: DOMAIN_LOCATION_MODULE,
        });
        outcome
    }

    /// Nothing is held between runs.
    pub fn finish(&self) {
        debug!("{} module finished", self.name());
    }

    async fn run(
        &self,
        target: &Target,
        cancel: &CancellationToken,
    ) -> Result<Arc<LocationRecord>, LocateError> {
        let hostname = target.hostname();

        let ip = bounded(Stage::DnsLookup, self.deps.dns_timeout, cancel, async {
            self.deps
                .resolver
                .lookup(hostname)
                .await
                .map_err(|source| LocateError::ResolutionFailed {
                    host: hostname.to_string(),
                    source,
                })
        })
        .await?;
        debug!("{hostname} resolved to {ip}");

        let fetch_timeout = self.deps.fetch_timeout;
        let record = bounded(
            Stage::GeolocationFetch,
            fetch_timeout,
            cancel,
            fetch_location(&self.deps.client, &self.deps.provider_url, ip),
        )
        .await
        .map_err(|e| match e {
            LocateError::FetchFailed(err) if err.is_timeout() => LocateError::Timeout {
                stage: Stage::GeolocationFetch,
                after: fetch_timeout,
            },
            other => other,
        })?;

        let record = Arc::new(record.for_host(hostname));
        let summary = Summary::from(record.as_ref());
        let row = to_row(record.as_ref())?;

        let payload = ResultPayload {
            module: DOMAIN_LOCATION_MODULE,
            url: target.clone(),
            result: Arc::clone(&record),
        };
        self.deps
            .events
            .emit(ModuleEvent::DomainLocationResult(payload.clone()));
        self.deps.events.emit(ModuleEvent::AnalyseResult(payload));

        self.deps
            .logger
            .result(DOMAIN_LOCATION_MODULE.name, &summary, &target.to_string());

        self.deps
            .storage
            .one(DOMAIN_LOCATION_COLLECTION, &row)
            .await?;

        Ok(record)
    }
}

/// Runs `fut` under a deadline, giving up early if `cancel` fires.
async fn bounded<T, F>(
    stage: Stage,
    budget: Duration,
    cancel: &CancellationToken,
    fut: F,
) -> Result<T, LocateError>
where
    F: Future<Output = Result<T, LocateError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LocateError::Cancelled),
        outcome = tokio::time::timeout(budget, fut) => outcome.unwrap_or(Err(LocateError::Timeout {
            stage,
            after: budget,
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ErrorType;

    #[tokio::test]
    async fn test_bounded_passes_through_result() {
        let cancel = CancellationToken::new();
        let value = bounded(Stage::DnsLookup, Duration::from_secs(1), &cancel, async {
            Ok::<_, LocateError>(7)
        })
        .await
        .expect("ready future should complete");
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let cancel = CancellationToken::new();
        let err = bounded(
            Stage::GeolocationFetch,
            Duration::from_millis(20),
            &cancel,
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, LocateError>(())
            },
        )
        .await
        .expect_err("slow future must time out");

        assert_eq!(err.kind(), ErrorType::Timeout);
        assert!(matches!(
            err,
            LocateError::Timeout {
                stage: Stage::GeolocationFetch,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_bounded_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = bounded(Stage::DnsLookup, Duration::from_secs(5), &cancel, async {
            Ok::<_, LocateError>(())
        })
        .await
        .expect_err("cancelled token wins over a ready future");
        assert_eq!(err.kind(), ErrorType::Cancelled);
    }
}

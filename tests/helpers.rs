// Shared test doubles for the pipeline collaborators.
//
// Included with `mod helpers;` by the integration test files that need them.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::broadcast;

use domain_location::dns::HostResolver;
use domain_location::error_handling::DatabaseError;
use domain_location::events::{EventBus, ModuleEvent};
use domain_location::geolocation::Summary;
use domain_location::reporting::ResultLogger;
use domain_location::storage::{StorageSink, StoreRow};
use domain_location::PipelineDeps;

/// Provider response for 93.184.216.34, with a `url` the pipeline must override.
pub const EXAMPLE_RESPONSE: &str = r#"{
    "url": "provider.example",
    "ipVersion": 4,
    "ipAddress": "93.184.216.34",
    "latitude": 37.75,
    "longitude": -97.82,
    "countryName": "United States",
    "countryCode": "US",
    "timeZone": "-05:00",
    "zipCode": "",
    "cityName": "",
    "regionName": "",
    "continent": "North America",
    "continentCode": "NA"
}"#;

/// Resolver answering from a fixed table; unknown hosts fail like NXDOMAIN.
#[derive(Default)]
pub struct StaticResolver {
    hosts: HashMap<String, IpAddr>,
}

impl StaticResolver {
    pub fn with(mut self, host: &str, ip: &str) -> Self {
        self.hosts
            .insert(host.to_string(), ip.parse().expect("valid IP literal"));
        self
    }
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn lookup(&self, host: &str) -> anyhow::Result<IpAddr> {
        self.hosts
            .get(host)
            .copied()
            .ok_or_else(|| anyhow!("no record found for {host}"))
    }
}

/// Resolver that never answers within any reasonable budget.
pub struct HangingResolver;

#[async_trait]
impl HostResolver for HangingResolver {
    async fn lookup(&self, _host: &str) -> anyhow::Result<IpAddr> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(anyhow!("unreachable"))
    }
}

/// Sink remembering every install and row; optionally rejects writes.
#[derive(Default)]
pub struct RecordingSink {
    pub installed: Mutex<Vec<(String, Vec<(String, String)>)>>,
    pub rows: Mutex<Vec<(String, StoreRow)>>,
    pub reject_writes: bool,
}

impl RecordingSink {
    pub fn rejecting() -> Self {
        Self {
            reject_writes: true,
            ..Default::default()
        }
    }

    pub fn rows(&self) -> Vec<(String, StoreRow)> {
        self.rows.lock().expect("rows lock").clone()
    }
}

#[async_trait]
impl StorageSink for RecordingSink {
    async fn install_store(
        &self,
        collection: &str,
        schema: &[(&str, &str)],
    ) -> Result<(), DatabaseError> {
        let schema = schema
            .iter()
            .map(|(field, description)| (field.to_string(), description.to_string()))
            .collect();
        self.installed
            .lock()
            .expect("installed lock")
            .push((collection.to_string(), schema));
        Ok(())
    }

    async fn one(&self, collection: &str, row: &StoreRow) -> Result<(), DatabaseError> {
        if self.reject_writes {
            return Err(DatabaseError::UnknownCollection(collection.to_string()));
        }
        self.rows
            .lock()
            .expect("rows lock")
            .push((collection.to_string(), row.clone()));
        Ok(())
    }
}

/// Logger remembering every `(label, summary, subject)` it receives.
#[derive(Default)]
pub struct RecordingLogger {
    pub lines: Mutex<Vec<(String, Summary, String)>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<(String, Summary, String)> {
        self.lines.lock().expect("lines lock").clone()
    }
}

impl ResultLogger for RecordingLogger {
    fn result(&self, label: &str, summary: &Summary, subject: &str) {
        self.lines.lock().expect("lines lock").push((
            label.to_string(),
            summary.clone(),
            subject.to_string(),
        ));
    }
}

/// Wires the doubles into a dependency set pointed at `provider_url`.
pub fn test_deps(
    provider_url: &str,
    resolver: Arc<dyn HostResolver>,
    storage: Arc<RecordingSink>,
    logger: Arc<RecordingLogger>,
) -> PipelineDeps {
    let mut deps = PipelineDeps::new(
        EventBus::new(),
        storage,
        logger,
        resolver,
        Arc::new(reqwest::Client::new()),
    );
    deps.provider_url = provider_url.to_string();
    deps.dns_timeout = Duration::from_secs(2);
    deps.fetch_timeout = Duration::from_secs(2);
    deps
}

/// Names of every event already queued on `events`.
pub fn drain_names(events: &mut broadcast::Receiver<ModuleEvent>) -> Vec<&'static str> {
    let mut names = Vec::new();
    while let Ok(event) = events.try_recv() {
        names.push(event.name());
    }
    names
}

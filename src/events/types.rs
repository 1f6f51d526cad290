//! Event and payload types.

use std::sync::Arc;

use crate::geolocation::LocationRecord;
use crate::pipeline::Target;

/// Identity of the module an event originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleRef {
    pub id: &'static str,
    pub name: &'static str,
}

/// Payload of the result events.
#[derive(Debug, Clone)]
pub struct ResultPayload {
    pub module: ModuleRef,
    pub url: Target,
    pub result: Arc<LocationRecord>,
}

/// Notifications published on the [`EventBus`](super::EventBus).
#[derive(Debug, Clone)]
pub enum ModuleEvent {
    /// The module finished `init` and is ready for domains.
    CreateDomainLocationModule { module: ModuleRef },
    /// A lookup started.
    StartsComputing { module: ModuleRef },
    /// A lookup finished, successfully or not.
    EndsComputing { module: ModuleRef },
    /// A location record was assembled (module-specific contract).
    DomainLocationResult(ResultPayload),
    /// A location record was assembled (generic contract).
    AnalyseResult(ResultPayload),
}

impl ModuleEvent {
    /// Wire name of the event, as published to external subscribers.
    pub fn name(&self) -> &'static str {
        match self {
            ModuleEvent::CreateDomainLocationModule { .. } => {
                "domain_location_module__createDomainLocationModule"
            }
            ModuleEvent::StartsComputing { .. } => "startsComputing",
            ModuleEvent::EndsComputing { .. } => "endsComputing",
            ModuleEvent::DomainLocationResult(_) => "domain_location_module__onResult",
            ModuleEvent::AnalyseResult(_) => "onAnalyseResult",
        }
    }

    pub fn module(&self) -> ModuleRef {
        match self {
            ModuleEvent::CreateDomainLocationModule { module }
            | ModuleEvent::StartsComputing { module }
            | ModuleEvent::EndsComputing { module } => *module,
            ModuleEvent::DomainLocationResult(payload) | ModuleEvent::AnalyseResult(payload) => {
                payload.module
            }
        }
    }

    /// The result payload, for the two result events.
    pub fn result(&self) -> Option<&ResultPayload> {
        match self {
            ModuleEvent::DomainLocationResult(payload) | ModuleEvent::AnalyseResult(payload) => {
                Some(payload)
            }
            _ => None,
        }
    }
}

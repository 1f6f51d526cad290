//! Broadcast-backed event bus.

use tokio::sync::broadcast;

use super::types::ModuleEvent;
use crate::config::EVENT_CHANNEL_CAPACITY;

/// Fire-and-forget publisher of [`ModuleEvent`]s.
///
/// Clones share one channel. Emitting with no live subscriber is not an
/// error; a subscriber that lags more than the channel capacity behind loses
/// the oldest events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ModuleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn emit(&self, event: ModuleEvent) {
        log::trace!("emit {}", event.name());
        // Err only means nobody is listening
        let _ = self.sender.send(event);
    }

    /// Subscribes to every event emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ModuleEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

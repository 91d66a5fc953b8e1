//! Broadcast bus for host-originated events.

use tokio::sync::broadcast;

use devlens_core::events::{HostEvent, HostEventPayload};

/// Fire-and-forget event emitter for host-originated signals.
///
/// Events are unordered relative to RPC calls and may have zero or more
/// listeners; emitting with no listeners is not an error.
#[derive(Debug, Clone)]
pub struct HostEventBus {
    tx: broadcast::Sender<HostEvent>,
}

impl HostEventBus {
    /// Creates a bus with the given buffer size.
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer);
        Self { tx }
    }

    /// Emits an event to all current listeners.
    pub fn emit(&self, payload: HostEventPayload) {
        let _ = self.tx.send(HostEvent::new(payload));
    }

    /// Subscribes to all subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.tx.subscribe()
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

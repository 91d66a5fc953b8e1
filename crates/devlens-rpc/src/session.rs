//! Per-panel RPC session state.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashSet;
use uuid::Uuid;

use devlens_core::types::RefreshEvent;

/// State for one connected tooling panel.
///
/// Created on channel handshake, destroyed on disconnect. Sessions share no
/// state with each other; every panel gets an independent view onto the
/// same underlying host singletons.
#[derive(Debug)]
pub struct RpcSession {
    /// Session id, for logging.
    id: Uuid,
    /// Monotonic request-id counter correlating requests and responses.
    next_request_id: AtomicU64,
    /// Refresh categories the panel has not explicitly severed.
    subscriptions: DashSet<RefreshEvent>,
}

impl RpcSession {
    /// Creates a session subscribed to every refresh category.
    pub fn new() -> Self {
        let subscriptions = DashSet::new();
        subscriptions.insert(RefreshEvent::CustomTabs);
        subscriptions.insert(RefreshEvent::Components);
        subscriptions.insert(RefreshEvent::Imports);

        Self {
            id: Uuid::new_v4(),
            next_request_id: AtomicU64::new(1),
            subscriptions,
        }
    }

    /// Returns the session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Allocates the next request correlation id.
    pub fn next_request_id(&self) -> u64 {
        self.next_request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Subscribes the panel to a refresh category.
    pub fn subscribe(&self, event: RefreshEvent) {
        self.subscriptions.insert(event);
    }

    /// Severs the panel's subscription to a refresh category.
    pub fn unsubscribe(&self, event: RefreshEvent) {
        self.subscriptions.remove(&event);
    }

    /// Whether the panel should receive pushes for a category.
    pub fn is_subscribed(&self, event: RefreshEvent) -> bool {
        self.subscriptions.contains(&event)
    }
}

impl Default for RpcSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_monotonic() {
        let session = RpcSession::new();
        let a = session.next_request_id();
        let b = session.next_request_id();
        assert!(b > a);
    }

    #[test]
    fn sessions_start_subscribed_and_can_sever() {
        let session = RpcSession::new();
        assert!(session.is_subscribed(RefreshEvent::Imports));
        session.unsubscribe(RefreshEvent::Imports);
        assert!(!session.is_subscribed(RefreshEvent::Imports));
        session.subscribe(RefreshEvent::Imports);
        assert!(session.is_subscribed(RefreshEvent::Imports));
    }
}

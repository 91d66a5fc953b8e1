//! The host client adapter object.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use devlens_core::types::{ConfigSnapshot, HookInfo};
use devlens_hooks::HookRecorder;

use crate::bus::HostEventBus;
use crate::inspector::Inspector;

/// The object the host web application exposes so a tooling panel can
/// attach.
///
/// Holds the hook recorder and the live config snapshot, exposes the host
/// event bus, and optionally an element-inspector handle. Hook firings are
/// reported through [`HostClient::hook_fired`], which runs inline on the
/// firing thread and never blocks it beyond the recorder's short critical
/// section.
pub struct HostClient {
    /// Hook metrics recorder, shared with the RPC bridge.
    recorder: Arc<HookRecorder>,
    /// Live snapshot of the host's app config.
    config: RwLock<ConfigSnapshot>,
    /// Host event bus.
    bus: HostEventBus,
    /// Optional element-inspector handle.
    inspector: Option<Arc<Inspector>>,
}

impl std::fmt::Debug for HostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostClient")
            .field("inspector", &self.inspector.is_some())
            .finish()
    }
}

impl HostClient {
    /// Creates an adapter without an inspector.
    pub fn new(recorder: Arc<HookRecorder>, config: ConfigSnapshot, bus: HostEventBus) -> Self {
        Self {
            recorder,
            config: RwLock::new(config),
            bus,
            inspector: None,
        }
    }

    /// Attaches an inspector bound to this adapter's event bus.
    pub fn with_inspector(mut self) -> Self {
        self.inspector = Some(Arc::new(Inspector::new(self.bus.clone())));
        self
    }

    /// Returns the host event bus.
    pub fn events(&self) -> &HostEventBus {
        &self.bus
    }

    /// Returns the inspector handle, if one is attached.
    pub fn inspector(&self) -> Option<&Arc<Inspector>> {
        self.inspector.as_ref()
    }

    /// Returns the shared hook recorder.
    pub fn recorder(&self) -> &Arc<HookRecorder> {
        &self.recorder
    }

    /// Seeds hook tracking from the host's current hook registry
    /// iteration: one `(name, listener_count)` pair per registered hook.
    pub fn seed_hooks<I, S>(&self, hooks: I)
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut seeded = 0usize;
        for (name, listeners) in hooks {
            self.recorder.track(name, listeners);
            seeded += 1;
        }
        debug!(seeded, "Seeded hook tracking from host registry");
    }

    /// Reports one firing of a named hook. Inline, constant-time, and
    /// silent for hooks that are not tracked.
    pub fn hook_fired(&self, name: &str) {
        self.recorder.record_execution(name);
    }

    /// Returns the hook metrics snapshot.
    pub fn hooks_metrics(&self) -> Vec<HookInfo> {
        self.recorder.snapshot()
    }

    /// Returns the current config snapshot.
    pub async fn config(&self) -> ConfigSnapshot {
        self.config.read().await.clone()
    }

    /// Replaces the live config snapshot, as when the host hot-reloads.
    pub async fn update_config(&self, config: ConfigSnapshot) {
        *self.config.write().await = config;
    }
}

#[cfg(test)]
mod tests {
    use devlens_core::time::MonotonicClock;

    use super::*;

    fn host_client() -> HostClient {
        let recorder = Arc::new(HookRecorder::new(Arc::new(MonotonicClock::new())));
        HostClient::new(recorder, ConfigSnapshot::default(), HostEventBus::new(8))
    }

    #[test]
    fn seeding_tracks_each_hook_once() {
        let client = host_client();
        client.seed_hooks([("app:created", 2), ("app:mounted", 1)]);
        client.seed_hooks([("app:created", 9)]);

        let metrics = client.hooks_metrics();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].listeners, 2);
    }

    #[test]
    fn hook_firings_flow_into_the_recorder() {
        let client = host_client();
        client.seed_hooks([("page:finish", 1)]);
        client.hook_fired("page:finish");
        client.hook_fired("page:finish");
        client.hook_fired("not:tracked");

        let metrics = client.hooks_metrics();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].executions.len(), 2);
    }

    #[tokio::test]
    async fn config_snapshot_is_replaceable() {
        let client = host_client();
        let mut next = ConfigSnapshot::default();
        next.options = serde_json::json!({"devtools": true});
        client.update_config(next.clone()).await;
        assert_eq!(client.config().await, next);
    }
}

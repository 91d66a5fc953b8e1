//! Element inspector handle.
//!
//! The inspector maps a physical click in the host UI to a source location.
//! It is either `disabled` or `enabled`; `close()` always returns it to
//! `disabled` regardless of prior state.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use devlens_core::events::HostEventPayload;

use crate::bus::HostEventBus;

/// Overlay inspector state machine bound to the host event bus.
#[derive(Debug)]
pub struct Inspector {
    enabled: AtomicBool,
    bus: HostEventBus,
}

impl Inspector {
    /// Creates a disabled inspector emitting on the given bus.
    pub fn new(bus: HostEventBus) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            bus,
        }
    }

    /// Enables the overlay. Idempotent.
    pub fn enable(&self) {
        if !self.enabled.swap(true, Ordering::SeqCst) {
            debug!("Inspector enabled");
        }
    }

    /// Whether the overlay is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Reports hover/selection state to listeners.
    pub fn update(&self, data: serde_json::Value) {
        if self.is_enabled() {
            self.bus.emit(HostEventPayload::InspectorUpdate { data });
        }
    }

    /// Reports one physical click, emitting exactly one
    /// `host:inspector:click` with the resolved source location.
    /// Ignored while disabled.
    pub fn click(&self, base_url: &str, file: &str, line: u32, column: u32) {
        if !self.is_enabled() {
            return;
        }
        self.bus.emit(HostEventPayload::InspectorClick {
            base_url: base_url.to_string(),
            file: file.to_string(),
            line,
            column,
        });
    }

    /// Closes the overlay, transitioning to `disabled` regardless of prior
    /// state, and emits `host:inspector:close`.
    pub fn close(&self) {
        self.enabled.store(false, Ordering::SeqCst);
        self.bus.emit(HostEventPayload::InspectorClose);
        debug!("Inspector closed");
    }
}

//! Host-originated events pushed to attached inspectors and panels.
//!
//! Events are dispatched through the host event bus and consumed by the
//! RPC bridge and any in-process listeners. Each event is fire-and-forget,
//! unordered relative to RPC calls, and may have zero or more listeners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wrapper for all host events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: HostEventPayload,
}

/// Union of all host event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum HostEventPayload {
    /// The devtools panel navigated; used for persisting the current tab.
    #[serde(rename = "devtools:navigate")]
    DevtoolsNavigate {
        /// Panel-local path navigated to.
        path: String,
    },
    /// The component inspector overlay was updated.
    #[serde(rename = "host:inspector:update")]
    InspectorUpdate {
        /// Opaque inspector state (hover target, link params, position).
        data: serde_json::Value,
    },
    /// The component inspector was clicked.
    #[serde(rename = "host:inspector:click")]
    InspectorClick {
        /// Base URL of the host app serving the clicked page.
        base_url: String,
        /// Source file the click resolved to.
        file: String,
        /// Line within the file.
        line: u32,
        /// Column within the line.
        column: u32,
    },
    /// The component inspector was closed.
    #[serde(rename = "host:inspector:close")]
    InspectorClose,
    /// Reactivity was manually triggered, since host state is not reactive
    /// across frames.
    #[serde(rename = "host:update:reactivity")]
    UpdateReactivity,
}

impl HostEvent {
    /// Create a new host event.
    pub fn new(payload: HostEventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

//! Wire shape of hook metrics records.

use serde::{Deserialize, Serialize};

/// Snapshot of one tracked lifecycle hook, as reported to panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookInfo {
    /// Hook name, unique per host session.
    pub name: String,
    /// Session-clock millisecond when tracking began.
    pub start: u64,
    /// Session-clock millisecond when tracking stopped, if it has.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
    /// `end - start` when `end` is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    /// Current number of registered listeners for this hook.
    pub listeners: usize,
    /// Timestamps of each firing, oldest first, monotonically non-decreasing.
    pub executions: Vec<u64>,
    /// Number of execution timestamps evicted by the ring-buffer cap.
    /// Zero when the recorder is unbounded.
    #[serde(default)]
    pub dropped: u64,
}

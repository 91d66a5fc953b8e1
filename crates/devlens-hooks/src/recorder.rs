//! Hook recorder implementation.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use devlens_core::time::SharedClock;
use devlens_core::types::HookInfo;

/// Internal mutable state for one tracked hook.
#[derive(Debug)]
struct TrackedHook {
    /// Session-clock millisecond when tracking began.
    start: u64,
    /// Session-clock millisecond when tracking stopped, if it has.
    end: Option<u64>,
    /// Current registered listener count (snapshot, not historical).
    listeners: usize,
    /// Execution timestamps, oldest first.
    executions: VecDeque<u64>,
    /// Timestamps evicted by the ring-buffer cap.
    dropped: u64,
}

/// Records execution metrics for named lifecycle hooks.
///
/// Explicitly constructed and owned by the host session; pass clones of the
/// `Arc` into the host adapter and the RPC bridge rather than relying on an
/// ambient singleton, so multiple sessions can coexist in tests.
#[derive(Debug)]
pub struct HookRecorder {
    /// Session clock supplying monotonic millisecond timestamps.
    clock: SharedClock,
    /// Optional ring-buffer cap for per-hook execution timestamps.
    execution_cap: Option<usize>,
    /// Hook name → tracked state.
    records: DashMap<String, TrackedHook>,
    /// Hook names in first-tracked order, for stable snapshots.
    order: Mutex<Vec<String>>,
}

impl HookRecorder {
    /// Creates an unbounded recorder.
    pub fn new(clock: SharedClock) -> Self {
        Self::with_cap(clock, None)
    }

    /// Creates a recorder with an optional execution ring-buffer cap.
    ///
    /// With `cap = Some(n)`, each hook keeps only its most recent `n`
    /// execution timestamps; evictions are counted in the record's
    /// `dropped` field so truncation is visible to panels.
    pub fn with_cap(clock: SharedClock, execution_cap: Option<usize>) -> Self {
        Self {
            clock,
            execution_cap,
            records: DashMap::new(),
            order: Mutex::new(Vec::new()),
        }
    }

    /// Starts tracking a hook. Idempotent: tracking an already-tracked name
    /// leaves the existing record untouched.
    ///
    /// `listeners` is the hook's current registered-callback count, supplied
    /// by the caller since the host adapter owns the hook registry.
    pub fn track(&self, name: impl Into<String>, listeners: usize) {
        let name = name.into();
        match self.records.entry(name.clone()) {
            Entry::Occupied(_) => {}
            Entry::Vacant(vacant) => {
                let start = self.clock.now_millis();
                vacant.insert(TrackedHook {
                    start,
                    end: None,
                    listeners,
                    executions: VecDeque::new(),
                    dropped: 0,
                });
                self.order
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(name.clone());
                debug!(hook = %name, listeners, start, "Hook tracked");
            }
        }
    }

    /// Records one firing of a hook.
    ///
    /// Intentionally a silent no-op for untracked or already-untracked
    /// names: hook firing must never be slowed or interrupted by
    /// instrumentation, so there is no error path here. This is the sole
    /// silent no-op in the bridge.
    pub fn record_execution(&self, name: &str) {
        if let Some(mut record) = self.records.get_mut(name) {
            if record.end.is_some() {
                return;
            }
            let now = self.clock.now_millis();
            record.executions.push_back(now);
            if let Some(cap) = self.execution_cap {
                while record.executions.len() > cap {
                    record.executions.pop_front();
                    record.dropped += 1;
                }
            }
        }
    }

    /// Updates the listener-count snapshot for a tracked hook.
    /// No-op for untracked names.
    pub fn set_listeners(&self, name: &str, listeners: usize) {
        if let Some(mut record) = self.records.get_mut(name) {
            record.listeners = listeners;
        }
    }

    /// Stops tracking a hook, stamping its end time.
    ///
    /// The record remains queryable; further executions are ignored.
    /// Idempotent: untracking twice keeps the first end timestamp.
    pub fn untrack(&self, name: &str) {
        if let Some(mut record) = self.records.get_mut(name) {
            if record.end.is_none() {
                record.end = Some(self.clock.now_millis());
                debug!(hook = %name, end = record.end, "Hook untracked");
            }
        }
    }

    /// Returns whether a hook is currently tracked (live or ended).
    pub fn is_tracked(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Returns an immutable snapshot of all tracked hooks, in
    /// first-tracked order.
    pub fn snapshot(&self) -> Vec<HookInfo> {
        let order = self
            .order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        order
            .iter()
            .filter_map(|name| {
                self.records.get(name).map(|record| HookInfo {
                    name: name.clone(),
                    start: record.start,
                    end: record.end,
                    duration: record.end.map(|end| end.saturating_sub(record.start)),
                    listeners: record.listeners,
                    executions: record.executions.iter().copied().collect(),
                    dropped: record.dropped,
                })
            })
            .collect()
    }
}

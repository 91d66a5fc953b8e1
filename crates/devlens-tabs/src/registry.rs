//! Tab registry. Stores module-contributed tabs and dispatches actions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info, warn};

use devlens_core::error::BridgeError;
use devlens_core::result::BridgeResult;
use devlens_core::types::RefreshEvent;

use crate::view::{ModuleTab, ModuleView, TabInfo, TabView};

/// One registry entry. The lazy-load guard lives here rather than on the
/// view so that replacing a tab under the same name does not re-run its
/// `on_load` hook within the same host session.
struct TabEntry {
    tab: ModuleTab,
    loaded: Arc<AtomicBool>,
}

/// Registry of all module-contributed tabs for one host session.
///
/// Exclusively owns the tab collection; contributing modules retain no
/// authoritative copy. Readers only ever receive wire projections, never
/// live references. Explicitly constructed and torn down per session so
/// multiple sessions can coexist in tests.
pub struct TabRegistry {
    /// Registered tabs in registration order.
    tabs: RwLock<Vec<TabEntry>>,
    /// Refresh signal sender shared with the RPC bridge.
    refresh_tx: broadcast::Sender<RefreshEvent>,
}

impl std::fmt::Debug for TabRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabRegistry").finish()
    }
}

impl TabRegistry {
    /// Creates a registry that reports tab changes on the given channel.
    pub fn new(refresh_tx: broadcast::Sender<RefreshEvent>) -> Self {
        Self {
            tabs: RwLock::new(Vec::new()),
            refresh_tx,
        }
    }

    /// Subscribes to the registry's refresh signals.
    pub fn subscribe_refresh(&self) -> broadcast::Receiver<RefreshEvent> {
        self.refresh_tx.subscribe()
    }

    /// Registers a tab, keyed by `tab.name`.
    ///
    /// Duplicate names follow the last-registration-wins policy: the new
    /// tab replaces the old one in place (keeping its position and its
    /// lazy-load guard), a warning is logged, and the host never crashes.
    /// When both the old and new view are `launch`, positionally matching
    /// actions keep the old in-flight flags, so an action that is pending
    /// at replacement time stays busy until its handler finishes.
    pub async fn register(&self, mut tab: ModuleTab) {
        let mut tabs = self.tabs.write().await;

        if let Some(entry) = tabs.iter_mut().find(|entry| entry.tab.name == tab.name) {
            let collision = BridgeError::duplicate_registration(format!(
                "tab '{}' already registered, overriding with the newer registration",
                tab.name
            ));
            warn!(tab = %tab.name, error = %collision, "Tab name collision");

            if let (ModuleView::Launch(old), ModuleView::Launch(new)) =
                (&entry.tab.view, &mut tab.view)
            {
                for (new_action, old_action) in new.actions.iter_mut().zip(&old.actions) {
                    new_action.adopt_pending(old_action);
                }
            }
            entry.tab = tab;
        } else {
            info!(tab = %tab.name, title = %tab.title, "Tab registered");
            tabs.push(TabEntry {
                tab,
                loaded: Arc::new(AtomicBool::new(false)),
            });
        }
        drop(tabs);

        self.emit_refresh();
    }

    /// Unregisters a tab by name, as when its owning module is unloaded.
    pub async fn unregister(&self, name: &str) -> BridgeResult<()> {
        let mut tabs = self.tabs.write().await;
        let before = tabs.len();
        tabs.retain(|entry| entry.tab.name != name);

        if tabs.len() == before {
            return Err(BridgeError::not_found(format!(
                "tab '{name}' is not registered"
            )));
        }
        drop(tabs);

        info!(tab = %name, "Tab unregistered");
        self.emit_refresh();
        Ok(())
    }

    /// Returns all tabs in registration order, as wire projections.
    pub async fn list(&self) -> Vec<TabInfo> {
        let tabs = self.tabs.read().await;
        tabs.iter().map(|entry| entry.tab.to_info()).collect()
    }

    /// Returns only the tabs with an `iframe` view, in registration order.
    pub async fn iframe_tabs(&self) -> Vec<TabInfo> {
        let tabs = self.tabs.read().await;
        tabs.iter()
            .filter(|entry| matches!(entry.tab.view, ModuleView::Iframe { .. }))
            .map(|entry| entry.tab.to_info())
            .collect()
    }

    /// Resolves the current view of a tab.
    ///
    /// The first resolution of a `launch` tab runs its lazy-load hook, at
    /// most once per tab per host session. A failing hook is caught and
    /// logged; it never fails the resolution itself.
    pub async fn resolve_view(&self, name: &str) -> BridgeResult<TabView> {
        let (view, on_load) = {
            let tabs = self.tabs.read().await;
            let entry = tabs
                .iter()
                .find(|entry| entry.tab.name == name)
                .ok_or_else(|| {
                    BridgeError::not_found(format!("tab '{name}' is not registered"))
                })?;

            let on_load = match &entry.tab.view {
                ModuleView::Launch(launch) => launch.on_load.as_ref().and_then(|handler| {
                    // swap returns the previous value; only the first
                    // resolver gets to run the hook.
                    (!entry.loaded.swap(true, Ordering::SeqCst)).then(|| handler.clone())
                }),
                _ => None,
            };

            (entry.tab.to_info().view, on_load)
        };

        if let Some(handler) = on_load {
            debug!(tab = %name, "Running tab lazy-load hook");
            if let Err(err) = handler.run().await {
                warn!(tab = %name, error = %err, "Tab lazy-load hook failed");
            }
        }

        Ok(view)
    }

    /// Invokes action `index` of the named `launch` tab.
    ///
    /// Validates bounds (`OutOfRange`), rejects re-invocation while the
    /// action is already in flight (`Busy`), then sets `pending` and runs
    /// the handler as an independent task; the caller does not block past
    /// initiation. On completion, success or failure, the task clears
    /// `pending` and emits exactly one `customTabs` refresh. Handler
    /// failures are caught at this boundary and logged as typed
    /// `HANDLER_FAILURE` conditions; they never propagate into host code.
    pub async fn invoke_action(&self, name: &str, index: usize) -> BridgeResult<()> {
        let (pending, handler) = {
            let tabs = self.tabs.read().await;
            let entry = tabs
                .iter()
                .find(|entry| entry.tab.name == name)
                .ok_or_else(|| {
                    BridgeError::not_found(format!("tab '{name}' is not registered"))
                })?;

            let launch = match &entry.tab.view {
                ModuleView::Launch(launch) => launch,
                _ => {
                    return Err(BridgeError::not_found(format!(
                        "tab '{name}' has no launch view"
                    )));
                }
            };

            let action = launch.actions.get(index).ok_or_else(|| {
                BridgeError::out_of_range(format!(
                    "tab '{name}' has {} actions, index {index} is out of range",
                    launch.actions.len()
                ))
            })?;

            (action.pending_flag(), action.handler())
        };

        if pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(BridgeError::busy(format!(
                "action {index} of tab '{name}' is already pending"
            )));
        }

        let refresh_tx = self.refresh_tx.clone();
        let tab_name = name.to_string();
        tokio::spawn(async move {
            if let Err(err) = handler.run().await {
                let failure = BridgeError::handler_failure(format!(
                    "action {index} of tab '{tab_name}' failed: {err}"
                ));
                warn!(tab = %tab_name, action = index, error = %failure, "Tab action failed");
            }
            pending.store(false, Ordering::SeqCst);
            let _ = refresh_tx.send(RefreshEvent::CustomTabs);
        });

        Ok(())
    }

    /// Removes every tab at host-session teardown.
    pub async fn clear(&self) {
        let mut tabs = self.tabs.write().await;
        let count = tabs.len();
        tabs.clear();
        drop(tabs);

        info!(count, "Tab registry cleared");
    }

    fn emit_refresh(&self) {
        // Best-effort: no subscribers is fine.
        let _ = self.refresh_tx.send(RefreshEvent::CustomTabs);
    }
}

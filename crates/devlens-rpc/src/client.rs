//! Panel-side typed facade over the bridge.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use devlens_core::error::BridgeError;
use devlens_core::result::BridgeResult;
use devlens_core::types::{
    AutoImportsWithMetadata, ComponentInfo, ConfigSnapshot, HookInfo, LayoutInfo, PageInfo,
    RefreshEvent, VersionsInfo,
};
use devlens_tabs::TabInfo;

use crate::envelope::{PanelMessage, RequestEnvelope};
use crate::session::RpcSession;
use crate::transport::PanelTransport;
use crate::wire::{ClientPush, ServerRequest, ServerResponse};

/// A connected tooling panel.
///
/// Calls are correlated to responses through the session's monotonic id
/// counter; refresh pushes arrive on a separate queue consumed via
/// [`PanelClient::next_refresh`].
pub struct PanelClient {
    transport: Arc<dyn PanelTransport>,
    session: Arc<RpcSession>,
    pending: Arc<DashMap<u64, oneshot::Sender<ServerResponse>>>,
    refresh_rx: Mutex<mpsc::Receiver<RefreshEvent>>,
    pump: JoinHandle<()>,
}

impl std::fmt::Debug for PanelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelClient")
            .field("session", &self.session.id())
            .finish()
    }
}

impl PanelClient {
    /// Connects over the given transport, spawning the receive pump.
    pub fn connect(
        transport: Arc<dyn PanelTransport>,
        session: Arc<RpcSession>,
        refresh_buffer: usize,
    ) -> Self {
        let pending: Arc<DashMap<u64, oneshot::Sender<ServerResponse>>> = Arc::new(DashMap::new());
        let (refresh_tx, refresh_rx) = mpsc::channel(refresh_buffer);

        let pump = {
            let transport = transport.clone();
            let pending = pending.clone();
            tokio::spawn(async move {
                while let Some(message) = transport.recv().await {
                    match message {
                        PanelMessage::Response { id, response } => {
                            if let Some((_, sender)) = pending.remove(&id) {
                                let _ = sender.send(response);
                            } else {
                                debug!(id, "Dropped response with no waiting call");
                            }
                        }
                        PanelMessage::Push(ClientPush::Refresh { event }) => {
                            // Best-effort: a full queue coalesces.
                            let _ = refresh_tx.try_send(event);
                        }
                    }
                }
            })
        };

        Self {
            transport,
            session,
            pending,
            refresh_rx: Mutex::new(refresh_rx),
            pump,
        }
    }

    /// Returns the session shared with the host side.
    pub fn session(&self) -> &Arc<RpcSession> {
        &self.session
    }

    /// Invokes one server-exposed function and awaits its response.
    ///
    /// Cancellation-safe: dropping the returned future (as with an
    /// external timeout) releases the correlation entry, so a host that
    /// never answers cannot leak one per abandoned call.
    pub async fn call(&self, request: ServerRequest) -> BridgeResult<ServerResponse> {
        let id = self.session.next_request_id();
        let (tx, rx) = oneshot::channel();
        self.pending.insert(id, tx);
        let _guard = PendingGuard {
            pending: &self.pending,
            id,
        };

        self.transport.send(RequestEnvelope { id, request }).await?;

        let response = rx.await.map_err(|_| {
            BridgeError::transport("connection closed before the response arrived")
        })?;

        match response {
            ServerResponse::Error(payload) => Err(payload.into()),
            other => Ok(other),
        }
    }

    /// Awaits the next refresh push. `None` means the host closed the
    /// connection.
    pub async fn next_refresh(&self) -> Option<RefreshEvent> {
        self.refresh_rx.lock().await.recv().await
    }

    /// `getConfig`.
    pub async fn get_config(&self) -> BridgeResult<ConfigSnapshot> {
        match self.call(ServerRequest::GetConfig).await? {
            ServerResponse::Config(config) => Ok(config),
            other => Err(Self::mismatch("getConfig", &other)),
        }
    }

    /// `getComponents`.
    pub async fn get_components(&self) -> BridgeResult<Vec<ComponentInfo>> {
        match self.call(ServerRequest::GetComponents).await? {
            ServerResponse::Components(components) => Ok(components),
            other => Err(Self::mismatch("getComponents", &other)),
        }
    }

    /// `getAutoImports`.
    pub async fn get_auto_imports(&self) -> BridgeResult<AutoImportsWithMetadata> {
        match self.call(ServerRequest::GetAutoImports).await? {
            ServerResponse::AutoImports(imports) => Ok(imports),
            other => Err(Self::mismatch("getAutoImports", &other)),
        }
    }

    /// `getServerPages`.
    pub async fn get_server_pages(&self) -> BridgeResult<Vec<PageInfo>> {
        match self.call(ServerRequest::GetServerPages).await? {
            ServerResponse::ServerPages(pages) => Ok(pages),
            other => Err(Self::mismatch("getServerPages", &other)),
        }
    }

    /// `getIframeTabs`.
    pub async fn get_iframe_tabs(&self) -> BridgeResult<Vec<TabInfo>> {
        match self.call(ServerRequest::GetIframeTabs).await? {
            ServerResponse::IframeTabs(tabs) => Ok(tabs),
            other => Err(Self::mismatch("getIframeTabs", &other)),
        }
    }

    /// `getServerHooks`.
    pub async fn get_server_hooks(&self) -> BridgeResult<Vec<HookInfo>> {
        match self.call(ServerRequest::GetServerHooks).await? {
            ServerResponse::ServerHooks(hooks) => Ok(hooks),
            other => Err(Self::mismatch("getServerHooks", &other)),
        }
    }

    /// `getLayouts`.
    pub async fn get_layouts(&self) -> BridgeResult<Vec<LayoutInfo>> {
        match self.call(ServerRequest::GetLayouts).await? {
            ServerResponse::Layouts(layouts) => Ok(layouts),
            other => Err(Self::mismatch("getLayouts", &other)),
        }
    }

    /// `getVersions`.
    pub async fn get_versions(&self) -> BridgeResult<VersionsInfo> {
        match self.call(ServerRequest::GetVersions).await? {
            ServerResponse::Versions(versions) => Ok(versions),
            other => Err(Self::mismatch("getVersions", &other)),
        }
    }

    /// `customTabAction`.
    pub async fn custom_tab_action(&self, name: &str, action: usize) -> BridgeResult<bool> {
        let request = ServerRequest::CustomTabAction {
            name: name.to_string(),
            action,
        };
        match self.call(request).await? {
            ServerResponse::TabActionResult(initiated) => Ok(initiated),
            other => Err(Self::mismatch("customTabAction", &other)),
        }
    }

    /// `openInEditor`.
    pub async fn open_in_editor(&self, filepath: &str) -> BridgeResult<()> {
        let request = ServerRequest::OpenInEditor {
            filepath: filepath.to_string(),
        };
        match self.call(request).await? {
            ServerResponse::EditorOpened => Ok(()),
            other => Err(Self::mismatch("openInEditor", &other)),
        }
    }

    fn mismatch(function: &str, response: &ServerResponse) -> BridgeError {
        BridgeError::internal(format!(
            "mismatched response for {function}: {response:?}"
        ))
    }
}

impl Drop for PanelClient {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Removes the correlation entry when a call ends for any reason. A no-op
/// after the pump has already routed the response; load-bearing when the
/// call future is dropped before the response arrives.
struct PendingGuard<'a> {
    pending: &'a DashMap<u64, oneshot::Sender<ServerResponse>>,
    id: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.remove(&self.id);
    }
}

//! Host-side bridge server: answers panel queries and forwards refreshes.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use devlens_core::error::ErrorPayload;
use devlens_core::result::BridgeResult;
use devlens_core::traits::{EditorOpener, HostIntrospection};
use devlens_core::types::RefreshEvent;
use devlens_hooks::HookRecorder;
use devlens_tabs::TabRegistry;

use crate::envelope::{PanelMessage, RequestEnvelope};
use crate::session::RpcSession;
use crate::transport::ServerTransport;
use crate::wire::{ClientPush, ServerRequest, ServerResponse};

/// Serves the server-exposed function set to any number of panel sessions.
///
/// Reads from the hook recorder, the tab registry, and the host
/// introspection providers; panels never mutate host state except through
/// `customTabAction` and `openInEditor`.
pub struct BridgeServer {
    /// Hook metrics recorder, shared with the host adapter.
    recorder: Arc<HookRecorder>,
    /// Module tab registry.
    tabs: Arc<TabRegistry>,
    /// Host introspection providers.
    introspection: Arc<dyn HostIntrospection>,
    /// Editor-opening side effect.
    editor: Arc<dyn EditorOpener>,
}

impl std::fmt::Debug for BridgeServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeServer").finish()
    }
}

impl BridgeServer {
    /// Creates a bridge server over the given host state.
    pub fn new(
        recorder: Arc<HookRecorder>,
        tabs: Arc<TabRegistry>,
        introspection: Arc<dyn HostIntrospection>,
        editor: Arc<dyn EditorOpener>,
    ) -> Self {
        Self {
            recorder,
            tabs,
            introspection,
            editor,
        }
    }

    /// Handles one request, mapping any failure into the typed `Error`
    /// response variant so the panel never sees a silent empty result.
    pub async fn handle(&self, request: ServerRequest) -> ServerResponse {
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "Query failed");
                ServerResponse::Error(ErrorPayload::from(&err))
            }
        }
    }

    async fn dispatch(&self, request: ServerRequest) -> BridgeResult<ServerResponse> {
        match request {
            ServerRequest::GetConfig => {
                Ok(ServerResponse::Config(self.introspection.config().await?))
            }
            ServerRequest::GetComponents => Ok(ServerResponse::Components(
                self.introspection.components().await?,
            )),
            ServerRequest::GetAutoImports => Ok(ServerResponse::AutoImports(
                self.introspection.auto_imports().await?,
            )),
            ServerRequest::GetServerPages => Ok(ServerResponse::ServerPages(
                self.introspection.server_pages().await?,
            )),
            ServerRequest::GetIframeTabs => {
                Ok(ServerResponse::IframeTabs(self.tabs.iframe_tabs().await))
            }
            ServerRequest::GetServerHooks => {
                Ok(ServerResponse::ServerHooks(self.recorder.snapshot()))
            }
            ServerRequest::GetLayouts => {
                Ok(ServerResponse::Layouts(self.introspection.layouts().await?))
            }
            ServerRequest::GetVersions => Ok(ServerResponse::Versions(
                self.introspection.versions().await?,
            )),
            ServerRequest::CustomTabAction { name, action } => {
                self.tabs.invoke_action(&name, action).await?;
                Ok(ServerResponse::TabActionResult(true))
            }
            ServerRequest::OpenInEditor { filepath } => {
                self.editor.open(&filepath).await?;
                Ok(ServerResponse::EditorOpened)
            }
        }
    }

    /// Serves one panel session until it disconnects or the host shuts
    /// down. Exactly one response per request, correlated by envelope id;
    /// refresh pushes are forwarded best-effort, filtered by the session's
    /// subscriptions, and coalesce when the panel lags.
    pub async fn serve<T: ServerTransport>(
        &self,
        session: Arc<RpcSession>,
        transport: T,
        mut refresh_rx: broadcast::Receiver<RefreshEvent>,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) {
        info!(session = %session.id(), "Panel session attached");

        let mut refresh_open = true;
        loop {
            tokio::select! {
                envelope = transport.recv() => {
                    let Some(RequestEnvelope { id, request }) = envelope else {
                        info!(session = %session.id(), "Panel disconnected");
                        break;
                    };
                    let response = self.handle(request).await;
                    if let Err(err) = transport.send(PanelMessage::Response { id, response }).await {
                        warn!(session = %session.id(), error = %err, "Failed to send response");
                        break;
                    }
                }
                event = refresh_rx.recv(), if refresh_open => {
                    match event {
                        Ok(event) if session.is_subscribed(event) => {
                            // Best-effort; a send failure ends the session
                            // on the request path instead.
                            let _ = transport
                                .send(PanelMessage::Push(ClientPush::Refresh { event }))
                                .await;
                        }
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            debug!(session = %session.id(), skipped, "Refresh pushes coalesced");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            refresh_open = false;
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!(session = %session.id(), "Host session shutting down");
                    break;
                }
            }
        }
    }
}

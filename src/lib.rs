//! # devlens
//!
//! DevLens is a development-time inspection bridge: a running web
//! application exposes runtime introspection data (component trees, route
//! tables, auto-imports, lifecycle-hook timing) to tooling panels over a
//! typed duplex RPC bridge, and extension modules register interactive
//! tabs back into the host.
//!
//! This crate is the facade: it wires the hook recorder, tab registry,
//! RPC bridge, and host adapter into a [`DevtoolsSession`] with explicit
//! construction and teardown, so multiple sessions can coexist (e.g. in
//! tests) without ambient singletons.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

pub use devlens_core::config::DevlensConfig;
pub use devlens_core::error::{BridgeError, ErrorKind};
pub use devlens_core::events::{HostEvent, HostEventPayload};
pub use devlens_core::result::BridgeResult;
pub use devlens_core::time::{Clock, ManualClock, MonotonicClock, SharedClock};
pub use devlens_core::traits::{EditorOpener, HostIntrospection};
pub use devlens_core::types::{
    AutoImport, AutoImportsWithMetadata, ComponentInfo, ConfigSnapshot, HookInfo, LayoutInfo,
    PageInfo, RefreshEvent, VersionsInfo,
};
pub use devlens_hooks::HookRecorder;
pub use devlens_host::{CommandEditorOpener, HostClient, HostEventBus, Inspector};
pub use devlens_rpc::{BridgeServer, PanelClient, RpcSession, ServerRequest, ServerResponse};
pub use devlens_tabs::{
    ActionHandler, LaunchAction, LaunchView, ModuleTab, ModuleView, TabInfo, TabRegistry, TabView,
    action_handler,
};

/// One host session of the inspection bridge.
///
/// Owns the shared singletons (hook recorder, tab registry) for their
/// host-session lifetime: created here, cleared in [`shutdown`].
///
/// [`shutdown`]: DevtoolsSession::shutdown
#[derive(Clone)]
pub struct DevtoolsSession {
    /// Bridge configuration.
    config: DevlensConfig,
    /// Hook metrics recorder.
    recorder: Arc<HookRecorder>,
    /// Module tab registry.
    tabs: Arc<TabRegistry>,
    /// Host client adapter.
    host: Arc<HostClient>,
    /// RPC bridge server.
    server: Arc<BridgeServer>,
    /// Host-driven refresh sender (shared with the tab registry).
    refresh_tx: broadcast::Sender<RefreshEvent>,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
}

impl std::fmt::Debug for DevtoolsSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevtoolsSession").finish()
    }
}

impl DevtoolsSession {
    /// Creates a session over the given host collaborators, using the
    /// monotonic clock.
    pub fn new(
        config: DevlensConfig,
        introspection: Arc<dyn HostIntrospection>,
        editor: Arc<dyn EditorOpener>,
    ) -> Self {
        Self::with_clock(
            config,
            introspection,
            editor,
            Arc::new(MonotonicClock::new()),
        )
    }

    /// Creates a session with an explicit clock, for deterministic tests.
    pub fn with_clock(
        config: DevlensConfig,
        introspection: Arc<dyn HostIntrospection>,
        editor: Arc<dyn EditorOpener>,
        clock: SharedClock,
    ) -> Self {
        let (refresh_tx, _) = broadcast::channel(config.bridge.channel_buffer_size);
        let (shutdown_tx, _) = broadcast::channel(1);

        let recorder = Arc::new(HookRecorder::with_cap(clock, config.hooks.execution_cap));
        let tabs = Arc::new(TabRegistry::new(refresh_tx.clone()));
        let host = Arc::new(
            HostClient::new(
                recorder.clone(),
                ConfigSnapshot::default(),
                HostEventBus::new(config.bridge.channel_buffer_size),
            )
            .with_inspector(),
        );
        let server = Arc::new(BridgeServer::new(
            recorder.clone(),
            tabs.clone(),
            introspection,
            editor,
        ));

        info!("Devtools session initialized");

        Self {
            config,
            recorder,
            tabs,
            host,
            server,
            refresh_tx,
            shutdown_tx,
        }
    }

    /// Returns the hook metrics recorder.
    pub fn recorder(&self) -> &Arc<HookRecorder> {
        &self.recorder
    }

    /// Returns the tab registry extension modules register into.
    pub fn tabs(&self) -> &Arc<TabRegistry> {
        &self.tabs
    }

    /// Returns the host client adapter.
    pub fn host(&self) -> &Arc<HostClient> {
        &self.host
    }

    /// Pushes a host-driven refresh (e.g. `components` after a rebuild,
    /// `imports` after a scan) to every subscribed panel. Best-effort.
    pub fn refresh(&self, event: RefreshEvent) {
        let _ = self.refresh_tx.send(event);
    }

    /// Attaches a same-process panel over an in-memory transport.
    ///
    /// Creates the panel's [`RpcSession`] and spawns its serve loop; the
    /// returned client is ready to query. Each attached panel is
    /// independent.
    pub fn attach_panel(&self) -> PanelClient {
        let session = Arc::new(RpcSession::new());
        let (server_transport, panel_transport) =
            devlens_rpc::transport::memory_pair(self.config.bridge.transport_buffer_size);

        let server = self.server.clone();
        let serve_session = session.clone();
        let refresh_rx = self.refresh_tx.subscribe();
        let shutdown_rx = self.shutdown_tx.subscribe();
        tokio::spawn(async move {
            server
                .serve(serve_session, server_transport, refresh_rx, shutdown_rx)
                .await;
        });

        PanelClient::connect(
            Arc::new(panel_transport),
            session,
            self.config.bridge.channel_buffer_size,
        )
    }

    /// Tears the session down: signals every serve loop and clears the
    /// tab registry.
    pub async fn shutdown(&self) {
        info!("Shutting down devtools session");
        let _ = self.shutdown_tx.send(());
        self.tabs.clear().await;
    }
}

//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

use devlens::{
    AutoImport, AutoImportsWithMetadata, BridgeResult, ComponentInfo, ConfigSnapshot,
    DevlensConfig, DevtoolsSession, EditorOpener, HostIntrospection, LayoutInfo, ManualClock,
    PageInfo, VersionsInfo,
};

static TRACING: Once = Once::new();

/// Installs the log subscriber once per test binary. Verbosity is steered
/// through `RUST_LOG` as in any other run of the bridge.
fn init_tracing() {
    TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("devlens=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Introspection provider serving fixed fixture data.
pub struct StaticIntrospection;

#[async_trait]
impl HostIntrospection for StaticIntrospection {
    async fn config(&self) -> BridgeResult<ConfigSnapshot> {
        Ok(ConfigSnapshot {
            options: serde_json::json!({"devtools": true, "srcDir": "app"}),
            app_config: Default::default(),
        })
    }

    async fn components(&self) -> BridgeResult<Vec<ComponentInfo>> {
        Ok(vec![
            ComponentInfo {
                name: "AppHeader".to_string(),
                file_path: "components/AppHeader.vue".to_string(),
                mode: "all".to_string(),
                global: true,
            },
            ComponentInfo {
                name: "UserCard".to_string(),
                file_path: "components/UserCard.vue".to_string(),
                mode: "client".to_string(),
                global: false,
            },
        ])
    }

    async fn auto_imports(&self) -> BridgeResult<AutoImportsWithMetadata> {
        Ok(AutoImportsWithMetadata {
            imports: vec![AutoImport {
                name: "useState".to_string(),
                from: "#app".to_string(),
                alias: None,
            }],
            metadata: None,
        })
    }

    async fn server_pages(&self) -> BridgeResult<Vec<PageInfo>> {
        Ok(vec![PageInfo {
            name: Some("index".to_string()),
            path: "/".to_string(),
            file: Some("pages/index.vue".to_string()),
            children: Vec::new(),
        }])
    }

    async fn layouts(&self) -> BridgeResult<Vec<LayoutInfo>> {
        Ok(vec![LayoutInfo {
            name: "default".to_string(),
            file: "layouts/default.vue".to_string(),
        }])
    }

    async fn versions(&self) -> BridgeResult<VersionsInfo> {
        Ok(VersionsInfo {
            host: "3.0.0".to_string(),
        })
    }
}

/// Editor opener that records opened paths instead of spawning anything.
#[derive(Default)]
pub struct RecordingEditor {
    /// Paths passed to `open`, in order.
    pub opened: Mutex<Vec<String>>,
}

#[async_trait]
impl EditorOpener for RecordingEditor {
    async fn open(&self, filepath: &str) -> BridgeResult<()> {
        self.opened.lock().unwrap().push(filepath.to_string());
        Ok(())
    }
}

/// Creates a session over the fixture collaborators with a manual clock.
pub fn test_session() -> (DevtoolsSession, Arc<ManualClock>, Arc<RecordingEditor>) {
    init_tracing();
    let clock = Arc::new(ManualClock::new());
    let editor = Arc::new(RecordingEditor::default());
    let session = DevtoolsSession::with_clock(
        DevlensConfig::default(),
        Arc::new(StaticIntrospection),
        editor.clone(),
        clock.clone(),
    );
    (session, clock, editor)
}

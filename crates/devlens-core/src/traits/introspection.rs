//! Host introspection provider seam.

use async_trait::async_trait;

use crate::result::BridgeResult;
use crate::types::{
    AutoImportsWithMetadata, ComponentInfo, ConfigSnapshot, LayoutInfo, PageInfo, VersionsInfo,
};

/// Supplies the host application's introspection data to the bridge.
///
/// The host's component/route/import providers are external collaborators;
/// the bridge consumes them only through this narrow interface and never
/// caches across calls, so every panel query reads current host state.
#[async_trait]
pub trait HostIntrospection: Send + Sync {
    /// Snapshot of the host's resolved configuration.
    async fn config(&self) -> BridgeResult<ConfigSnapshot>;

    /// All registered components.
    async fn components(&self) -> BridgeResult<Vec<ComponentInfo>>;

    /// Auto-discovered import bindings with optional scanner metadata.
    async fn auto_imports(&self) -> BridgeResult<AutoImportsWithMetadata>;

    /// Server-known pages/routes.
    async fn server_pages(&self) -> BridgeResult<Vec<PageInfo>>;

    /// Registered layouts.
    async fn layouts(&self) -> BridgeResult<Vec<LayoutInfo>>;

    /// Host framework version information.
    async fn versions(&self) -> BridgeResult<VersionsInfo>;
}

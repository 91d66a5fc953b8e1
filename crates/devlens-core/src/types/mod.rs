//! Wire-serializable types shared across the bridge.

pub mod hooks;
pub mod introspection;
pub mod refresh;

pub use hooks::HookInfo;
pub use introspection::{
    AutoImport, AutoImportsWithMetadata, ComponentInfo, ConfigSnapshot, ImportsMetadata,
    LayoutInfo, PageInfo, VersionsInfo,
};
pub use refresh::RefreshEvent;

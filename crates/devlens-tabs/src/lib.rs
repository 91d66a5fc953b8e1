//! # devlens-tabs
//!
//! Module view registry for DevLens. Extension modules contribute named
//! tabs rendered as one of three view variants (iframe, launch, vnode);
//! the registry owns the tab collection, resolves views for panels, and
//! dispatches launch actions without ever letting misbehaving extension
//! code destabilize the host.

pub mod registry;
pub mod view;

pub use registry::TabRegistry;
pub use view::{
    ActionHandler, LaunchAction, LaunchView, ModuleTab, ModuleView, TabActionInfo, TabInfo,
    TabView, action_handler,
};

//! # devlens-host
//!
//! The host client adapter: the object a running web application exposes so
//! tooling panels can attach. Holds the hook recorder handle and the live
//! config snapshot, emits host events on a broadcast bus, and optionally
//! carries an element-inspector handle.

pub mod bus;
pub mod client;
pub mod editor;
pub mod inspector;

pub use bus::HostEventBus;
pub use client::HostClient;
pub use editor::CommandEditorOpener;
pub use inspector::Inspector;

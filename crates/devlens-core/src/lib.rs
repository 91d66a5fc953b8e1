//! # devlens-core
//!
//! Core crate for DevLens. Contains the bridge configuration schema,
//! the monotonic session clock, host event envelopes, wire-serializable
//! introspection types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DevLens crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod time;
pub mod traits;
pub mod types;

pub use error::BridgeError;
pub use result::BridgeResult;

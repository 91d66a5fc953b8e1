//! Convenience result type alias for DevLens.

use crate::error::BridgeError;

/// A specialized `Result` type for DevLens bridge operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, BridgeError>` explicitly.
pub type BridgeResult<T> = Result<T, BridgeError>;

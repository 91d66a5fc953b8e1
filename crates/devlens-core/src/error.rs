//! Unified error types for the DevLens bridge.
//!
//! All crates map their internal errors into [`BridgeError`] for consistent
//! propagation through the ? operator. Errors surfaced to a panel are typed
//! failures on the specific call, never silent empty results.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error kind categorization used across the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The requested tab or hook was not found.
    NotFound,
    /// An action index was outside the bounds of a tab's action list.
    OutOfRange,
    /// Two modules registered a tab under the same name.
    DuplicateRegistration,
    /// A vnode view payload could not be serialized at registration time.
    NotSerializable,
    /// An action was re-invoked while its handler was still in flight.
    Busy,
    /// An action handler raised or rejected.
    HandlerFailure,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// The transport carrying the RPC bridge failed or was closed.
    Transport,
    /// An internal bridge error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::OutOfRange => write!(f, "OUT_OF_RANGE"),
            Self::DuplicateRegistration => write!(f, "DUPLICATE_REGISTRATION"),
            Self::NotSerializable => write!(f, "NOT_SERIALIZABLE"),
            Self::Busy => write!(f, "BUSY"),
            Self::HandlerFailure => write!(f, "HANDLER_FAILURE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Transport => write!(f, "TRANSPORT"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified bridge error used throughout DevLens.
///
/// Errors originating from extension-contributed code (registration, action
/// handlers, view payloads) are caught at the registry boundary and mapped
/// into this type. They must never crash or destabilize the host.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct BridgeError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl BridgeError {
    /// Create a new bridge error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new bridge error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an out-of-range error.
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfRange, message)
    }

    /// Create a duplicate-registration error.
    pub fn duplicate_registration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateRegistration, message)
    }

    /// Create a not-serializable error.
    pub fn not_serializable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotSerializable, message)
    }

    /// Create a busy error.
    pub fn busy(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Busy, message)
    }

    /// Create a handler-failure error.
    pub fn handler_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HandlerFailure, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for BridgeError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for BridgeError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// Wire representation of a bridge error, sent to panels in place of a
/// successful response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
}

impl From<&BridgeError> for ErrorPayload {
    fn from(err: &BridgeError) -> Self {
        Self {
            kind: err.kind,
            message: err.message.clone(),
        }
    }
}

impl From<ErrorPayload> for BridgeError {
    fn from(payload: ErrorPayload) -> Self {
        Self::new(payload.kind, payload.message)
    }
}

//! Message envelopes framing the bridge protocol.

use serde::{Deserialize, Serialize};

use crate::wire::{ClientPush, ServerRequest, ServerResponse};

/// A panel request with its correlation id.
///
/// Ids are allocated monotonically by the panel's session; the host echoes
/// the id on exactly one response. Requests are at-most-once; retry policy,
/// if any, belongs to the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Correlation id.
    pub id: u64,
    /// The invoked query function.
    pub request: ServerRequest,
}

/// Everything the host sends to a panel: correlated responses and
/// fire-and-forget pushes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelMessage {
    /// Response to the request with the same id.
    Response {
        /// Correlation id echoed from the request.
        id: u64,
        /// The function's return value or typed failure.
        response: ServerResponse,
    },
    /// Host-initiated push, unordered relative to responses.
    Push(ClientPush),
}

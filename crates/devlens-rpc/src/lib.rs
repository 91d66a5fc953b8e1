//! # devlens-rpc
//!
//! The RPC bridge between a DevLens host session and its tooling panels.
//! A typed duplex channel: panels invoke server-exposed query functions,
//! the host pushes coarse refresh events back. Requests are at-most-once,
//! correlated by envelope id; refresh pushes are best-effort and may be
//! coalesced.
//!
//! The transport carrying the bridge's bytes is an external collaborator;
//! this crate defines the transport traits plus an in-memory pair for
//! same-process panels and tests.

pub mod client;
pub mod envelope;
pub mod server;
pub mod session;
pub mod transport;
pub mod wire;

pub use client::PanelClient;
pub use server::BridgeServer;
pub use session::RpcSession;
pub use wire::{ClientPush, ServerRequest, ServerResponse};

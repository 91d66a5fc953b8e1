//! Transport seam and the in-memory duplex pair.
//!
//! The network transport carrying the bridge's bytes is assumed reliable,
//! ordered, and bidirectional, and is supplied externally. Same-process
//! panels and tests use the in-memory pair below.

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use devlens_core::error::BridgeError;
use devlens_core::result::BridgeResult;

use crate::envelope::{PanelMessage, RequestEnvelope};

/// Host side of a panel connection.
#[async_trait]
pub trait ServerTransport: Send + Sync {
    /// Sends a response or push to the panel.
    async fn send(&self, message: PanelMessage) -> BridgeResult<()>;

    /// Receives the next request envelope. `None` means the panel
    /// disconnected.
    async fn recv(&self) -> Option<RequestEnvelope>;
}

/// Panel side of a connection to the host.
#[async_trait]
pub trait PanelTransport: Send + Sync {
    /// Sends a request envelope to the host.
    async fn send(&self, envelope: RequestEnvelope) -> BridgeResult<()>;

    /// Receives the next host message. `None` means the host closed the
    /// connection.
    async fn recv(&self) -> Option<PanelMessage>;
}

/// In-memory host side.
#[derive(Debug)]
pub struct MemoryServerTransport {
    tx: mpsc::Sender<PanelMessage>,
    rx: Mutex<mpsc::Receiver<RequestEnvelope>>,
}

/// In-memory panel side.
#[derive(Debug)]
pub struct MemoryPanelTransport {
    tx: mpsc::Sender<RequestEnvelope>,
    rx: Mutex<mpsc::Receiver<PanelMessage>>,
}

/// Creates a connected in-memory transport pair.
pub fn memory_pair(buffer: usize) -> (MemoryServerTransport, MemoryPanelTransport) {
    let (to_panel_tx, to_panel_rx) = mpsc::channel(buffer);
    let (to_host_tx, to_host_rx) = mpsc::channel(buffer);

    (
        MemoryServerTransport {
            tx: to_panel_tx,
            rx: Mutex::new(to_host_rx),
        },
        MemoryPanelTransport {
            tx: to_host_tx,
            rx: Mutex::new(to_panel_rx),
        },
    )
}

#[async_trait]
impl ServerTransport for MemoryServerTransport {
    async fn send(&self, message: PanelMessage) -> BridgeResult<()> {
        self.tx
            .send(message)
            .await
            .map_err(|_| BridgeError::transport("panel disconnected"))
    }

    async fn recv(&self) -> Option<RequestEnvelope> {
        self.rx.lock().await.recv().await
    }
}

#[async_trait]
impl PanelTransport for MemoryPanelTransport {
    async fn send(&self, envelope: RequestEnvelope) -> BridgeResult<()> {
        self.tx
            .send(envelope)
            .await
            .map_err(|_| BridgeError::transport("host closed the connection"))
    }

    async fn recv(&self) -> Option<PanelMessage> {
        self.rx.lock().await.recv().await
    }
}

#[cfg(test)]
mod tests {
    use crate::wire::{ServerRequest, ServerResponse};

    use super::*;

    #[tokio::test]
    async fn memory_pair_carries_messages_both_ways() {
        let (server, panel) = memory_pair(8);

        panel
            .send(RequestEnvelope {
                id: 1,
                request: ServerRequest::GetVersions,
            })
            .await
            .unwrap();
        let envelope = server.recv().await.unwrap();
        assert_eq!(envelope.id, 1);

        server
            .send(PanelMessage::Response {
                id: 1,
                response: ServerResponse::TabActionResult(false),
            })
            .await
            .unwrap();
        assert!(matches!(
            panel.recv().await,
            Some(PanelMessage::Response { id: 1, .. })
        ));
    }

    #[tokio::test]
    async fn dropping_the_panel_side_closes_the_server_recv() {
        let (server, panel) = memory_pair(8);
        drop(panel);
        assert!(server.recv().await.is_none());
    }
}

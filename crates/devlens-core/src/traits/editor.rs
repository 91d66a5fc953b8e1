//! Editor-opening side-effect seam.

use async_trait::async_trait;

use crate::result::BridgeResult;

/// Opens a source file in the developer's editor.
///
/// The actual side effect (spawning an editor process, talking to an IDE
/// extension) is supplied by the embedding host.
#[async_trait]
pub trait EditorOpener: Send + Sync {
    /// Opens the given file path.
    async fn open(&self, filepath: &str) -> BridgeResult<()>;
}

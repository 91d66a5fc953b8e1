//! Default open-in-editor implementation.

use async_trait::async_trait;
use tracing::{info, warn};

use devlens_core::config::EditorConfig;
use devlens_core::error::BridgeError;
use devlens_core::result::BridgeResult;
use devlens_core::traits::EditorOpener;

/// Opens files by spawning the configured editor command, with `{file}`
/// substituted for the requested path.
#[derive(Debug)]
pub struct CommandEditorOpener {
    config: EditorConfig,
}

impl CommandEditorOpener {
    /// Creates an opener from the editor configuration.
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EditorOpener for CommandEditorOpener {
    async fn open(&self, filepath: &str) -> BridgeResult<()> {
        let rendered = self.config.command.replace("{file}", filepath);
        let mut parts = rendered.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| BridgeError::configuration("editor command is empty"))?;

        info!(file = %filepath, command = %rendered, "Opening file in editor");

        match tokio::process::Command::new(program).args(parts).spawn() {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!(file = %filepath, error = %err, "Editor command failed to spawn");
                Err(BridgeError::with_source(
                    devlens_core::error::ErrorKind::Internal,
                    format!("failed to spawn editor for '{filepath}'"),
                    err,
                ))
            }
        }
    }
}

//! Bridge configuration schema.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Config loading for the host application itself is out of
//! scope; this schema only covers the bridge's own tunables.

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Root DevLens configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (default.toml + environment overlay + `DEVLENS`-prefixed env vars).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevlensConfig {
    /// RPC bridge settings.
    #[serde(default)]
    pub bridge: BridgeConfig,
    /// Hook metrics recorder settings.
    #[serde(default)]
    pub hooks: HooksConfig,
    /// Open-in-editor settings.
    #[serde(default)]
    pub editor: EditorConfig,
}

impl Default for DevlensConfig {
    fn default() -> Self {
        Self {
            bridge: BridgeConfig::default(),
            hooks: HooksConfig::default(),
            editor: EditorConfig::default(),
        }
    }
}

/// RPC bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Buffer size for refresh broadcast channels. Refresh pushes are
    /// best-effort; a panel that lags past this buffer simply coalesces.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Buffer size for per-panel transport queues.
    #[serde(default = "default_transport_buffer")]
    pub transport_buffer_size: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            transport_buffer_size: default_transport_buffer(),
        }
    }
}

/// Hook metrics recorder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Optional ring-buffer cap on per-hook execution timestamps.
    ///
    /// Unset means unbounded (the default). When set, the recorder keeps
    /// the most recent `n` timestamps per hook and counts evictions in the
    /// record's `dropped` field so truncation is never silent.
    #[serde(default)]
    pub execution_cap: Option<usize>,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self { execution_cap: None }
    }
}

/// Open-in-editor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Command template used to open a file in the developer's editor.
    /// `{file}` is substituted with the requested path.
    #[serde(default = "default_editor_command")]
    pub command: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: default_editor_command(),
        }
    }
}

impl DevlensConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `DEVLENS_`.
    pub fn load(env: &str) -> Result<Self, BridgeError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("DEVLENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| BridgeError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| BridgeError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_channel_buffer() -> usize {
    64
}

fn default_transport_buffer() -> usize {
    256
}

fn default_editor_command() -> String {
    "code --goto {file}".to_string()
}

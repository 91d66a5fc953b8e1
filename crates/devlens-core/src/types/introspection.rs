//! Wire shapes for host introspection data.
//!
//! These are the return types of the server-exposed query functions. The
//! data itself is supplied by the host application's introspection
//! providers; the bridge only carries it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Snapshot of the host application's resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// The host's resolved build/runtime options, as an opaque document.
    pub options: serde_json::Value,
    /// The host's reactive app config key/value map.
    #[serde(default)]
    pub app_config: HashMap<String, serde_json::Value>,
}

/// One registered component in the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Pascal-case component name.
    pub name: String,
    /// Source file the component resolves to.
    pub file_path: String,
    /// Rendering mode (`all`, `client`, or `server`).
    #[serde(default = "default_component_mode")]
    pub mode: String,
    /// Whether the component is globally registered.
    #[serde(default)]
    pub global: bool,
}

fn default_component_mode() -> String {
    "all".to_string()
}

/// One server-known page/route of the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Route name, if named.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Route path pattern.
    pub path: String,
    /// Source file backing this route, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Nested child routes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PageInfo>,
}

/// One layout of the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    /// Layout name.
    pub name: String,
    /// Source file backing this layout.
    pub file: String,
}

/// One auto-discovered import binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoImport {
    /// Exported name in the source module.
    pub name: String,
    /// Module the binding is imported from.
    pub from: String,
    /// Alias the binding is exposed under, when it differs from `name`.
    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Aggregate metadata about the auto-import scanner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportsMetadata {
    /// Usage counts keyed by binding name.
    #[serde(default)]
    pub injection_usage: HashMap<String, u64>,
}

/// Auto-imports together with optional scanner metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoImportsWithMetadata {
    /// All auto-discovered bindings.
    pub imports: Vec<AutoImport>,
    /// Scanner metadata, when the host exposes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImportsMetadata>,
}

/// Version information about the host framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionsInfo {
    /// Host framework version string.
    pub host: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_import_alias_serializes_as_keyword() {
        let import = AutoImport {
            name: "useFetch".to_string(),
            from: "#app".to_string(),
            alias: Some("useMyFetch".to_string()),
        };
        let json = serde_json::to_value(&import).unwrap();
        assert_eq!(json["as"], "useMyFetch");
    }

    #[test]
    fn nested_pages_round_trip() {
        let page = PageInfo {
            name: Some("parent".to_string()),
            path: "/parent".to_string(),
            file: Some("pages/parent.vue".to_string()),
            children: vec![PageInfo {
                name: None,
                path: ":child".to_string(),
                file: None,
                children: Vec::new(),
            }],
        };
        let json = serde_json::to_string(&page).unwrap();
        let back: PageInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, page);
    }
}

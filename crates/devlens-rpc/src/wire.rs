//! Wire function sets of the bridge protocol.
//!
//! Two disjoint, closed sets: server-exposed query functions (panel to
//! host) and client-exposed push functions (host to panel). Each function
//! has a fixed name, ordered arguments, and a single return value or void.
//! This is the full protocol surface; no other message types exist.

use serde::{Deserialize, Serialize};

use devlens_core::error::ErrorPayload;
use devlens_core::types::{
    AutoImportsWithMetadata, ComponentInfo, ConfigSnapshot, HookInfo, LayoutInfo, PageInfo,
    RefreshEvent, VersionsInfo,
};
use devlens_tabs::TabInfo;

/// Server-exposed query functions, invoked by a panel.
///
/// All are read-only with respect to core state except `customTabAction`
/// and `openInEditor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fn", rename_all = "camelCase")]
pub enum ServerRequest {
    /// Fetch the host configuration snapshot.
    GetConfig,
    /// Fetch the host component table.
    GetComponents,
    /// Fetch auto-discovered import bindings.
    GetAutoImports,
    /// Fetch server-known pages/routes.
    GetServerPages,
    /// Fetch the iframe-view tabs.
    GetIframeTabs,
    /// Fetch the hook metrics snapshot.
    GetServerHooks,
    /// Fetch the host layouts.
    GetLayouts,
    /// Fetch host framework versions.
    GetVersions,
    /// Invoke action `action` of the named launch tab.
    CustomTabAction {
        /// Tab name.
        name: String,
        /// Zero-based action index.
        action: usize,
    },
    /// Open a source file in the developer's editor.
    OpenInEditor {
        /// Path of the file to open.
        filepath: String,
    },
}

/// Responses to server-exposed query functions, one variant per request.
///
/// Failures travel as the `Error` variant so a panel can always distinguish
/// "no data yet" from "query failed".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fn", content = "result", rename_all = "camelCase")]
pub enum ServerResponse {
    /// Host configuration snapshot.
    Config(ConfigSnapshot),
    /// Host component table.
    Components(Vec<ComponentInfo>),
    /// Auto-discovered import bindings.
    AutoImports(AutoImportsWithMetadata),
    /// Server-known pages/routes.
    ServerPages(Vec<PageInfo>),
    /// Iframe-view tabs.
    IframeTabs(Vec<TabInfo>),
    /// Hook metrics snapshot.
    ServerHooks(Vec<HookInfo>),
    /// Host layouts.
    Layouts(Vec<LayoutInfo>),
    /// Host framework versions.
    Versions(VersionsInfo),
    /// Whether a custom tab action was initiated.
    TabActionResult(bool),
    /// The editor-open side effect was dispatched.
    EditorOpened,
    /// The call failed with a typed bridge error.
    Error(ErrorPayload),
}

/// Client-exposed push functions, invoked by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fn", rename_all = "camelCase")]
pub enum ClientPush {
    /// Coarse invalidation: the panel should re-issue the query functions
    /// for the given category. Carries no data payload.
    Refresh {
        /// Category to re-fetch.
        event: RefreshEvent,
    },
}

#[cfg(test)]
mod tests {
    use devlens_tabs::TabView;

    use super::*;

    #[test]
    fn requests_serialize_under_their_wire_names() {
        let json = serde_json::to_value(&ServerRequest::GetServerHooks).unwrap();
        assert_eq!(json["fn"], "getServerHooks");

        let json = serde_json::to_value(&ServerRequest::CustomTabAction {
            name: "perf".to_string(),
            action: 1,
        })
        .unwrap();
        assert_eq!(json["fn"], "customTabAction");
        assert_eq!(json["action"], 1);
    }

    #[test]
    fn refresh_push_round_trips() {
        let push = ClientPush::Refresh {
            event: RefreshEvent::Components,
        };
        let json = serde_json::to_string(&push).unwrap();
        assert_eq!(json, r#"{"fn":"refresh","event":"components"}"#);
        let back: ClientPush = serde_json::from_str(&json).unwrap();
        assert_eq!(back, push);
    }

    #[test]
    fn every_response_shape_round_trips() {
        let responses = vec![
            ServerResponse::Config(ConfigSnapshot::default()),
            ServerResponse::Components(vec![ComponentInfo {
                name: "AppHeader".to_string(),
                file_path: "components/AppHeader.vue".to_string(),
                mode: "all".to_string(),
                global: true,
            }]),
            ServerResponse::AutoImports(AutoImportsWithMetadata::default()),
            ServerResponse::ServerPages(vec![PageInfo {
                name: Some("index".to_string()),
                path: "/".to_string(),
                file: Some("pages/index.vue".to_string()),
                children: Vec::new(),
            }]),
            ServerResponse::IframeTabs(vec![TabInfo {
                name: "perf".to_string(),
                title: "Performance".to_string(),
                icon: None,
                view: TabView::Iframe {
                    src: "/perf".to_string(),
                },
            }]),
            ServerResponse::ServerHooks(vec![HookInfo {
                name: "app:created".to_string(),
                start: 0,
                end: Some(40),
                duration: Some(40),
                listeners: 1,
                executions: vec![10, 20, 30],
                dropped: 0,
            }]),
            ServerResponse::Layouts(vec![LayoutInfo {
                name: "default".to_string(),
                file: "layouts/default.vue".to_string(),
            }]),
            ServerResponse::Versions(VersionsInfo {
                host: "3.0.0".to_string(),
            }),
            ServerResponse::TabActionResult(true),
            ServerResponse::EditorOpened,
        ];

        for response in responses {
            let json = serde_json::to_string(&response).unwrap();
            let back: ServerResponse = serde_json::from_str(&json).unwrap();
            assert_eq!(back, response);
        }
    }
}

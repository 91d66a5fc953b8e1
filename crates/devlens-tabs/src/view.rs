//! Tab and view type definitions.
//!
//! A registered tab carries live handler objects, so it is split from its
//! wire projection: [`ModuleTab`]/[`ModuleView`] are what modules register,
//! [`TabInfo`]/[`TabView`] are what goes to panels. The split keeps the
//! serializability check for `vnode` payloads at registration time, where
//! authoring errors surface immediately.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use devlens_core::error::BridgeError;
use devlens_core::result::BridgeResult;

/// Trait for launch-action and lazy-load handler implementations.
///
/// Handlers run as independent deferred operations on the host runtime.
/// No cancellation primitive is defined; timeout handling, if desired, is
/// the handler's own responsibility.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Runs the handler to completion.
    async fn run(&self) -> BridgeResult<()>;
}

struct FnActionHandler {
    f: Box<dyn Fn() -> BoxFuture<'static, BridgeResult<()>> + Send + Sync>,
}

#[async_trait]
impl ActionHandler for FnActionHandler {
    async fn run(&self) -> BridgeResult<()> {
        (self.f)().await
    }
}

/// Wraps an async closure as an [`ActionHandler`].
pub fn action_handler<F, Fut>(f: F) -> Arc<dyn ActionHandler>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = BridgeResult<()>> + Send + 'static,
{
    Arc::new(FnActionHandler {
        f: Box::new(move || Box::pin(f())),
    })
}

/// One action button of a `launch` view.
pub struct LaunchAction {
    /// Label of the action button.
    pub label: String,
    /// Additional display attributes for the action button.
    pub attrs: HashMap<String, String>,
    /// In-flight flag. Owned and mutated exclusively by the registry
    /// around handler invocation; shared so a spawned handler task can
    /// clear it on completion.
    pending: Arc<AtomicBool>,
    /// The deferred operation behind the button.
    handler: Arc<dyn ActionHandler>,
}

impl LaunchAction {
    /// Creates an action with the given label and handler.
    pub fn new(label: impl Into<String>, handler: Arc<dyn ActionHandler>) -> Self {
        Self {
            label: label.into(),
            attrs: HashMap::new(),
            pending: Arc::new(AtomicBool::new(false)),
            handler,
        }
    }

    /// Adds a display attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Whether the action's handler is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    pub(crate) fn pending_flag(&self) -> Arc<AtomicBool> {
        self.pending.clone()
    }

    pub(crate) fn adopt_pending(&mut self, other: &LaunchAction) {
        self.pending = Arc::clone(&other.pending);
    }

    pub(crate) fn handler(&self) -> Arc<dyn ActionHandler> {
        self.handler.clone()
    }
}

impl std::fmt::Debug for LaunchAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchAction")
            .field("label", &self.label)
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// A `launch` view: action buttons plus an optional lazy-load hook.
pub struct LaunchView {
    /// Optional view title.
    pub title: Option<String>,
    /// Optional view icon.
    pub icon: Option<String>,
    /// Description shown above the action buttons.
    pub description: String,
    /// Action buttons, invoked by index.
    pub actions: Vec<LaunchAction>,
    /// Lazy-load hook, run at most once per tab per host session when a
    /// panel first requests this tab.
    pub on_load: Option<Arc<dyn ActionHandler>>,
}

impl LaunchView {
    /// Creates a launch view with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            title: None,
            icon: None,
            description: description.into(),
            actions: Vec::new(),
            on_load: None,
        }
    }

    /// Adds an action button.
    pub fn with_action(mut self, action: LaunchAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Sets the lazy-load hook.
    pub fn with_on_load(mut self, handler: Arc<dyn ActionHandler>) -> Self {
        self.on_load = Some(handler);
        self
    }
}

impl std::fmt::Debug for LaunchView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchView")
            .field("description", &self.description)
            .field("actions", &self.actions)
            .finish()
    }
}

/// The registered form of a tab's main view. Closed union: consumers match
/// exhaustively, so adding a variant is a compile-time-visible change.
#[derive(Debug)]
pub enum ModuleView {
    /// Passive embedded frame; the registry stores only the URL.
    Iframe {
        /// URL of the iframe.
        src: String,
    },
    /// Active view with invokable actions.
    Launch(LaunchView),
    /// Passive, pre-serialized UI fragment.
    Vnode {
        /// Opaque serialized fragment.
        vnode: serde_json::Value,
    },
}

impl ModuleView {
    /// Creates an iframe view.
    pub fn iframe(src: impl Into<String>) -> Self {
        Self::Iframe { src: src.into() }
    }

    /// Creates a vnode view from any serializable fragment.
    ///
    /// Fails with `NotSerializable` when the payload cannot be serialized
    /// (live closures, non-finite floats, and so on), so authoring errors
    /// surface at registration rather than at query time.
    pub fn vnode<T: Serialize>(payload: &T) -> BridgeResult<Self> {
        let vnode = serde_json::to_value(payload).map_err(|e| {
            BridgeError::not_serializable(format!("vnode payload is not serializable: {e}"))
        })?;
        Ok(Self::Vnode { vnode })
    }
}

/// A module-contributed tab as registered with the registry.
#[derive(Debug)]
pub struct ModuleTab {
    /// Tab name, unique across all tabs in a host session.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Display icon (icon set name or image URL). Not interpreted here.
    pub icon: Option<String>,
    /// Main view of the tab.
    pub view: ModuleView,
}

impl ModuleTab {
    /// Creates a tab with the given name, title, and view.
    pub fn new(name: impl Into<String>, title: impl Into<String>, view: ModuleView) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            icon: None,
            view,
        }
    }

    /// Sets the display icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Projects the tab into its wire shape.
    pub fn to_info(&self) -> TabInfo {
        TabInfo {
            name: self.name.clone(),
            title: self.title.clone(),
            icon: self.icon.clone(),
            view: self.view_info(),
        }
    }

    fn view_info(&self) -> TabView {
        match &self.view {
            ModuleView::Iframe { src } => TabView::Iframe { src: src.clone() },
            ModuleView::Launch(launch) => TabView::Launch {
                title: launch.title.clone(),
                icon: launch.icon.clone(),
                description: launch.description.clone(),
                actions: launch
                    .actions
                    .iter()
                    .map(|action| TabActionInfo {
                        label: action.label.clone(),
                        attrs: action.attrs.clone(),
                        pending: action.is_pending(),
                    })
                    .collect(),
            },
            ModuleView::Vnode { vnode } => TabView::Vnode {
                vnode: vnode.clone(),
            },
        }
    }
}

/// Wire shape of a tab's view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TabView {
    /// Embedded frame.
    Iframe {
        /// URL of the iframe.
        src: String,
    },
    /// On-demand action launcher.
    Launch {
        /// Optional view title.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Optional view icon.
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        /// Description shown above the action buttons.
        description: String,
        /// Action buttons with their current pending state.
        actions: Vec<TabActionInfo>,
    },
    /// Serialized UI fragment.
    Vnode {
        /// Opaque serialized fragment.
        vnode: serde_json::Value,
    },
}

/// Wire shape of one launch action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabActionInfo {
    /// Button label.
    pub label: String,
    /// Additional display attributes.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attrs: HashMap<String, String>,
    /// Whether the action's handler is in flight.
    #[serde(default)]
    pub pending: bool,
}

/// Wire shape of a registered tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabInfo {
    /// Tab name, unique across all tabs.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Display icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Main view of the tab.
    pub view: TabView,
}

#[cfg(test)]
mod tests {
    use serde::Serializer;

    use super::*;

    #[test]
    fn iframe_view_serializes_with_type_tag() {
        let tab = ModuleTab::new("perf", "Performance", ModuleView::iframe("/perf"));
        let json = serde_json::to_value(tab.to_info()).unwrap();
        assert_eq!(json["view"]["type"], "iframe");
        assert_eq!(json["view"]["src"], "/perf");
    }

    #[test]
    fn vnode_constructor_accepts_plain_data() {
        let view = ModuleView::vnode(&serde_json::json!({"tag": "div", "children": []})).unwrap();
        match view {
            ModuleView::Vnode { vnode } => assert_eq!(vnode["tag"], "div"),
            _ => panic!("expected vnode view"),
        }
    }

    #[test]
    fn vnode_constructor_rejects_unserializable_payloads() {
        struct Closure;
        impl Serialize for Closure {
            fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("function reference"))
            }
        }

        let err = ModuleView::vnode(&Closure).unwrap_err();
        assert_eq!(err.kind, devlens_core::error::ErrorKind::NotSerializable);
    }

    #[test]
    fn launch_wire_shape_round_trips() {
        let view = TabView::Launch {
            title: None,
            icon: None,
            description: "Start the profiler".to_string(),
            actions: vec![TabActionInfo {
                label: "Start".to_string(),
                attrs: HashMap::new(),
                pending: false,
            }],
        };
        let json = serde_json::to_string(&view).unwrap();
        let back: TabView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }
}

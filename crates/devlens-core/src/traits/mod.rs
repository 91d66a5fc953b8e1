//! Trait seams for the out-of-scope host collaborators.

pub mod editor;
pub mod introspection;

pub use editor::EditorOpener;
pub use introspection::HostIntrospection;

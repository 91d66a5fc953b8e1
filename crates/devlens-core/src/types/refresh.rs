//! Coarse invalidation events pushed from host to panels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A payload-less invalidation signal telling the panel which query
/// category to re-fetch. Carries no sequence number; multiple refreshes of
/// the same event before the panel re-queries collapse to one re-query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefreshEvent {
    /// Custom tab registrations or action state changed.
    CustomTabs,
    /// The host component table changed.
    Components,
    /// The auto-import table changed.
    Imports,
}

impl fmt::Display for RefreshEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomTabs => write!(f, "customTabs"),
            Self::Components => write!(f, "components"),
            Self::Imports => write!(f, "imports"),
        }
    }
}

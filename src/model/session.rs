use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Checklist status of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    None,
    Requested,
    Received,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::None => write!(f, "none"),
            ItemStatus::Requested => write!(f, "requested"),
            ItemStatus::Received => write!(f, "received"),
        }
    }
}

/// Transient builder state for the active template. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Item label -> status. Items with no entry are `none`.
    pub status: IndexMap<String, ItemStatus>,
    /// Item label -> free-text detail, kept only while `received`
    pub details: IndexMap<String, String>,
    /// Selected outcome labels in selection order
    pub selected: IndexSet<String>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn status_of(&self, label: &str) -> ItemStatus {
        self.status.get(label).copied().unwrap_or_default()
    }

    pub fn detail_of(&self, label: &str) -> Option<&str> {
        self.details.get(label).map(String::as_str)
    }

    pub fn is_selected(&self, outcome: &str) -> bool {
        self.selected.contains(outcome)
    }
}

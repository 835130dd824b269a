use serde::Serialize;

use crate::models::UserId;
use crate::selection::SelectionSet;

/// Bulk-remove confirmation is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemoval {
    requested: usize,
}

impl PendingRemoval {
    pub(crate) fn open(selection: &SelectionSet) -> Self {
        Self {
            requested: selection.len(),
        }
    }

    /// Size of the selection when the confirmation was requested
    pub fn requested(&self) -> usize {
        self.requested
    }
}

/// What the confirmation dialog is asked to show.
///
/// Ids are only listed when more than one item is affected; a single item
/// relies on the surrounding context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovePrompt {
    pub endpoint: String,
    pub item_ids: Vec<UserId>,
}

impl RemovePrompt {
    pub fn for_selection(endpoint: &str, selection: &SelectionSet) -> Self {
        let item_ids = if selection.len() > 1 {
            selection.ids().to_vec()
        } else {
            Vec::new()
        };
        Self {
            endpoint: endpoint.to_string(),
            item_ids,
        }
    }

    pub fn single(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            item_ids: Vec::new(),
        }
    }

    pub fn is_multiple(&self) -> bool {
        !self.item_ids.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BulkRemoveOutcome {
    /// No confirmation was open
    NotOpen,
    Cancelled,
    Removed { ids: Vec<UserId> },
}

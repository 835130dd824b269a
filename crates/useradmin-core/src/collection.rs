use tracing::info;

use crate::error::Result;
use crate::models::UserId;
use crate::traits::{UserStore, USERS_ENDPOINT};

/// Generic per-row edit/delete affordance for one collection endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionActions {
    endpoint: String,
    edit_path: String,
}

impl CollectionActions {
    pub fn new(endpoint: impl Into<String>, edit_path: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            edit_path: edit_path.into(),
        }
    }

    pub fn users() -> Self {
        Self::new(USERS_ENDPOINT, "/settings/user")
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Route of the edit form for an existing item
    pub fn edit_path(&self, id: UserId) -> String {
        format!("{}/{}", self.edit_path, id)
    }

    /// Route of the create form
    pub fn create_path(&self) -> &str {
        &self.edit_path
    }

    /// Delete one item, then run `on_removed` (the owner's refresh hook).
    /// The hook does not run when the delete fails.
    pub fn remove<F>(&self, store: &dyn UserStore, id: UserId, on_removed: F) -> Result<()>
    where
        F: FnOnce(),
    {
        store.delete_item(&self.endpoint, id)?;
        info!(endpoint = %self.endpoint, %id, "item removed");
        on_removed();
        Ok(())
    }
}

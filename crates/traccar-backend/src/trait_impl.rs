//! UserStore trait implementation for TraccarClient

use crate::client::TraccarClient;
use useradmin_core::{AdminError, Result, User, UserId, UserStore};

impl UserStore for TraccarClient {
    fn list_users(&self, exclude_attributes: bool) -> Result<Vec<User>> {
        let users = self
            .list_users(exclude_attributes)
            .map_err(AdminError::from)?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    fn delete_item(&self, endpoint: &str, id: UserId) -> Result<()> {
        self.delete_item(endpoint, id.get())
            .map_err(AdminError::from)
    }

    fn assume_session(&self, id: UserId) -> Result<User> {
        self.assume_session(id.get())
            .map(Into::into)
            .map_err(AdminError::from)
    }

    fn current_session(&self) -> Result<User> {
        self.get_session()
            .map(Into::into)
            .map_err(AdminError::from)
    }

    fn app_url(&self, path: &str) -> Option<String> {
        Some(format!("{}{}", self.base_url(), path))
    }
}

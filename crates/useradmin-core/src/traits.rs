use crate::error::Result;
use crate::models::{User, UserId};

/// Endpoint name of the user collection on the backing store
pub const USERS_ENDPOINT: &str = "users";

/// Backing store for user accounts
///
/// Every backend (the HTTP server, the fixture-backed mock) implements this trait.
/// Calls block until the store answers; the view decides when to make them.
pub trait UserStore: Send + Sync {
    /// List all users. With `exclude_attributes` the store may omit the free-form
    /// attribute map to keep the payload small.
    fn list_users(&self, exclude_attributes: bool) -> Result<Vec<User>>;

    /// Delete one item of a collection endpoint (e.g. `users`)
    fn delete_item(&self, endpoint: &str, id: UserId) -> Result<()>;

    /// Delete a user account
    fn delete_user(&self, id: UserId) -> Result<()> {
        self.delete_item(USERS_ENDPOINT, id)
    }

    /// Take over the session of another user. Returns the user now logged in.
    fn assume_session(&self, id: UserId) -> Result<User>;

    /// The operator's own account for the current session
    fn current_session(&self) -> Result<User>;

    /// Absolute URL for an application route, when the store knows its origin
    fn app_url(&self, path: &str) -> Option<String> {
        let _ = path;
        None
    }
}

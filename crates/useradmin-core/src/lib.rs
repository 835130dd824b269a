pub mod actions;
pub mod collection;
pub mod error;
pub mod filter;
pub mod format;
pub mod i18n;
pub mod loader;
pub mod models;
pub mod remove;
pub mod selection;
pub mod table;
pub mod traits;
pub mod view;

#[cfg(test)]
mod test_support;

pub use actions::{authorized_actions, OperatorPrivilege, RowAction, RowActionKind};
pub use collection::CollectionActions;
pub use error::{AdminError, Result, ViewError};
pub use filter::{matches_keyword, visible, Filters};
pub use i18n::Translations;
pub use loader::{CollectionLoader, LoadOutcome, LoadTicket, Revision};
pub use models::*;
pub use remove::{BulkRemoveOutcome, PendingRemoval, RemovePrompt};
pub use selection::SelectionSet;
pub use table::{TableBody, UserRow, UsersTable};
pub use traits::{UserStore, USERS_ENDPOINT};
pub use view::UsersView;

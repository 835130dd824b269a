//! Secondary per-row actions and who may use them.

use serde::Serialize;
use tracing::info;

use crate::error::ViewError;
use crate::i18n::Translations;
use crate::models::{ActionOutcome, User, UserId};
use crate::traits::UserStore;

/// Route the client is sent to after taking over another session
pub const APP_ROOT: &str = "/";

/// What the operator is allowed to do, looked up once per session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OperatorPrivilege {
    manager: bool,
}

impl OperatorPrivilege {
    pub fn new(manager: bool) -> Self {
        Self { manager }
    }

    pub fn from_session(operator: &User) -> Self {
        Self::new(operator.is_manager())
    }

    pub fn is_manager(self) -> bool {
        self.manager
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowActionKind {
    /// Log in as the target user
    Login,
    /// Show the target user's linked connections
    Connections,
}

impl RowActionKind {
    pub fn key(self) -> &'static str {
        match self {
            RowActionKind::Login => "login",
            RowActionKind::Connections => "connections",
        }
    }

    fn title_key(self) -> &'static str {
        match self {
            RowActionKind::Login => "loginLogin",
            RowActionKind::Connections => "sharedConnections",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            RowActionKind::Login => "login",
            RowActionKind::Connections => "link",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "login" => Some(RowActionKind::Login),
            "connections" => Some(RowActionKind::Connections),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAction {
    pub key: &'static str,
    pub title: String,
    pub icon: &'static str,
    #[serde(skip)]
    pub kind: RowActionKind,
}

impl RowAction {
    pub fn new(kind: RowActionKind, t: &Translations) -> Self {
        Self {
            key: kind.key(),
            title: t.get(kind.title_key()).to_string(),
            icon: kind.icon(),
            kind,
        }
    }

    /// Run the action for one user.
    ///
    /// A rejected login returns an error and no outcome, so the caller never
    /// navigates on failure.
    pub fn handle(&self, store: &dyn UserStore, id: UserId) -> Result<ActionOutcome, ViewError> {
        match self.kind {
            RowActionKind::Login => {
                let user = store
                    .assume_session(id)
                    .map_err(|source| ViewError::Login { id, source })?;
                info!(user = %user.id, "session switched");
                Ok(ActionOutcome::Reload {
                    path: APP_ROOT.to_string(),
                })
            }
            RowActionKind::Connections => Ok(ActionOutcome::Navigate {
                path: connections_path(id),
            }),
        }
    }
}

pub fn connections_path(id: UserId) -> String {
    format!("/settings/user/{id}/connections")
}

/// Row actions offered to this operator, in display order
pub fn authorized_actions(privilege: OperatorPrivilege, t: &Translations) -> Vec<RowAction> {
    let kinds: &[RowActionKind] = if privilege.is_manager() {
        &[RowActionKind::Login, RowActionKind::Connections]
    } else {
        &[RowActionKind::Connections]
    };
    kinds.iter().map(|kind| RowAction::new(*kind, t)).collect()
}

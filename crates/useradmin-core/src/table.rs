//! Table model handed to whatever renders the list.

use serde::Serialize;

use crate::actions::RowAction;
use crate::format::{format_bool, format_date};
use crate::i18n::Translations;
use crate::models::{User, UserId};

/// Data columns plus the selection column; the action column comes on top
pub const COLUMN_COUNT: usize = 7;

const HEADER_KEYS: [&str; 5] = [
    "sharedName",
    "userEmail",
    "userAdmin",
    "sharedDisabled",
    "userExpirationTime",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub id: UserId,
    pub selected: bool,
    pub name: String,
    pub email: String,
    pub administrator: String,
    pub disabled: String,
    pub expiration_time: String,
    pub actions: Vec<RowAction>,
}

impl UserRow {
    pub fn new(user: &User, selected: bool, actions: Vec<RowAction>, t: &Translations) -> Self {
        Self {
            id: user.id,
            selected,
            name: user.name.clone(),
            email: user.email.clone(),
            administrator: format_bool(user.administrator, t),
            disabled: format_bool(user.disabled, t),
            expiration_time: format_date(user.expiration_time),
            actions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TableBody {
    /// Placeholder shown while a fetch is in flight
    Loading { columns: usize, end_action: bool },
    Rows { rows: Vec<UserRow> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsersTable {
    /// Column titles after the selection column
    pub headers: Vec<String>,
    /// "Remove selected" trigger is enabled
    pub remove_enabled: bool,
    pub remove_title: String,
    pub body: TableBody,
    /// Footer switch state and label
    pub include_temporary: bool,
    pub temporary_label: String,
}

impl UsersTable {
    pub fn headers(t: &Translations) -> Vec<String> {
        HEADER_KEYS.iter().map(|k| t.get(k).to_string()).collect()
    }

    pub fn rows(&self) -> &[UserRow] {
        match &self.body {
            TableBody::Rows { rows } => rows,
            TableBody::Loading { .. } => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.body, TableBody::Loading { .. })
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// User account as seen by the administration view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Login name, when it differs from the email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub administrator: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub readonly: bool,
    /// Short-lived account, hidden from the list by default
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub expiration_time: Option<DateTime<Utc>>,
    /// Number of users this account may manage (non-zero means manager)
    #[serde(default)]
    pub user_limit: i32,
    #[serde(default = "default_device_limit")]
    pub device_limit: i32,
}

fn default_device_limit() -> i32 {
    -1
}

impl User {
    /// Minimal user with the given identity; every flag is off
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            login: None,
            phone: None,
            administrator: false,
            disabled: false,
            readonly: false,
            temporary: false,
            expiration_time: None,
            user_limit: 0,
            device_limit: default_device_limit(),
        }
    }

    pub fn with_temporary(mut self, temporary: bool) -> Self {
        self.temporary = temporary;
        self
    }

    pub fn with_administrator(mut self, administrator: bool) -> Self {
        self.administrator = administrator;
        self
    }

    pub fn with_expiration(mut self, expiration_time: Option<DateTime<Utc>>) -> Self {
        self.expiration_time = expiration_time;
        self
    }

    /// Whether this account may manage other users
    pub fn is_manager(&self) -> bool {
        self.administrator || self.user_limit != 0
    }
}

/// Where the client should go after a row action succeeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// Full client reload at the given path (session changed underneath us)
    Reload { path: String },
    /// In-app navigation to the given route
    Navigate { path: String },
}

impl ActionOutcome {
    pub fn path(&self) -> &str {
        match self {
            ActionOutcome::Reload { path } | ActionOutcome::Navigate { path } => path,
        }
    }
}

//! Traccar REST API models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User record as returned by `/api/users` and `/api/session`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub administrator: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub expiration_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub device_limit: Option<i32>,
    #[serde(default)]
    pub user_limit: Option<i32>,
    /// Free-form attributes; empty when listed with `excludeAttributes=true`
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

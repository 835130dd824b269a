//! Conversion functions between Traccar API models and useradmin-core models

use crate::models::ApiUser;
use useradmin_core::models as core;

impl From<ApiUser> for core::User {
    fn from(user: ApiUser) -> Self {
        Self {
            id: core::UserId(user.id),
            name: user.name,
            email: user.email,
            // The server mirrors email into login when none was set
            login: user.login.filter(|l| !l.is_empty()),
            phone: user.phone.filter(|p| !p.is_empty()),
            administrator: user.administrator,
            disabled: user.disabled,
            readonly: user.readonly,
            temporary: user.temporary,
            expiration_time: user.expiration_time,
            user_limit: user.user_limit.unwrap_or(0),
            device_limit: user.device_limit.unwrap_or(-1),
        }
    }
}

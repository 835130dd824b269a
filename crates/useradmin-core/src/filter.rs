//! Derives the visible rows from the loaded collection.
//!
//! Everything here is pure: filters can change any number of times between
//! fetches and the result only depends on the arguments.

use serde::Serialize;

use crate::models::User;

/// Search keyword plus the temporary-account toggle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub keyword: String,
    pub include_temporary: bool,
}

impl Filters {
    pub fn visible<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        visible(users, &self.keyword, self.include_temporary)
    }
}

/// Case-insensitive substring match against the user's textual fields.
///
/// A blank keyword matches everyone.
pub fn matches_keyword(user: &User, keyword: &str) -> bool {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let contains = |field: &str| field.to_lowercase().contains(&needle);

    contains(&user.name)
        || contains(&user.email)
        || user.login.as_deref().is_some_and(contains)
        || user.phone.as_deref().is_some_and(contains)
        || user.id.to_string().contains(&needle)
}

/// Users to show, in collection order
pub fn visible<'a>(users: &'a [User], keyword: &str, include_temporary: bool) -> Vec<&'a User> {
    users
        .iter()
        .filter(|u| include_temporary || !u.temporary)
        .filter(|u| matches_keyword(u, keyword))
        .collect()
}

//! Localized string lookup.
//!
//! Keys follow the web client's translation keys so label overrides from a
//! config file can be copied across unchanged.

use std::collections::HashMap;

const DEFAULT_STRINGS: &[(&str, &str)] = &[
    ("loginLogin", "Login"),
    ("sharedConnections", "Connections"),
    ("sharedRemove", "Remove"),
    ("sharedName", "Name"),
    ("userEmail", "Email"),
    ("userAdmin", "Admin"),
    ("sharedDisabled", "Disabled"),
    ("userExpirationTime", "Expiration"),
    ("userTemporary", "Temporary"),
    ("sharedYes", "Yes"),
    ("sharedNo", "No"),
    ("sharedEdit", "Edit"),
    ("sharedLoading", "Loading..."),
    ("sharedRemoveConfirm", "Remove item?"),
    ("sharedRemoveConfirmMultiple", "Remove items?"),
];

#[derive(Debug, Clone)]
pub struct Translations {
    strings: HashMap<String, String>,
}

impl Default for Translations {
    fn default() -> Self {
        Self {
            strings: DEFAULT_STRINGS
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }
}

impl Translations {
    /// Default strings with the given overrides applied on top
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut translations = Self::default();
        for (key, value) in overrides {
            translations.strings.insert(key.into(), value.into());
        }
        translations
    }

    /// Look up a key; unknown keys come back verbatim
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }
}

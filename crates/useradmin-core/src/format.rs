use chrono::{DateTime, Local, TimeZone, Utc};

use crate::i18n::Translations;

pub fn format_bool(value: bool, t: &Translations) -> String {
    let key = if value { "sharedYes" } else { "sharedNo" };
    t.get(key).to_string()
}

/// Date-only rendering in the operator's local time zone; an absent value
/// renders blank
pub fn format_date(value: Option<DateTime<Utc>>) -> String {
    format_date_in(value, &Local)
}

pub fn format_date_in<Tz>(value: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    value
        .map(|d| d.with_timezone(tz).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

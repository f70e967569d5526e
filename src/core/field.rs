//! Field values read from records through typed accessors

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::borrow::Cow;
use std::cmp::Ordering;

/// A value borrowed out of a record by a [`SearchField`](crate::core::record::SearchField)
/// accessor.
///
/// `Absent` stands for a missing/optional field and never matches a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    List(&'a [String]),
    Absent,
}

impl<'a> FieldValue<'a> {
    /// Get the value as a string slice if it is text
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if the value is absent
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Stringified form used by single-column search and by sorting.
    ///
    /// Dates render as zero-padded `YYYY-MM-DD` and timestamps as RFC 3339
    /// in UTC, so text order is chronological. List elements are joined
    /// with `", "`. Absent values render as the empty string.
    pub fn render(&self) -> Cow<'a, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Integer(i) => Cow::Owned(i.to_string()),
            FieldValue::Float(f) => Cow::Owned(f.to_string()),
            FieldValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            FieldValue::Timestamp(t) => Cow::Owned(t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            FieldValue::List(items) => Cow::Owned(items.join(", ")),
            FieldValue::Absent => Cow::Borrowed(""),
        }
    }

    /// Case-insensitive substring test against an already lowercased needle.
    ///
    /// List values match when any single element contains the needle.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            FieldValue::Absent => false,
            FieldValue::List(items) => items
                .iter()
                .any(|item| item.to_lowercase().contains(needle)),
            other => other.render().to_lowercase().contains(needle),
        }
    }
}

/// Locale-style text comparison.
///
/// Letters compare without regard to case first, so `"alpha"` sorts before
/// `"Beta"`. Strings differing only in case put the lowercase form first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| b.cmp(a))
}

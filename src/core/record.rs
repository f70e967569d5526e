//! Record traits defining what the list engine can search and sort

use crate::core::field::FieldValue;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Typed accessor for one field of a record type.
pub enum FieldAccess<T> {
    Text(fn(&T) -> Option<&str>),
    Integer(fn(&T) -> Option<i64>),
    Float(fn(&T) -> Option<f64>),
    Date(fn(&T) -> Option<NaiveDate>),
    Timestamp(fn(&T) -> Option<DateTime<Utc>>),
    List(fn(&T) -> &[String]),
}

impl<T> FieldAccess<T> {
    fn read<'a>(&self, record: &'a T) -> FieldValue<'a> {
        match self {
            FieldAccess::Text(get) => get(record).map_or(FieldValue::Absent, FieldValue::Text),
            FieldAccess::Integer(get) => {
                get(record).map_or(FieldValue::Absent, FieldValue::Integer)
            }
            FieldAccess::Float(get) => get(record).map_or(FieldValue::Absent, FieldValue::Float),
            FieldAccess::Date(get) => get(record).map_or(FieldValue::Absent, FieldValue::Date),
            FieldAccess::Timestamp(get) => {
                get(record).map_or(FieldValue::Absent, FieldValue::Timestamp)
            }
            FieldAccess::List(get) => FieldValue::List(get(record)),
        }
    }
}

/// A named, searchable field of a record type.
///
/// Fields flagged `in_all` make up the fixed set checked when the column
/// selector is [`Column::All`](crate::core::query::Column::All). Every field
/// can still be searched on its own by name.
pub struct SearchField<T> {
    pub name: &'static str,
    pub access: FieldAccess<T>,
    pub in_all: bool,
}

impl<T> SearchField<T> {
    pub const fn text(name: &'static str, get: fn(&T) -> Option<&str>) -> Self {
        Self {
            name,
            access: FieldAccess::Text(get),
            in_all: true,
        }
    }

    pub const fn integer(name: &'static str, get: fn(&T) -> Option<i64>) -> Self {
        Self {
            name,
            access: FieldAccess::Integer(get),
            in_all: false,
        }
    }

    pub const fn float(name: &'static str, get: fn(&T) -> Option<f64>) -> Self {
        Self {
            name,
            access: FieldAccess::Float(get),
            in_all: false,
        }
    }

    pub const fn date(name: &'static str, get: fn(&T) -> Option<NaiveDate>) -> Self {
        Self {
            name,
            access: FieldAccess::Date(get),
            in_all: false,
        }
    }

    pub const fn timestamp(name: &'static str, get: fn(&T) -> Option<DateTime<Utc>>) -> Self {
        Self {
            name,
            access: FieldAccess::Timestamp(get),
            in_all: false,
        }
    }

    pub const fn list(name: &'static str, get: fn(&T) -> &[String]) -> Self {
        Self {
            name,
            access: FieldAccess::List(get),
            in_all: true,
        }
    }

    /// A text field searched only when selected by name
    pub const fn text_column(name: &'static str, get: fn(&T) -> Option<&str>) -> Self {
        Self {
            name,
            access: FieldAccess::Text(get),
            in_all: false,
        }
    }

    /// A list field searched only when selected by name
    pub const fn list_column(name: &'static str, get: fn(&T) -> &[String]) -> Self {
        Self {
            name,
            access: FieldAccess::List(get),
            in_all: false,
        }
    }

    /// Read this field from a record
    pub fn read<'a>(&self, record: &'a T) -> FieldValue<'a> {
        self.access.read(record)
    }
}

/// Base trait for every record listed by the portal.
///
/// A record type declares its collection name, its key, and a static table
/// of searchable fields. Lookups by column name go through that table, so a
/// misspelled column is simply a field that does not exist.
pub trait Record: Clone + Send + Sync + 'static {
    /// The collection name used in URLs (e.g., "papers", "board-posts")
    fn resource_name() -> &'static str;

    /// The application key of this record
    fn key(&self) -> Uuid;

    /// Every field that can be searched or sorted on
    fn search_fields() -> &'static [SearchField<Self>];

    /// The one field list screens sort this collection by
    fn sort_field() -> &'static str;

    /// Category used by category selectors, if the collection has one
    fn category(&self) -> Option<&str> {
        None
    }

    /// Member who owns this record, if ownership applies
    fn owner_id(&self) -> Option<Uuid> {
        None
    }

    /// Look up a field definition by its identifier
    fn search_field(name: &str) -> Option<&'static SearchField<Self>> {
        Self::search_fields().iter().find(|field| field.name == name)
    }

    /// Read a field by identifier; unknown identifiers read as absent
    fn field_value(&self, name: &str) -> FieldValue<'_> {
        Self::search_field(name).map_or(FieldValue::Absent, |field| field.read(self))
    }

    /// Identifiers of the fields searched under the "all" selector
    fn all_column_names() -> Vec<&'static str> {
        Self::search_fields()
            .iter()
            .filter(|field| field.in_all)
            .map(|field| field.name)
            .collect()
    }
}

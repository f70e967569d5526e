//! Query state, list parameters and pagination envelopes

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Wire value of the "search every column" selector
pub const ALL_COLUMNS: &str = "all";

/// Column selector for free-text search
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Column {
    /// Search the record type's fixed set of "all" fields
    #[default]
    All,
    /// Search one named field only
    Named(String),
}

impl Column {
    /// Parse a selector; `"all"` and the empty string mean [`Column::All`]
    pub fn parse(value: &str) -> Self {
        match value {
            "" | ALL_COLUMNS => Column::All,
            name => Column::Named(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Column::All => ALL_COLUMNS,
            Column::Named(name) => name,
        }
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Column::parse(&raw))
    }
}

/// Sort direction for the collection's fixed sort field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// The user-editable query state of one list view.
///
/// Created empty when a list is opened, mutated on every keystroke or
/// selection change, and put back to defaults by [`ListQuery::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListQuery {
    /// Free-text search string
    #[serde(default)]
    pub text: String,

    /// Column selector
    #[serde(default)]
    pub column: Column,

    /// Sort direction
    #[serde(default)]
    pub direction: SortDirection,
}

impl ListQuery {
    pub fn new(text: impl Into<String>, column: Column, direction: SortDirection) -> Self {
        Self {
            text: text.into(),
            column,
            direction,
        }
    }

    /// Convenience constructor searching every column
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Restore the mount-time defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Query-string parameters accepted by list endpoints
///
/// # Example
/// ```text
/// GET /papers?page=0&size=10
/// GET /papers?q=graph&column=all&order=desc
/// GET /board-posts?q=seminar&column=title&category=notice
/// ```
///
/// `page` is 0-based on the wire.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ListParams {
    /// Page index (starts at 0)
    pub page: usize,

    /// Number of items per page; `None` uses the configured default
    pub size: Option<usize>,

    /// Free-text search
    pub q: Option<String>,

    /// Column selector (`all` or a field name)
    pub column: Option<String>,

    /// Sort direction (`asc` or `desc`)
    pub order: Option<String>,

    /// Exact category filter
    pub category: Option<String>,
}

impl ListParams {
    /// Page size clamped to `[1, max]`, falling back to `default`
    pub fn size(&self, default: usize, max: usize) -> usize {
        self.size.unwrap_or(default).clamp(1, max.max(1))
    }

    /// Build the query state, using `fallback` for a missing or unknown order
    pub fn list_query(&self, fallback: SortDirection) -> ListQuery {
        let direction = self
            .order
            .as_deref()
            .and_then(|order| order.parse().ok())
            .unwrap_or(fallback);

        ListQuery {
            text: self.q.clone().unwrap_or_default(),
            column: self.column.as_deref().map(Column::parse).unwrap_or_default(),
            direction,
        }
    }

    /// Category filter, ignoring blank values
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// Paginated response structure
///
/// Wraps one page of records with metadata about the pagination state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The records of this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page index (starts at 0)
    pub page: usize,

    /// Number of items per page
    pub size: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata for a 0-based page index
    pub fn new(page: usize, size: usize, total: usize) -> Self {
        // Ensure size is at least 1 to avoid division by zero
        let size = size.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(size) };
        let start = page.saturating_mul(size);

        Self {
            page,
            size,
            total,
            total_pages,
            has_next: start.saturating_add(size) < total,
            has_prev: page > 0,
        }
    }

    /// Metadata for an empty collection
    pub fn empty(size: usize) -> Self {
        Self::new(0, size, 0)
    }
}

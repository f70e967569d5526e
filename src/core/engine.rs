//! The list filter/sort engine shared by every collection
//!
//! Every list in the portal goes through the same three steps over an
//! already-fetched, read-only snapshot of records:
//!
//! 1. [`filter`] by a free-text query and a column selector
//! 2. [`sort`] by the collection's fixed sort field
//! 3. [`paginate`] into a display slice (or [`ListView::apply`] into a
//!    [`PageResponse`] when serving a page to a remote caller)
//!
//! None of these steps can fail: unknown columns match nothing, missing
//! values sort as the empty string, and out-of-range pages are empty.

use crate::core::field::locale_cmp;
use crate::core::query::{Column, ListQuery, PageResponse, PaginationMeta, SortDirection};
use crate::core::record::Record;

/// Keep the records matching `query` under the given column selector.
///
/// An empty query hands back `records` unchanged. Otherwise the match is a
/// case-insensitive substring test and relative order is preserved.
pub fn filter<T: Record>(records: Vec<T>, query: &str, column: &Column) -> Vec<T> {
    if query.is_empty() {
        return records;
    }

    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches(record, &needle, column))
        .collect()
}

/// Test one record against an already lowercased needle
pub fn matches<T: Record>(record: &T, needle: &str, column: &Column) -> bool {
    match column {
        Column::All => T::search_fields()
            .iter()
            .filter(|field| field.in_all)
            .any(|field| field.read(record).contains_lowercase(needle)),
        Column::Named(name) => T::search_field(name)
            .is_some_and(|field| field.read(record).contains_lowercase(needle)),
    }
}

/// Stable sort by the collection's fixed sort field
pub fn sort<T: Record>(records: Vec<T>, direction: SortDirection) -> Vec<T> {
    sort_by(records, direction, T::sort_field())
}

/// Stable sort by any declared field.
///
/// Values compare as text under [`locale_cmp`]; missing values compare as
/// the empty string. An undeclared field leaves the order untouched.
pub fn sort_by<T: Record>(mut records: Vec<T>, direction: SortDirection, field: &str) -> Vec<T> {
    let Some(field) = T::search_field(field) else {
        return records;
    };

    records.sort_by(|a, b| {
        let ordering = locale_cmp(&field.read(a).render(), &field.read(b).render());
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    records
}

/// Client-side display slice for a 1-based page.
///
/// Returns `records[(page-1)*size .. page*size]` clamped to the bounds of
/// `records`. Page 0, size 0 and pages past the end yield an empty slice.
pub fn paginate<T>(records: &[T], page: usize, size: usize) -> &[T] {
    if page == 0 || size == 0 {
        return &[];
    }

    let start = (page - 1).saturating_mul(size);
    if start >= records.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(records.len());
    &records[start..end]
}

/// Number of 1-based pages needed to show `total` records
pub fn page_count(total: usize, size: usize) -> usize {
    if size == 0 { 0 } else { total.div_ceil(size) }
}

/// 1-based page cursor of a client-side paginated list.
///
/// Changing the page size always returns to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: usize,
    size: usize,
}

impl PageCursor {
    pub fn new(size: usize) -> Self {
        Self { page: 1, size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Move to a page; values below 1 snap to the first page
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Change the page size and go back to page 1
    pub fn set_page_size(&mut self, size: usize) {
        self.size = size;
        self.page = 1;
    }

    /// Go back to page 1, keeping the size
    pub fn rewind(&mut self) {
        self.page = 1;
    }

    /// Slice of `records` visible at this cursor
    pub fn slice<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        paginate(records, self.page, self.size)
    }
}

/// Composed filter → sort → page pipeline used by list endpoints
pub struct ListView;

impl ListView {
    /// Produce one server-side page (0-based `page`) of the filtered and
    /// sorted records. An optional exact `category` is applied first.
    pub fn apply<T: Record>(
        records: Vec<T>,
        query: &ListQuery,
        category: Option<&str>,
        page: usize,
        size: usize,
    ) -> PageResponse<T> {
        let records = match category {
            Some(category) => records
                .into_iter()
                .filter(|record| record.category() == Some(category))
                .collect(),
            None => records,
        };

        let filtered = filter(records, &query.text, &query.column);
        let sorted = sort(filtered, query.direction);

        let pagination = PaginationMeta::new(page, size, sorted.len());
        let data = paginate(&sorted, page.saturating_add(1), pagination.size).to_vec();

        PageResponse { data, pagination }
    }
}

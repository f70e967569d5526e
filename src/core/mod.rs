//! Core module containing the record abstraction and the list engine

pub mod auth;
pub mod engine;
pub mod error;
pub mod field;
pub mod query;
pub mod record;
pub mod sequence;
pub mod service;

pub use auth::{AccessPolicy, SharedToken, StaticToken, TokenSource, Viewer};
pub use engine::{ListView, PageCursor, filter, paginate, sort, sort_by};
pub use error::{LabdeskError, LabdeskResult};
pub use field::FieldValue;
pub use query::{Column, ListParams, ListQuery, PageResponse, PaginationMeta, SortDirection};
pub use record::{FieldAccess, Record, SearchField};
pub use sequence::{FetchSequencer, FetchTicket, LatestSlot};
pub use service::RecordService;

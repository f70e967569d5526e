//! # labdesk
//!
//! Record listing backbone for a lab administration portal: projects, the
//! member directory, papers, patents, awards, board posts and leave
//! requests.
//!
//! ## Features
//!
//! - **One list engine**: search, column selection, sorting and pagination
//!   written once and shared by every collection
//! - **Typed field tables**: each record declares its searchable fields as
//!   typed accessors, so a column lookup never inspects a dynamic map
//! - **REST exposure**: paginated list endpoints plus get/create/delete
//! - **Remote lists**: a client that keeps the last good page and drops
//!   replies to superseded requests
//! - **YAML configuration**: page sizes, default order and delete policy per
//!   collection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use labdesk::prelude::*;
//!
//! let papers = vec![/* ... */];
//! let query = ListQuery::new("graph", Column::All, SortDirection::Desc);
//! let page = ListView::apply(papers, &query, None, 0, 10);
//!
//! ServerBuilder::new()
//!     .register_collection::<NewPaper>(InMemoryRecordService::new())?
//!     .serve()
//!     .await?;
//! ```

#[cfg(feature = "remote")]
pub mod client;
pub mod config;
pub mod core;
pub mod demo;
pub mod records;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AccessPolicy, Column, FetchSequencer, FetchTicket, FieldValue, LabdeskError,
        LabdeskResult, LatestSlot, ListParams, ListQuery, ListView, PageCursor, PageResponse,
        PaginationMeta, Record, RecordService, SearchField, SharedToken, SortDirection,
        StaticToken, TokenSource, Viewer, filter, paginate, sort, sort_by,
    };

    // === Records ===
    pub use crate::records::{
        Award, BoardPost, Leave, Member, NewAward, NewBoardPost, NewLeave, NewMember, NewPaper,
        NewPatent, NewProject, NewRecord, Paper, Patent, Project,
    };

    // === Storage ===
    pub use crate::storage::InMemoryRecordService;

    // === Config ===
    pub use crate::config::{CollectionConfig, CollectionSettings, PortalConfig};

    // === Server ===
    pub use crate::server::{CollectionDescriptor, CollectionRegistry, ServerBuilder};

    // === Client ===
    #[cfg(feature = "remote")]
    pub use crate::client::{ApiContext, ListClient, ListRequest, PagedList};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}

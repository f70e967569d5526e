//! Server module for building HTTP servers with auto-registered routes
//!
//! This module provides a `ServerBuilder` that registers:
//! - list/get/create/delete routes for every registered collection
//! - health checks and a collection index

pub mod builder;
pub mod handlers;
pub mod registry;
pub mod rest;

pub use builder::ServerBuilder;
pub use registry::{CollectionDescriptor, CollectionInfo, CollectionRegistry, RecordCollection};
pub use rest::RestExposure;

//! Collection registry for managing collection descriptors and building
//! their REST routes

use crate::config::PortalConfig;
use crate::core::{LabdeskError, Record, RecordService};
use crate::records::NewRecord;
use crate::server::handlers::{self, CollectionState};
use axum::Router;
use axum::routing::get;
use indexmap::IndexMap;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

/// Trait that describes how to expose one record collection
///
/// Each collection (papers, board-posts, ...) is registered through a
/// descriptor providing its routes and its searchable columns.
pub trait CollectionDescriptor: Send + Sync {
    /// Collection name used in routes (e.g., "board-posts")
    fn name(&self) -> &'static str;

    /// Field the collection's list is sorted by
    fn sort_field(&self) -> &'static str;

    /// Every column a search can be restricted to
    fn columns(&self) -> Vec<&'static str>;

    /// Columns searched under the "all" selector
    fn all_columns(&self) -> Vec<&'static str>;

    /// Build the routes of this collection:
    /// - GET /{name}
    /// - POST /{name}
    /// - GET /{name}/{id}
    /// - DELETE /{name}/{id}
    fn build_routes(&self, config: &PortalConfig) -> Router;
}

/// Descriptor of a collection backed by a [`RecordService`], created from
/// payloads of type `P`
pub struct RecordCollection<P: NewRecord> {
    service: Arc<dyn RecordService<P::Record>>,
    _payload: PhantomData<fn() -> P>,
}

impl<P: NewRecord> RecordCollection<P> {
    pub fn new(service: Arc<dyn RecordService<P::Record>>) -> Self {
        Self {
            service,
            _payload: PhantomData,
        }
    }
}

impl<P> CollectionDescriptor for RecordCollection<P>
where
    P: NewRecord,
    P::Record: Serialize,
{
    fn name(&self) -> &'static str {
        <P::Record as Record>::resource_name()
    }

    fn sort_field(&self) -> &'static str {
        <P::Record as Record>::sort_field()
    }

    fn columns(&self) -> Vec<&'static str> {
        <P::Record as Record>::search_fields()
            .iter()
            .map(|field| field.name)
            .collect()
    }

    fn all_columns(&self) -> Vec<&'static str> {
        <P::Record as Record>::all_column_names()
    }

    fn build_routes(&self, config: &PortalConfig) -> Router {
        let state = CollectionState {
            service: self.service.clone(),
            settings: Arc::new(config.collection(self.name())),
        };

        let base = format!("/{}", self.name());
        let item = format!("/{}/{{id}}", self.name());

        Router::new()
            .route(
                &base,
                get(handlers::list_records::<P::Record>).post(handlers::create_record::<P>),
            )
            .route(
                &item,
                get(handlers::get_record::<P::Record>)
                    .delete(handlers::delete_record::<P::Record>),
            )
            .with_state(state)
    }
}

/// Public description of a registered collection
#[derive(Debug, Clone, Serialize)]
pub struct CollectionInfo {
    pub name: &'static str,
    pub sort_field: &'static str,
    pub columns: Vec<&'static str>,
    pub all_columns: Vec<&'static str>,
}

/// Registry for all collections exposed by the server
///
/// Collections keep their registration order.
#[derive(Default)]
pub struct CollectionRegistry {
    descriptors: IndexMap<&'static str, Box<dyn CollectionDescriptor>>,
}

impl CollectionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: IndexMap::new(),
        }
    }

    /// Register a collection descriptor
    ///
    /// Fails when a collection with the same name is already registered.
    pub fn register(
        &mut self,
        descriptor: Box<dyn CollectionDescriptor>,
    ) -> Result<(), LabdeskError> {
        let name = descriptor.name();
        if self.descriptors.contains_key(name) {
            return Err(LabdeskError::Config(format!(
                "collection '{}' is registered twice",
                name
            )));
        }
        self.descriptors.insert(name, descriptor);
        Ok(())
    }

    /// Build a router with all registered collection routes
    pub fn build_routes(&self, config: &PortalConfig) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes(config))
            })
    }

    /// Names of all registered collections
    pub fn names(&self) -> Vec<&'static str> {
        self.descriptors.keys().copied().collect()
    }

    /// Descriptions of all registered collections
    pub fn describe(&self) -> Vec<CollectionInfo> {
        self.descriptors
            .values()
            .map(|descriptor| CollectionInfo {
                name: descriptor.name(),
                sort_field: descriptor.sort_field(),
                columns: descriptor.columns(),
                all_columns: descriptor.all_columns(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{BoardPost, NewBoardPost, NewPaper, Paper};
    use crate::storage::InMemoryRecordService;

    fn papers() -> Box<dyn CollectionDescriptor> {
        Box::new(RecordCollection::<NewPaper>::new(Arc::new(
            InMemoryRecordService::<Paper>::new(),
        )))
    }

    fn posts() -> Box<dyn CollectionDescriptor> {
        Box::new(RecordCollection::<NewBoardPost>::new(Arc::new(
            InMemoryRecordService::<BoardPost>::new(),
        )))
    }

    #[test]
    fn test_new_registry_is_empty() {
        assert!(CollectionRegistry::new().names().is_empty());
        assert!(CollectionRegistry::default().describe().is_empty());
    }

    #[test]
    fn test_register_keeps_order() {
        let mut registry = CollectionRegistry::new();
        registry.register(posts()).unwrap();
        registry.register(papers()).unwrap();
        assert_eq!(registry.names(), vec!["board-posts", "papers"]);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = CollectionRegistry::new();
        registry.register(papers()).unwrap();
        let err = registry.register(papers()).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_describe() {
        let mut registry = CollectionRegistry::new();
        registry.register(papers()).unwrap();

        let info = &registry.describe()[0];
        assert_eq!(info.name, "papers");
        assert_eq!(info.sort_field, "published_on");
        assert_eq!(info.all_columns, vec!["title", "journal", "authors"]);
        assert!(info.columns.contains(&"citations"));
    }
}

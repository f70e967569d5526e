//! Service trait for record storage

use crate::core::Record;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing the records of one collection
///
/// Implementations own the records; the list engine only ever sees the
/// snapshot returned by [`RecordService::list`].
#[async_trait]
pub trait RecordService<T: Record>: Send + Sync {
    /// Create a new record
    async fn create(&self, record: T) -> Result<T>;

    /// Get a record by key
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// Snapshot of every record, in insertion order
    async fn list(&self) -> Result<Vec<T>>;

    /// Delete a record, returning it if it existed
    async fn delete(&self, id: &Uuid) -> Result<Option<T>>;
}

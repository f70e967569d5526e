//! In-memory implementation of RecordService for testing and development

use crate::core::{Record, RecordService};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory record service
///
/// Records are kept in insertion order, which is the order list endpoints
/// see before sorting. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryRecordService<T> {
    records: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T: Record> InMemoryRecordService<T> {
    /// Create an empty service
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a service pre-filled with `records`
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.key(), record))
            .collect();
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Record> Default for InMemoryRecordService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordService<T> for InMemoryRecordService<T> {
    async fn create(&self, record: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = record.key();
        if records.contains_key(&id) {
            return Err(anyhow!("{} record {} already exists", T::resource_name(), id));
        }
        records.insert(id, record.clone());

        Ok(record)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.values().cloned().collect())
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(records.shift_remove(id))
    }
}

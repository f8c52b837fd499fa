use async_trait::async_trait;
use std::collections::{HashMap, hash_map::Entry};
use tokio::sync::RwLock;

use crate::{
    error::StorageError,
    model::{Points, RecordId, StoredRecord},
    storage::ScoreStorage,
};

/// Process-lifetime store. A single lock guards the map, so a lookup that
/// starts after an insert has returned always observes that insert.
#[derive(Debug, Default)]
pub struct InMemoryScoreStorage {
    records: RwLock<HashMap<RecordId, Points>>,
}

impl InMemoryScoreStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreStorage for InMemoryScoreStorage {
    async fn insert(&self, record: StoredRecord) -> Result<(), StorageError> {
        let mut records = self.records.write().await;
        match records.entry(record.id) {
            Entry::Occupied(_) => Err(StorageError::DuplicateId(record.id)),
            Entry::Vacant(slot) => {
                slot.insert(record.points);
                Ok(())
            }
        }
    }

    async fn get_points(&self, id: &RecordId) -> Result<Option<Points>, StorageError> {
        Ok(self.records.read().await.get(id).copied())
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.records.read().await.len())
    }
}

pub mod in_memory;

pub use in_memory::*;

use crate::{
    error::StorageError,
    model::{Points, RecordId, StoredRecord},
};
use async_trait::async_trait;

/// Keeps one score per identifier for the lifetime of the process.
#[async_trait]
pub trait ScoreStorage: Send + Sync {
    /// Stores a new record. An identifier that is already present is refused.
    async fn insert(&self, record: StoredRecord) -> Result<(), StorageError>;

    async fn get_points(&self, id: &RecordId) -> Result<Option<Points>, StorageError>;

    async fn count(&self) -> Result<usize, StorageError>;
}

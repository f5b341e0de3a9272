//! Keyed-record backend seam
//!
//! The generic table-backed store this tool can mirror into, specified as
//! the operations the core needs and nothing more. Every operation is
//! fallible and allowed to report non-success; callers must tolerate both.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// A record as seen by the backend: one flat JSON object with an "id" key
pub type Record = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("unknown collection '{0}'")]
    UnknownCollection(String),
}

/// Store of keyed records grouped by collection name
pub trait CollectionStore: Send + Sync {
    fn get_items(&self, collection: &str) -> Result<Vec<Record>, BackendError>;

    /// Returns false when the backend declined the write
    fn add_item(&self, collection: &str, record: Record) -> Result<bool, BackendError>;

    fn update_item(&self, collection: &str, id: &str, patch: Record)
        -> Result<bool, BackendError>;

    fn delete_item(&self, collection: &str, id: &str) -> Result<bool, BackendError>;

    /// Atomic replace-all for one collection
    fn save_items(&self, collection: &str, records: Vec<Record>) -> Result<bool, BackendError>;
}

/// Receiver of whole-document replacement notifications, so other open
/// views can refresh after a merge lands
pub trait ChangeNotifier {
    fn dataset_replaced(&self, dataset: &str);
}

/// Notifier that swallows events
#[derive(Debug, Default)]
pub struct NullNotifier;

impl ChangeNotifier for NullNotifier {
    fn dataset_replaced(&self, _dataset: &str) {}
}

/// In-memory backend for tests and embedding
#[derive(Default)]
pub struct MemoryCollectionStore {
    collections: Mutex<HashMap<String, Vec<Record>>>,
}

impl MemoryCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_id(record: &Record) -> Option<String> {
        record
            .get("id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

impl CollectionStore for MemoryCollectionStore {
    fn get_items(&self, collection: &str) -> Result<Vec<Record>, BackendError> {
        let collections = self.collections.lock().expect("collection lock poisoned");
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    fn add_item(&self, collection: &str, record: Record) -> Result<bool, BackendError> {
        let mut collections = self.collections.lock().expect("collection lock poisoned");
        collections
            .entry(collection.to_string())
            .or_default()
            .push(record);
        Ok(true)
    }

    fn update_item(
        &self,
        collection: &str,
        id: &str,
        patch: Record,
    ) -> Result<bool, BackendError> {
        let mut collections = self.collections.lock().expect("collection lock poisoned");
        let Some(records) = collections.get_mut(collection) else {
            return Ok(false);
        };
        for record in records.iter_mut() {
            if Self::record_id(record).as_deref() == Some(id) {
                for (key, value) in patch {
                    record.insert(key, value);
                }
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn delete_item(&self, collection: &str, id: &str) -> Result<bool, BackendError> {
        let mut collections = self.collections.lock().expect("collection lock poisoned");
        let Some(records) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|r| Self::record_id(r).as_deref() != Some(id));
        Ok(records.len() != before)
    }

    fn save_items(&self, collection: &str, records: Vec<Record>) -> Result<bool, BackendError> {
        let mut collections = self.collections.lock().expect("collection lock poisoned");
        collections.insert(collection.to_string(), records);
        Ok(true)
    }
}

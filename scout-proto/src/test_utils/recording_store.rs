//! RecordingStore: in-memory KeyValueStore that keeps a write log.

use crate::error::StoreError;
use crate::store::KeyValueStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// In-memory store backed by a `HashMap` behind a `RwLock`, which also
/// records every successful `set` in order.
///
/// Build with [`failing_writes`](Self::failing_writes) to make every
/// `set` and `remove` fail, for exercising error paths.
pub struct RecordingStore {
    data: RwLock<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
    fail_writes: bool,
}

impl RecordingStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            fail_writes: false,
        }
    }

    /// Pre-populate `key` without recording a write.
    #[must_use]
    pub fn with_value(self, key: &str, value: &str) -> Self {
        if let Ok(mut data) = self.data.write() {
            data.insert(key.to_owned(), value.to_owned());
        }
        self
    }

    /// Make every write fail with [`StoreError::WriteFailed`].
    #[must_use]
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Every successful `set`, in order.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    /// Current value of `key`, bypassing the async trait.
    pub fn value(&self, key: &str) -> Option<String> {
        self.data.read().ok().and_then(|d| d.get(key).cloned())
    }
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let data = self.data.read().map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        Ok(data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::WriteFailed(format!("refusing to write {key}")));
        }
        let mut data = self.data.write().map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        data.insert(key.to_owned(), value.to_owned());
        let mut writes = self.writes.lock().map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        writes.push((key.to_owned(), value.to_owned()));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::WriteFailed(format!("refusing to remove {key}")));
        }
        let mut data = self.data.write().map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        data.remove(key);
        Ok(())
    }
}

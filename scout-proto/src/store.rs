//! The Storage protocol: small strings that outlive the process.

use crate::error::StoreError;
use async_trait::async_trait;

/// Protocol ②: Storage
///
/// A flat string-to-string map, the moral equivalent of a browser's
/// local storage. The coordinator keeps the last attempted query here.
///
/// Implementations:
/// - `MemoryStore`: HashMap (testing, ephemeral)
/// - `FsStore`: one file per key (survives restarts)
/// - `RecordingStore`: remembers every write (`test-utils`)
///
/// No transactional guarantees. Callers that need ordering between
/// writes serialize them themselves.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Returns `None` if the key was never set or was removed.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value. Creates or overwrites.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value. No-op if the key doesn't exist.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#![deny(missing_docs)]
//! Filesystem-backed implementation of scout-proto's KeyValueStore trait.
//!
//! Each key is URL-encoded and stored as a `.json` file under the root
//! directory, holding the value as a JSON string. Provides true
//! persistence across process restarts, which is what lets a coordinator
//! pick up the last search on the next launch.

use async_trait::async_trait;
use scout_proto::error::StoreError;
use scout_proto::store::KeyValueStore;
use std::path::{Path, PathBuf};

/// Filesystem-backed key-value store.
///
/// Directory layout:
/// ```text
/// root/
///   <url-encoded-key>.json
/// ```
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a new filesystem store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// A store under the platform data directory, e.g.
    /// `~/.local/share/<app>` on Linux.
    ///
    /// Returns `None` when the platform has no notion of a data directory.
    pub fn in_data_dir(app: &str) -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(&dir.join(app)))
    }

    /// The directory this store writes to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key_to_filename(key))
    }
}

/// Encode a key into a safe filename.
fn key_to_filename(key: &str) -> String {
    let mut encoded = String::new();
    for ch in key.chars() {
        match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => encoded.push(ch),
            _ => {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).as_bytes() {
                    encoded.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    format!("{encoded}.json")
}

#[async_trait]
impl KeyValueStore for FsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let value: String = serde_json::from_str(&contents)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let contents =
            serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        tokio::fs::write(self.path_for(key), contents)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::WriteFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of `key_to_filename`, to check the encoding loses nothing.
    fn decode_filename(filename: &str) -> Option<String> {
        let name = filename.strip_suffix(".json")?;
        let bytes = name.as_bytes();
        let mut decoded = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                let hex = std::str::from_utf8(bytes.get(i + 1..i + 3)?).ok()?;
                decoded.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            } else {
                decoded.push(bytes[i]);
                i += 1;
            }
        }
        String::from_utf8(decoded).ok()
    }

    #[test]
    fn key_encoding_roundtrip() {
        let keys = ["lastSearch", "user:name", "path/to/key", "has spaces", "emoji🎉", "..", "a.b"];
        for key in &keys {
            let filename = key_to_filename(key);
            let decoded = decode_filename(&filename).unwrap();
            assert_eq!(*key, decoded, "roundtrip failed for {key}");
        }
    }

    #[test]
    fn encoded_keys_cannot_escape_root() {
        let filename = key_to_filename("../../etc/passwd");
        assert!(!filename.contains('/'));
        assert!(!filename.contains(".."));
    }

    #[test]
    fn key_to_filename_produces_json_extension() {
        assert_eq!(key_to_filename("lastSearch"), "lastSearch.json");
    }

    #[test]
    fn encoded_filenames_use_only_safe_characters() {
        let filename = key_to_filename("user:name/with spaces.🎉");
        let stem = filename.strip_suffix(".json").unwrap();
        assert!(stem.chars().all(|c| c.is_ascii_alphanumeric() || "-_%".contains(c)));
    }

    #[tokio::test]
    async fn read_nonexistent_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());

        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_creates_root_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("scout");
        let store = FsStore::new(&root);
        assert!(!root.exists());

        store.set("lastSearch", "octocat").await.unwrap();
        assert!(root.join("lastSearch.json").exists());
    }

    #[tokio::test]
    async fn values_are_stored_as_json_strings() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());

        store.set("lastSearch", "say \"hi\"").await.unwrap();
        let raw = std::fs::read_to_string(dir.path().join("lastSearch.json")).unwrap();
        assert_eq!(raw, r#""say \"hi\"""#);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lastSearch.json"), "{not json").unwrap();
        let store = FsStore::new(dir.path());

        let err = store.get("lastSearch").await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn fs_store_implements_key_value_store() {
        fn _assert_key_value_store<T: KeyValueStore>() {}
        _assert_key_value_store::<FsStore>();
    }
}

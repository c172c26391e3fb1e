//! Directory-backed key-value store.
//!
//! Each key is one `<key>.json` file. Writes go to a temp file that is
//! renamed over the target, so a crash never leaves a half-written bucket.

use crate::domain::errors::StoreError;
use crate::domain::repositories::KeyValueStore;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const EXTENSION: &str = "json";

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create store directory {:?}", dir))?;
            info!("Created sales store at {:?}", dir);
        }
        Ok(Self { dir })
    }

    /// Default location: `~/.trackfy/sales`.
    pub fn default_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("Could not find HOME directory")?;
        Ok(PathBuf::from(home).join(".trackfy").join("sales"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension("tmp");
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            path: path.clone(),
            source,
        };

        fs::write(&temp_path, value).map_err(io_err)?;
        fs::rename(&temp_path, &path).map_err(io_err)?;

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::Io {
            key: String::new(),
            path: self.dir.clone(),
            source,
        })?;

        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// Keys become file names, so anything that could escape the directory is rejected.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let reason = if key.is_empty() {
        Some("key is empty")
    } else if key.contains(['/', '\\']) {
        Some("path separators are not allowed")
    } else if key.starts_with('.') {
        Some("leading dots are not allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_test_store() -> (FileStore, PathBuf) {
        let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "trackfy_test_{}_{}_{}_store",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0),
            unique_id
        ));
        let store = FileStore::open(&temp_dir).expect("Failed to create test store");
        (store, temp_dir)
    }

    fn cleanup_test_dir(temp_dir: PathBuf) {
        fs::remove_dir_all(temp_dir).ok();
    }

    #[test]
    fn test_missing_key_returns_none() {
        let (store, temp_dir) = create_test_store();
        assert!(store.get("trackfy_sales_2026-10-17").unwrap().is_none());
        cleanup_test_dir(temp_dir);
    }

    #[test]
    fn test_set_get_roundtrip() {
        let (store, temp_dir) = create_test_store();

        store.set("trackfy_sales_2026-10-17", "[1,2,3]").unwrap();
        assert_eq!(
            store.get("trackfy_sales_2026-10-17").unwrap().as_deref(),
            Some("[1,2,3]")
        );
        assert!(!temp_dir.join("trackfy_sales_2026-10-17.tmp").exists());

        cleanup_test_dir(temp_dir);
    }

    #[test]
    fn test_keys_ignore_foreign_files() {
        let (store, temp_dir) = create_test_store();

        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();
        fs::write(temp_dir.join("notes.txt"), "hello").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
        cleanup_test_dir(temp_dir);
    }

    #[test]
    fn test_remove() {
        let (store, temp_dir) = create_test_store();

        store.set("a", "1").unwrap();
        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert!(store.get("a").unwrap().is_none());

        cleanup_test_dir(temp_dir);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (store, temp_dir) = create_test_store();

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                store.set(key, "x"),
                Err(StoreError::InvalidKey { .. })
            ));
        }

        cleanup_test_dir(temp_dir);
    }
}

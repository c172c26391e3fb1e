//! Storage Abstractions
//!
//! The simulation persists generated day buckets through a plain string
//! key-value interface, so the cache logic does not depend on where the
//! bytes end up.
//!
//! # Implementations
//!
//! - `InMemoryStore`: ephemeral, used in tests and `TRACKFY_STORE=memory` runs
//! - `FileStore`: one JSON document per key in a directory, durable across runs
//!
//! # Example
//!
//! ```rust,no_run
//! use trackfy::domain::repositories::KeyValueStore;
//! use trackfy::infrastructure::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! store.set("trackfy_sales_2026-10-17", "[]").unwrap();
//! assert_eq!(store.get("trackfy_sales_2026-10-17").unwrap().as_deref(), Some("[]"));
//! ```

use crate::domain::errors::StoreError;

/// Durable string key-value store
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys currently stored
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}

//! In-memory store adapter.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{StorageError, StoreAdapter, check_key};

/// A `HashMap`-backed adapter for tests and ephemeral sessions.
///
/// Clones share the same underlying map, so a test can hand one clone to
/// a cart store and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any value is stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the interior lock is poisoned.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .contains_key(key)
    }
}

impl StoreAdapter for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        check_key(key)?;
        Ok(self
            .entries
            .lock()
            .expect("memory store lock poisoned")
            .get(key)
            .cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        check_key(key)?;
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.put("cart", b"shared").unwrap();
        assert_eq!(b.get("cart").unwrap().unwrap(), b"shared");
    }

    #[test]
    fn test_delete_removes_key() {
        let store = MemoryStore::new();
        store.put("cart", b"x").unwrap();
        store.delete("cart").unwrap();
        assert!(!store.contains("cart"));
    }
}

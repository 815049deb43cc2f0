//! Persistent key/value store adapter.
//!
//! The cart's persisted mirror lives behind [`StoreAdapter`]: synchronous
//! byte-string reads and writes under well-known keys. [`FileStore`] is
//! the durable implementation; [`MemoryStore`] backs tests and ephemeral
//! sessions.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by a store adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key contains characters outside `[a-z0-9_-]`.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Synchronous key/value persistence.
///
/// Values are opaque byte strings. A missing key reads back as `None`;
/// deleting a missing key is not an error.
pub trait StoreAdapter: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the read fails.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the write fails.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Remove the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the removal fails.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys double as file names in [`FileStore`], so keep them path-safe.
fn check_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

//! Driven port for device-local key-value storage.
//!
//! The contract mirrors a browser's local storage: string values addressed by
//! a string key, whole-value reads and writes, no transactions.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by key-value storage adapters.
    pub enum StorageError {
        /// The key cannot address an entry (empty, or not a plain name).
        InvalidKey { key: String } => "storage key '{key}' is not valid",
        /// Reading an entry failed.
        Read { key: String, message: String } =>
            "storage read of '{key}' failed: {message}",
        /// Writing or removing an entry failed.
        Write { key: String, message: String } =>
            "storage write of '{key}' failed: {message}",
    }
}

/// Port for reading and writing named entries on the host device.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStorage: Send + Sync {
    /// Return the stored value for `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the entry stored under `key`. Removing a missing entry is not
    /// an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage used by tests and throwaway sessions.
///
/// # Examples
/// ```
/// use user_admin::domain::ports::{KeyValueStorage, MemoryKeyValueStorage};
///
/// let storage = MemoryKeyValueStorage::default();
/// storage.set("users", "[]").expect("memory writes succeed");
/// assert_eq!(storage.get("users").expect("read").as_deref(), Some("[]"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryKeyValueStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStorage {
    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds whole values; keep serving them.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStorage for MemoryKeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key.trim().is_empty() {
            return Err(StorageError::invalid_key(key));
        }
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

//! Thread-safe property bag.

use crate::errors::ReadOnlyPropertyError;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct PropertyEntry {
    value: serde_json::Value,
    read_only: bool,
}

/// A thread-safe bag of named properties.
///
/// Properties are freely overwritten unless declared read-only, in which
/// case any further write or removal raises a `ReadOnlyPropertyError`.
#[derive(Debug, Default)]
pub struct PropertyBag {
    entries: RwLock<HashMap<String, PropertyEntry>>,
}

impl PropertyBag {
    /// Creates a new empty property bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a property bag from existing data.
    #[must_use]
    pub fn from_data(data: HashMap<String, serde_json::Value>) -> Self {
        let entries = data
            .into_iter()
            .map(|(key, value)| {
                (
                    key,
                    PropertyEntry {
                        value,
                        read_only: false,
                    },
                )
            })
            .collect();

        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Gets a value from the bag.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.entries.read().get(key).map(|e| e.value.clone())
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Checks if a key is declared read-only.
    #[must_use]
    pub fn is_read_only(&self, key: &str) -> bool {
        self.entries.read().get(key).is_some_and(|e| e.read_only)
    }

    /// Sets a value, overwriting any writable previous value.
    ///
    /// # Errors
    ///
    /// Returns `ReadOnlyPropertyError` if the key is declared read-only.
    pub fn set(&self, key: impl Into<String>, value: serde_json::Value) -> Result<(), ReadOnlyPropertyError> {
        self.insert(key.into(), value, false)
    }

    /// Sets a value and declares it read-only.
    ///
    /// # Errors
    ///
    /// Returns `ReadOnlyPropertyError` if the key is already read-only.
    pub fn declare_read_only(
        &self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<(), ReadOnlyPropertyError> {
        self.insert(key.into(), value, true)
    }

    fn insert(&self, key: String, value: serde_json::Value, read_only: bool) -> Result<(), ReadOnlyPropertyError> {
        let mut entries = self.entries.write();

        if entries.get(&key).is_some_and(|e| e.read_only) {
            return Err(ReadOnlyPropertyError::new(key));
        }

        entries.insert(key, PropertyEntry { value, read_only });
        Ok(())
    }

    /// Removes a value from the bag, returning it if present.
    ///
    /// # Errors
    ///
    /// Returns `ReadOnlyPropertyError` if the key is declared read-only.
    pub fn remove(&self, key: &str) -> Result<Option<serde_json::Value>, ReadOnlyPropertyError> {
        let mut entries = self.entries.write();

        if entries.get(key).is_some_and(|e| e.read_only) {
            return Err(ReadOnlyPropertyError::new(key));
        }

        Ok(entries.remove(key).map(|e| e.value))
    }

    /// Returns a copy of all data.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        self.entries
            .read()
            .iter()
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns all keys.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}

impl Clone for PropertyBag {
    fn clone(&self) -> Self {
        Self {
            entries: RwLock::new(self.entries.read().clone()),
        }
    }
}

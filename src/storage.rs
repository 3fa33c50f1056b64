//! Host key-value storage seam (browser local storage or equivalent).

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;

use crate::error::LayoutError;

/// String key-value store the layout snapshot is persisted into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns `Storage` when the host refuses the write (quota, permissions).
    fn set(&mut self, key: &str, value: String) -> Result<(), LayoutError>;

    fn remove(&mut self, key: &str);
}

/// In-process store, for tests and headless hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// Maximum value length accepted by `set`; `None` is unbounded.
    quota: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects values longer than `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self { entries: HashMap::new(), quota: Some(bytes) }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), LayoutError> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(LayoutError::Storage(format!("value of {} bytes exceeds quota of {quota}", value.len())));
            }
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

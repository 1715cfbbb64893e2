use crate::{CoreError, CoreResult, store::TokenStore};

use std::{collections::BTreeMap, panic::Location, sync::Mutex};

use error_location::ErrorLocation;

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    #[track_caller]
    fn with_entries<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> CoreResult<T> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CoreError::PersistenceUnavailable {
                reason: format!("Memory store lock poisoned: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        Ok(f(&mut entries))
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}

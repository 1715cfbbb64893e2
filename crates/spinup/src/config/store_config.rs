use crate::config::{DEFAULT_POLL_INTERVAL_MS, default_poll_interval_ms};

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Persisted session store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store file (None = `<data dir>/session.toml`).
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// How often to check the store for changes made by other windows.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl StoreConfig {
    /// Poll interval. The store watcher enforces its own minimum.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

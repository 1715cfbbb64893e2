//! Process-wide persisted key-value store.
//!
//! Holds the auth `token` plus display-only `name` and `email`. Several
//! processes may share one store; last writer wins.

mod change;
mod file;
mod memory;
mod watcher;

use crate::CoreResult;

pub use {
    change::StoreChange,
    file::FileTokenStore,
    memory::MemoryTokenStore,
    watcher::{MIN_POLL_INTERVAL, StoreWatcher},
};

/// Key holding the opaque credential.
pub const TOKEN_KEY: &str = "token";
/// Key holding the signed-in user's display name.
pub const NAME_KEY: &str = "name";
/// Key holding the signed-in user's email.
pub const EMAIL_KEY: &str = "email";

/// Durable string key-value storage shared by every window of the app.
pub trait TokenStore: Send + Sync {
    /// Read a key. `Ok(None)` if it was never written or was removed.
    fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Write a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> CoreResult<()>;
}

/// Notification that the persisted store was changed by another process.
///
/// `key == None` means the whole store was cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    /// Key that changed, or `None` when the store was cleared.
    pub key: Option<String>,
    /// Value after the change; `None` if the key was removed.
    pub new_value: Option<String>,
}

impl StoreChange {
    /// A single key was written or removed.
    pub fn key(key: impl Into<String>, new_value: Option<String>) -> Self {
        Self {
            key: Some(key.into()),
            new_value,
        }
    }

    /// Every key was removed.
    pub fn cleared() -> Self {
        Self {
            key: None,
            new_value: None,
        }
    }

    /// Whether this change can affect `key`.
    pub fn touches(&self, key: &str) -> bool {
        self.key.as_deref().is_none_or(|k| k == key)
    }
}

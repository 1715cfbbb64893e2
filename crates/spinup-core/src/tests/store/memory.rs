use crate::{MemoryTokenStore, TOKEN_KEY, TokenStore};

/// WHAT: Set, overwrite and remove behave like a map
/// WHY: Tests and ephemeral runs rely on the in-memory store
#[test]
#[allow(clippy::unwrap_used)]
fn given_memory_store_when_writing_and_removing_then_reads_follow() {
    // Given: An empty store
    let store = MemoryTokenStore::new();

    // When/Then: Write, overwrite, remove, remove again
    store.set(TOKEN_KEY, "abc").unwrap();
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

    store.set(TOKEN_KEY, "def").unwrap();
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("def"));

    store.remove(TOKEN_KEY).unwrap();
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert!(store.remove(TOKEN_KEY).is_ok());
}

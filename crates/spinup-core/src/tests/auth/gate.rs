use crate::{
    AuthGate, GateState, MemoryTokenStore, NAME_KEY, StoreChange, TOKEN_KEY, TokenStore, evaluate,
    tests::support::UnavailableStore,
};

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

/// WHAT: Absent or empty token evaluates as unauthenticated
/// WHY: Only a non-empty token grants access
#[test]
#[allow(clippy::unwrap_used)]
fn given_absent_or_empty_token_when_evaluating_then_false() {
    // Given: An empty store
    let store = MemoryTokenStore::new();

    // When/Then: Absent token
    assert!(!evaluate(&store));

    // When/Then: Empty token
    store.set(TOKEN_KEY, "").unwrap();
    assert!(!evaluate(&store));
}

/// WHAT: Any non-empty token evaluates as authenticated
/// WHY: The token is opaque; presence is the whole check
#[test]
#[allow(clippy::unwrap_used)]
fn given_non_empty_token_when_evaluating_then_true() {
    // Given: A store with a token
    let store = MemoryTokenStore::new();
    store.set(TOKEN_KEY, "abc").unwrap();

    // When/Then: Authenticated
    assert!(evaluate(&store));
}

/// WHAT: Unreadable store fails closed
/// WHY: Storage errors must never unlock the session view
#[test]
fn given_unavailable_store_when_gate_created_then_locked() {
    // Given: A store that errors on every read
    let store: Arc<dyn TokenStore> = Arc::new(UnavailableStore);

    // When: Seeding the gate
    let gate = AuthGate::new(store);

    // Then: Locked
    assert_eq!(gate.state(), GateState::Locked);
    assert!(!gate.is_authenticated());
}

/// WHAT: An external clear re-locks an unlocked gate
/// WHY: Another window signing out must take effect without a reload
#[test]
#[allow(clippy::unwrap_used)]
fn given_unlocked_gate_when_store_cleared_externally_then_locked() {
    // Given: An unlocked gate
    let store = Arc::new(MemoryTokenStore::new());
    store.set(TOKEN_KEY, "abc").unwrap();
    let gate = AuthGate::new(store.clone());
    assert_eq!(gate.state(), GateState::Unlocked);

    // When: Another process clears the store and the notification arrives
    store.remove(TOKEN_KEY).unwrap();
    let state = gate.on_store_change(&StoreChange::cleared());

    // Then: Locked
    assert_eq!(state, GateState::Locked);
    assert_eq!(gate.state(), GateState::Locked);
}

/// WHAT: Changes to other keys do not re-evaluate the gate
/// WHY: Only the token decides access
#[test]
#[allow(clippy::unwrap_used)]
fn given_unlocked_gate_when_unrelated_key_changes_then_still_unlocked() {
    // Given: An unlocked gate whose token is then removed behind its back
    let store = Arc::new(MemoryTokenStore::new());
    store.set(TOKEN_KEY, "abc").unwrap();
    let gate = AuthGate::new(store.clone());
    store.remove(TOKEN_KEY).unwrap();

    // When: A notification for the name key arrives
    let state = gate.on_store_change(&StoreChange::key(NAME_KEY, Some("Ada".to_string())));

    // Then: Not re-evaluated
    assert_eq!(state, GateState::Unlocked);
}

/// WHAT: Same-process writes need an explicit reload
/// WHY: Store notifications only fire for other processes
#[test]
#[allow(clippy::unwrap_used)]
fn given_locked_gate_when_token_written_in_process_then_unlocks_only_on_reload() {
    // Given: A locked gate
    let store = Arc::new(MemoryTokenStore::new());
    let gate = AuthGate::new(store.clone());

    // When: Writing the token directly
    store.set(TOKEN_KEY, "abc").unwrap();

    // Then: Unchanged until reloaded
    assert_eq!(gate.state(), GateState::Locked);
    assert_eq!(gate.reload(), GateState::Unlocked);
}

/// WHAT: The listener applies notifications from the channel
/// WHY: The gate stays in sync for the lifetime of the process
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_running_listener_when_token_cleared_then_subscribers_see_locked() {
    // Given: An unlocked gate listening on a change channel
    let store = Arc::new(MemoryTokenStore::new());
    store.set(TOKEN_KEY, "abc").unwrap();
    let gate = Arc::new(AuthGate::new(store.clone()));
    let mut observer = gate.subscribe();

    let (change_tx, change_rx) = mpsc::channel(8);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let listener = {
        let gate = Arc::clone(&gate);
        tokio::spawn(async move { gate.run(change_rx, shutdown_rx).await })
    };

    // When: The token is removed elsewhere and the change is delivered
    store.remove(TOKEN_KEY).unwrap();
    change_tx
        .send(StoreChange::key(TOKEN_KEY, None))
        .await
        .unwrap();

    // Then: Subscribers observe the transition
    observer.changed().await.unwrap();
    assert_eq!(*observer.borrow(), GateState::Locked);

    shutdown_tx.send(true).unwrap();
    listener.await.unwrap();
}

//! Auth gate: decides whether the session view is reachable.
//!
//! Lives for the whole process. Seeded from the persisted store at boot and
//! mutated only by [`AuthGate::reload`] (after a login write) and by
//! external store-change notifications.

use crate::store::{StoreChange, TOKEN_KEY, TokenStore};

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Whether the session view may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Login view shown; session view unreachable.
    Locked,
    /// Session view reachable.
    Unlocked,
}

impl From<bool> for GateState {
    fn from(authenticated: bool) -> Self {
        if authenticated {
            GateState::Unlocked
        } else {
            GateState::Locked
        }
    }
}

/// True if the store holds a non-empty token.
///
/// An unreadable store counts as unauthenticated.
pub fn evaluate(store: &dyn TokenStore) -> bool {
    match store.get(TOKEN_KEY) {
        Ok(token) => token.is_some_and(|t| !t.is_empty()),
        Err(e) => {
            warn!(error = ?e, "Token store unavailable, failing closed");
            false
        }
    }
}

/// Process-wide authentication state.
pub struct AuthGate {
    store: Arc<dyn TokenStore>,
    state: watch::Sender<GateState>,
}

impl AuthGate {
    /// Seed the gate from the persisted store.
    #[instrument(skip(store))]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let initial = GateState::from(evaluate(store.as_ref()));
        let (state, _) = watch::channel(initial);

        info!(gate = ?initial, "Auth gate initialised");

        Self { store, state }
    }

    /// Current gate state.
    pub fn state(&self) -> GateState {
        *self.state.borrow()
    }

    /// Shorthand for `state() == Unlocked`.
    pub fn is_authenticated(&self) -> bool {
        self.state() == GateState::Unlocked
    }

    /// Receive every gate transition.
    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state.subscribe()
    }

    /// The store the gate reads from.
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Re-evaluate the store and publish the result.
    ///
    /// Same-process writes produce no store notification, so whoever writes
    /// the token must call this to flip the gate.
    pub fn reload(&self) -> GateState {
        let next = GateState::from(evaluate(self.store.as_ref()));

        let changed = self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });

        if changed {
            info!(gate = ?next, "Auth gate changed");
        }

        next
    }

    /// React to a change made to the store by another process.
    pub fn on_store_change(&self, change: &StoreChange) -> GateState {
        if !change.touches(TOKEN_KEY) {
            debug!(key = ?change.key, "Ignoring store change");
            return self.state();
        }

        self.reload()
    }

    /// Apply store notifications until shutdown or the channel closes.
    #[instrument(skip_all)]
    pub async fn run(
        &self,
        mut changes: mpsc::Receiver<StoreChange>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    debug!("Auth gate listener shutting down");
                    break;
                }
                change = changes.recv() => {
                    match change {
                        Some(change) => {
                            self.on_store_change(&change);
                        }
                        None => {
                            debug!("Store change channel closed");
                            break;
                        }
                    }
                }
            }
        }
    }
}

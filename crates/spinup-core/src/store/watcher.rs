use crate::store::{FileTokenStore, StoreChange};

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{mpsc, watch},
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, instrument, warn};

/// Shortest poll period the watcher will use.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Delivers cross-process store changes as [`StoreChange`] notifications.
///
/// Polls the backing file; writes made through the same [`FileTokenStore`]
/// handle are already in its snapshot and are never reported.
pub struct StoreWatcher {
    store: Arc<FileTokenStore>,
    poll_interval: Duration,
    change_tx: mpsc::Sender<StoreChange>,
}

impl StoreWatcher {
    /// Create a watcher that forwards changes to `change_tx`.
    ///
    /// `poll_interval` is raised to [`MIN_POLL_INTERVAL`] if shorter.
    pub fn new(
        store: Arc<FileTokenStore>,
        poll_interval: Duration,
        change_tx: mpsc::Sender<StoreChange>,
    ) -> Self {
        Self {
            store,
            poll_interval,
            change_tx,
        }
    }

    /// Poll until shutdown is signalled or the receiver goes away.
    ///
    /// An unreadable store is logged and retried on the next poll.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut interval = time::interval(self.poll_interval.max(MIN_POLL_INTERVAL));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(path = ?self.store.path(), "Store watcher started");

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Store watcher shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let changes = match self.store.poll_changes() {
                        Ok(changes) => changes,
                        Err(e) => {
                            warn!(error = ?e, "Failed to poll token store");
                            continue;
                        }
                    };

                    for change in changes {
                        debug!(key = ?change.key, "External store change");
                        if self.change_tx.send(change).await.is_err() {
                            info!("Store change receiver dropped, stopping watcher");
                            return;
                        }
                    }
                }
            }
        }
    }
}

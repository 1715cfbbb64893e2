use crate::session::SessionState;

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant},
};
use tracing::trace;

/// Period of the session clock.
pub(crate) const TICK_PERIOD: Duration = Duration::from_secs(1);

/// RAII guard over the one-second session clock.
///
/// Spawning schedules the recurring tick; dropping the guard aborts it. The
/// controller holds at most one guard, so every path that clears it (stop,
/// teardown, a failed restart) releases the timer exactly once.
///
/// Each tick checks `running` and increments under the same watch lock, so a
/// tick that races a stop can never advance a stopped counter.
pub(crate) struct SessionTicker {
    handle: JoinHandle<()>,
}

impl SessionTicker {
    /// Schedule the clock. The first tick fires one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(state: Arc<watch::Sender<SessionState>>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

            loop {
                interval.tick().await;

                let advanced = state.send_if_modified(|s| {
                    if s.running {
                        s.elapsed_seconds += 1;
                        true
                    } else {
                        false
                    }
                });

                if !advanced {
                    break;
                }

                trace!(elapsed_seconds = state.borrow().elapsed_seconds, "Session tick");
            }
        });

        Self { handle }
    }

    /// Whether the clock task is still scheduled.
    pub(crate) fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for SessionTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

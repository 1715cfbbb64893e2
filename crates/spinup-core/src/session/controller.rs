//! Session controller: local elapsed-time clock kept consistent with the
//! external recording service.
//!
//! State only transitions after the awaited service call succeeds. A failed
//! start leaves the session stopped with no clock scheduled; a failed stop
//! leaves it running.

use crate::{
    CoreError, CoreResult,
    recording::{RecorderConfig, RecordingService},
    session::{ElapsedTime, SessionState, SessionTicker, format_time},
};

use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

/// Owns the run state and elapsed counter of one recording session view.
///
/// Dropping the controller releases the session clock.
pub struct SessionController<R> {
    service: R,
    config: RecorderConfig,
    state: Arc<watch::Sender<SessionState>>,
    ticker: Option<SessionTicker>,
}

impl<R: RecordingService> SessionController<R> {
    /// Create a stopped controller that will start recordings with `config`.
    pub fn new(service: R, config: RecorderConfig) -> Self {
        let (state, _) = watch::channel(SessionState::default());

        Self {
            service,
            config,
            state: Arc::new(state),
            ticker: None,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Current elapsed time, split for display.
    pub fn display(&self) -> ElapsedTime {
        format_time(self.state().elapsed_seconds)
    }

    /// Start is only offered while no session is running.
    pub fn can_start(&self) -> bool {
        !self.state().running
    }

    /// Stop stays available after a session ends as long as time is on display.
    pub fn can_stop(&self) -> bool {
        let state = self.state();
        state.running || state.elapsed_seconds > 0
    }

    /// Whether the session clock is currently scheduled.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(SessionTicker::is_active)
    }

    /// Receive every state change, including each clock tick.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Configuration sent with each start request.
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// The recording service this controller drives.
    pub fn service(&self) -> &R {
        &self.service
    }

    /// Ask the recording service to start, then reset and run the clock.
    ///
    /// # Errors
    ///
    /// `SessionAlreadyRunning` if a session is active, `ServiceStartFailed`
    /// if the service rejects the request. Neither changes the state.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> CoreResult<()> {
        if self.state().running {
            return Err(CoreError::SessionAlreadyRunning {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.service
            .start_video_recording(&self.config)
            .await
            .map_err(|source| {
                warn!(error = %source, "Recording service rejected start");
                CoreError::ServiceStartFailed {
                    source,
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        self.state.send_modify(|s| {
            s.running = true;
            s.elapsed_seconds = 0;
        });
        self.ticker = Some(SessionTicker::spawn(Arc::clone(&self.state)));

        info!(
            fps = self.config.frames_per_second,
            container = self.config.container_format.as_str(),
            "Recording session started"
        );

        Ok(())
    }

    /// Ask the recording service to stop, then freeze the clock.
    ///
    /// The elapsed counter keeps its value until the next successful start.
    ///
    /// # Errors
    ///
    /// `NoSessionToStop` if nothing is running and no time is on display,
    /// `ServiceStopFailed` if the service rejects the request, in which case
    /// the session keeps running.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> CoreResult<()> {
        if !self.can_stop() {
            return Err(CoreError::NoSessionToStop {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.service.stop_video_recording().await.map_err(|source| {
            warn!(error = %source, "Recording service rejected stop");
            CoreError::ServiceStopFailed {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        // Flag first so a tick already in flight sees a stopped session.
        self.state.send_modify(|s| s.running = false);
        self.ticker = None;

        info!(
            elapsed_seconds = self.state().elapsed_seconds,
            "Recording session stopped"
        );

        Ok(())
    }
}

use crate::recording::RecorderConfig;

use std::{future::Future, sync::Arc};

use thiserror::Error;

/// Failure reported by the recording service for a start or stop call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ServiceFailure {
    /// Human-readable reason returned by the service.
    pub reason: String,
}

impl ServiceFailure {
    /// Wrap a reason string.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Start/stop contract of the external recording service.
///
/// Both calls are awaited by the session controller and must not block the
/// runtime thread while the service works.
pub trait RecordingService: Send + Sync {
    /// Begin capturing with the given configuration.
    fn start_video_recording(
        &self,
        config: &RecorderConfig,
    ) -> impl Future<Output = Result<(), ServiceFailure>> + Send;

    /// Stop the active capture.
    fn stop_video_recording(&self) -> impl Future<Output = Result<(), ServiceFailure>> + Send;
}

impl<T: RecordingService> RecordingService for Arc<T> {
    fn start_video_recording(
        &self,
        config: &RecorderConfig,
    ) -> impl Future<Output = Result<(), ServiceFailure>> + Send {
        (**self).start_video_recording(config)
    }

    fn stop_video_recording(&self) -> impl Future<Output = Result<(), ServiceFailure>> + Send {
        (**self).stop_video_recording()
    }
}

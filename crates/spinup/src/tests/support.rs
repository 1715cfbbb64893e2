//! Test doubles for the recorder and identity service.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use spinup_core::{
    CoreResult, Credentials, Identity, IdentityProvider, RecorderConfig, RecordingService,
    ServiceFailure,
};

/// Recorder that counts calls and can be told to never answer a start.
#[derive(Default)]
pub(crate) struct StubRecorder {
    starts: AtomicUsize,
    stops: AtomicUsize,
    hang_on_start: AtomicBool,
}

impl StubRecorder {
    pub(crate) fn hanging() -> Self {
        let recorder = Self::default();
        recorder.hang_on_start.store(true, Ordering::SeqCst);
        recorder
    }

    pub(crate) fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub(crate) fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl RecordingService for StubRecorder {
    async fn start_video_recording(&self, _config: &RecorderConfig) -> Result<(), ServiceFailure> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        if self.hang_on_start.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    async fn stop_video_recording(&self) -> Result<(), ServiceFailure> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Identity service that accepts anyone and issues token `abc`.
pub(crate) struct StubIdentity;

impl IdentityProvider for StubIdentity {
    async fn verify(&self, credentials: &Credentials) -> CoreResult<Identity> {
        Ok(Identity {
            token: "abc".to_string(),
            name: "Ada".to_string(),
            email: credentials.email.clone(),
        })
    }
}

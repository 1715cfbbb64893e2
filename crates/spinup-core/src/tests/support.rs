//! Test doubles for the external collaborators.

use crate::{
    CoreError, CoreResult, Credentials, Identity, IdentityProvider, RecorderConfig,
    RecordingService, ServiceFailure, TokenStore,
};

use std::{
    panic::Location,
    path::PathBuf,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use error_location::ErrorLocation;
use uuid::Uuid;

/// Recording service that records every call and fails on demand.
#[derive(Default)]
pub(crate) struct FakeRecorder {
    start_calls: Mutex<Vec<RecorderConfig>>,
    stop_calls: AtomicUsize,
    pub(crate) fail_start: AtomicBool,
    pub(crate) fail_stop: AtomicBool,
}

impl FakeRecorder {
    pub(crate) fn failing_start() -> Self {
        let recorder = Self::default();
        recorder.fail_start.store(true, Ordering::SeqCst);
        recorder
    }

    pub(crate) fn start_calls(&self) -> Vec<RecorderConfig> {
        self.start_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub(crate) fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

impl RecordingService for FakeRecorder {
    async fn start_video_recording(&self, config: &RecorderConfig) -> Result<(), ServiceFailure> {
        if let Ok(mut calls) = self.start_calls.lock() {
            calls.push(config.clone());
        }
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(ServiceFailure::new("capture device busy"));
        }
        Ok(())
    }

    async fn stop_video_recording(&self) -> Result<(), ServiceFailure> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_stop.load(Ordering::SeqCst) {
            return Err(ServiceFailure::new("encoder did not flush"));
        }
        Ok(())
    }
}

/// Identity service accepting exactly one email/password pair.
pub(crate) struct FakeIdentity {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) token: String,
}

impl FakeIdentity {
    pub(crate) fn accepting(email: &str, password: &str, token: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            token: token.to_string(),
        }
    }
}

impl IdentityProvider for FakeIdentity {
    async fn verify(&self, credentials: &Credentials) -> CoreResult<Identity> {
        if credentials.email != self.email || credentials.password != self.password {
            return Err(CoreError::LoginRejected {
                reason: "unknown email or wrong password".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Identity {
            token: self.token.clone(),
            name: "Test User".to_string(),
            email: self.email.clone(),
        })
    }
}

/// Store whose backing medium is gone.
pub(crate) struct UnavailableStore;

impl TokenStore for UnavailableStore {
    fn get(&self, _key: &str) -> CoreResult<Option<String>> {
        Err(unavailable())
    }

    fn set(&self, _key: &str, _value: &str) -> CoreResult<()> {
        Err(unavailable())
    }

    fn remove(&self, _key: &str) -> CoreResult<()> {
        Err(unavailable())
    }
}

#[track_caller]
fn unavailable() -> CoreError {
    CoreError::PersistenceUnavailable {
        reason: "disk unplugged".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Unique store path in the temp dir, removed on drop.
pub(crate) struct TempStorePath {
    pub(crate) path: PathBuf,
}

impl TempStorePath {
    pub(crate) fn new() -> Self {
        Self {
            path: std::env::temp_dir().join(format!("spinup-store-{}.toml", Uuid::new_v4())),
        }
    }
}

impl Drop for TempStorePath {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
        let _ = std::fs::remove_file(self.path.with_extension("toml.lock"));
    }
}

//! Spinup Core Library
//!
//! Session timer and auth gate for the Spinup monitoring dashboard. The
//! recording itself and credential verification are external services
//! reached through [`RecordingService`] and [`IdentityProvider`].
//!
//! # Example
//!
//! ```no_run
//! use spinup_core::{
//!     CoreResult, MemoryTokenStore, AuthGate, RecorderConfig, RecordingService,
//!     ServiceFailure, SessionController,
//! };
//!
//! use std::sync::Arc;
//!
//! struct Host;
//!
//! impl RecordingService for Host {
//!     async fn start_video_recording(&self, _: &RecorderConfig) -> Result<(), ServiceFailure> {
//!         Ok(())
//!     }
//!     async fn stop_video_recording(&self) -> Result<(), ServiceFailure> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let gate = AuthGate::new(Arc::new(MemoryTokenStore::new()));
//!     if gate.is_authenticated() {
//!         let mut session = SessionController::new(Host, RecorderConfig::default());
//!         session.start().await?;
//!         session.stop().await?;
//!         println!("Recorded {}", session.display());
//!     }
//!     Ok(())
//! }
//! ```

mod auth;
mod error;
mod recording;
mod session;
mod store;

pub use {
    auth::{AuthGate, Credentials, GateState, Identity, IdentityProvider, LoginAction, evaluate},
    error::{CoreError, Result as CoreResult},
    recording::{AudioSource, Container, RecorderConfig, RecordingService, ServiceFailure},
    session::{ElapsedTime, SessionController, SessionState, format_time},
    store::{
        EMAIL_KEY, FileTokenStore, MIN_POLL_INTERVAL, MemoryTokenStore, NAME_KEY, StoreChange,
        StoreWatcher, TOKEN_KEY, TokenStore,
    },
};

use crate::recording::ServiceFailure;

use error_location::ErrorLocation;
use thiserror::Error;

/// Session and authentication errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The external recording service rejected a start request.
    #[error("Recording service failed to start: {source} {location}")]
    ServiceStartFailed {
        /// Failure reported by the recording service.
        #[source]
        source: ServiceFailure,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The external recording service rejected a stop request.
    #[error("Recording service failed to stop: {source} {location}")]
    ServiceStopFailed {
        /// Failure reported by the recording service.
        #[source]
        source: ServiceFailure,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Start was requested while a session is already running.
    #[error("A recording session is already running {location}")]
    SessionAlreadyRunning {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Stop was requested with no running or finished session on display.
    #[error("No recording session to stop {location}")]
    NoSessionToStop {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The persisted key-value store could not be read or written.
    #[error("Persisted store unavailable: {reason} {location}")]
    PersistenceUnavailable {
        /// Description of the storage failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The identity provider refused the supplied credentials.
    #[error("Login rejected: {reason} {location}")]
    LoginRejected {
        /// Description of why the login was refused.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Credentials were missing required fields before verification.
    #[error("Invalid credentials: {reason} {location}")]
    InvalidCredentials {
        /// Which field was missing or malformed.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

use crate::CoreResult;

use std::{fmt, future::Future};

/// What the user typed into the login form.
#[derive(Clone)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Plain-text password. Never logged.
    pub password: String,
}

impl Credentials {
    /// Build credentials from form input.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A verified account, as returned by the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque credential persisted under the `token` key.
    pub token: String,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
}

/// Credential-verification exchange with an identity service.
pub trait IdentityProvider: Send + Sync {
    /// Verify `credentials` and return the matching identity.
    ///
    /// Implementations return `LoginRejected` for bad credentials.
    fn verify(&self, credentials: &Credentials) -> impl Future<Output = CoreResult<Identity>> + Send;
}

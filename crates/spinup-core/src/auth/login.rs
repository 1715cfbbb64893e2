use crate::{
    CoreError, CoreResult,
    auth::{AuthGate, Credentials, GateState, IdentityProvider},
    store::{EMAIL_KEY, NAME_KEY, TOKEN_KEY},
};

use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use tracing::{info, instrument};

/// Login boundary: verifies credentials, persists the identity, flips the gate.
pub struct LoginAction<P> {
    provider: P,
    gate: Arc<AuthGate>,
}

impl<P: IdentityProvider> LoginAction<P> {
    /// Create a login action writing into the gate's store.
    pub fn new(provider: P, gate: Arc<AuthGate>) -> Self {
        Self { provider, gate }
    }

    /// Verify credentials and unlock the gate.
    ///
    /// The profile keys are written before the token, so an unlocked gate
    /// always has them. On any error the gate is left as it was.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for blank input, whatever the provider returns
    /// for a refused login, `PersistenceUnavailable` if the store write fails.
    #[instrument(skip(self))]
    pub async fn login(&self, credentials: &Credentials) -> CoreResult<GateState> {
        if credentials.email.trim().is_empty() {
            return Err(CoreError::InvalidCredentials {
                reason: "email is required".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if credentials.password.is_empty() {
            return Err(CoreError::InvalidCredentials {
                reason: "password is required".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let identity = self.provider.verify(credentials).await?;

        if identity.token.is_empty() {
            return Err(CoreError::LoginRejected {
                reason: "identity service returned an empty token".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let store = self.gate.store();
        store.set(NAME_KEY, &identity.name)?;
        store.set(EMAIL_KEY, &identity.email)?;
        store.set(TOKEN_KEY, &identity.token)?;

        let state = self.gate.reload();

        info!(email = %identity.email, gate = ?state, "Login succeeded");

        Ok(state)
    }
}

//! Local credential verification against configured argon2 hashes.

use crate::{AppError, AppResult, config::AccountConfig};

use std::panic::Location;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use error_location::ErrorLocation;
use spinup_core::{CoreError, CoreResult, Credentials, Identity, IdentityProvider};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Same message for unknown email and wrong password.
const REJECTED: &str = "unknown email or wrong password";

/// Identity provider for the accounts listed in the config file.
///
/// A successful login issues a fresh random token.
pub struct LocalIdentityProvider {
    accounts: Vec<AccountConfig>,
}

impl LocalIdentityProvider {
    /// Create a provider over `accounts`.
    pub fn new(accounts: Vec<AccountConfig>) -> Self {
        Self { accounts }
    }
}

impl IdentityProvider for LocalIdentityProvider {
    #[instrument(skip(self))]
    async fn verify(&self, credentials: &Credentials) -> CoreResult<Identity> {
        let email = credentials.email.trim();

        let Some(account) = self
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned()
        else {
            debug!("No account for email");
            return Err(rejected(REJECTED));
        };

        let password = credentials.password.clone();
        let stored_hash = account.password_hash.clone();

        // Argon2 is deliberately slow; keep it off the runtime threads.
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| rejected(&format!("verification task failed: {}", e)))??;

        if !verified {
            return Err(rejected(REJECTED));
        }

        Ok(Identity {
            token: Uuid::new_v4().to_string(),
            name: account.name,
            email: account.email,
        })
    }
}

fn verify_password(password: &str, stored_hash: &str) -> CoreResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| rejected(&format!("stored password hash is malformed: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[track_caller]
fn rejected(reason: &str) -> CoreError {
    CoreError::LoginRejected {
        reason: reason.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Hash a password into an argon2 PHC string for the config file.
#[track_caller]
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::HashingFailed {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}

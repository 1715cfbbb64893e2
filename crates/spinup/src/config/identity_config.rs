use serde::{Deserialize, Serialize};

/// One account the local identity provider accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Login email.
    pub email: String,
    /// Display name written to the store on login.
    pub name: String,
    /// Argon2 PHC string, as printed by `spinup hash-password`.
    pub password_hash: String,
}

/// Accounts allowed to sign in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Known accounts.
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

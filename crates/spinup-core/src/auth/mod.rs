mod gate;
mod identity;
mod login;

pub use {
    gate::{AuthGate, GateState, evaluate},
    identity::{Credentials, Identity, IdentityProvider},
    login::LoginAction,
};

//! Session store for the Dompet wallet client.
//!
//! The only writer of the bearer credential outside of forced expiry.
//! Sign-in persists the credential through the shared
//! [`dompet_transport::CredentialVault`]; the channel reads the same vault
//! and may clear it when the server rejects a request.

pub mod error;
pub mod store;

pub use error::AuthError;
pub use store::{SessionSnapshot, SessionStatus, SessionStore};

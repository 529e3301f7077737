use dompet_transport::{StorageError, TransportError};
use thiserror::Error;

/// Failure of a sign-in or sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The remote call failed. `message` is display-ready.
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        source: TransportError,
    },

    /// The server accepted the credentials but the token could not be
    /// persisted.
    #[error("failed to persist credential: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message suitable for showing to the user.
    pub fn message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Storage(_) => self.to_string(),
        }
    }
}

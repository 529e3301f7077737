use dompet_transport::TransportError;
use thiserror::Error;

use crate::operation::Operation;

/// Why a wallet command ended in the Rejected state.
///
/// The same message is recorded in the snapshot; the error is returned as
/// well so a caller awaiting the command can react to it directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("{operation} failed: {message}")]
    Rejected {
        operation: Operation,
        message: String,
        #[source]
        source: TransportError,
    },

    #[error("page size must be greater than zero")]
    InvalidPageSize,
}

impl WalletError {
    /// Display-ready message, the same one the snapshot carries.
    pub fn message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::InvalidPageSize => self.to_string(),
        }
    }

    /// Underlying transport failure, if the command reached the network.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Rejected { source, .. } => Some(source),
            Self::InvalidPageSize => None,
        }
    }
}

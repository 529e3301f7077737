use thiserror::Error;

/// Failure of a single request through the channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// A response arrived but could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The server rejected the credential (HTTP 401). The session has been
    /// invalidated by the time the caller sees this.
    #[error("unauthorized: {}", .message.as_deref().unwrap_or("session is no longer valid"))]
    Unauthorized { message: Option<String> },

    /// The server answered with a non-success status.
    #[error("server rejected request (HTTP {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Domain { status: u16, message: Option<String> },

    #[error("credential storage error: {0}")]
    Storage(#[from] StorageError),
}

impl TransportError {
    /// Message supplied by the server in the response envelope, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Domain { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status of the rejection, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Domain { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure of the durable key-value storage backing the credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("storage file is corrupted: {0}")]
    Corruption(String),
}

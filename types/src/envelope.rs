//! The `{status, message, data}` wrapper around every response body.

use serde::{Deserialize, Serialize};

/// Response envelope returned by every endpoint, success or failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Application status code (0 on success).
    pub status: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// The message, if the server sent a non-blank one.
    pub fn message(&self) -> Option<&str> {
        let message = self.message.trim();
        (!message.is_empty()).then_some(message)
    }
}

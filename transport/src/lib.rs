//! Transport channel for the Dompet wallet client.
//!
//! Every remote call goes through one [`Channel`], which:
//! - attaches the bearer credential held by the [`CredentialVault`],
//! - sends exactly once through an [`HttpBackend`] (no retries),
//! - turns a 401 into a forced sign-out plus [`TransportError::Unauthorized`],
//! - decodes the `{status, message, data}` envelope.
//!
//! The credential itself is persisted through the [`TokenStore`] trait so
//! the session layer and the channel share one serialized storage path.

pub mod channel;
pub mod error;
pub mod http;
pub mod reqwest_backend;
pub mod token_store;
pub mod vault;

pub use channel::Channel;
pub use error::{StorageError, TransportError};
pub use http::{HttpBackend, HttpRequest, HttpResponse, Method, MultipartFile, RequestBody};
pub use reqwest_backend::{BackendOptions, ReqwestBackend};
pub use token_store::{FileTokenStore, TokenStore};
pub use vault::{AuthState, CredentialVault};

//! Dompet wallet client.
//!
//! Wires the credential vault, transport channel, gateway, session store and
//! wallet store together from a [`ClientConfig`]. Front ends (the `dompet`
//! CLI, or a UI) hold one [`DompetClient`] and read state from its stores.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;

pub use client::DompetClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use logging::{init_logging, LogFormat};

//! Client configuration with TOML file support.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dompet_transport::BackendOptions;
use dompet_wallet_core::StoreOptions;
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;
use crate::ClientError;

/// Name of the token file inside `data_dir`.
pub const TOKEN_FILE: &str = "session.json";

/// Configuration for a wallet client.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so
/// an empty file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the wallet API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory holding the persisted session.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Transaction history page size.
    #[serde(default = "default_history_page_size")]
    pub history_page_size: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Ignore responses that arrive after a newer one for the same data.
    #[serde(default = "default_true")]
    pub discard_stale_responses: bool,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_base_url() -> String {
    "https://take-home-test-api.nutech-integrasi.com".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./dompet_data")
}

fn default_history_page_size() -> u64 {
    5
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        let config: Self = toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ClientError> {
        toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url must not be empty".into()));
        }
        if self.history_page_size == 0 {
            return Err(ClientError::Config(
                "history_page_size must be greater than zero".into(),
            ));
        }
        self.log_format()?;
        Ok(())
    }

    pub fn log_format(&self) -> Result<LogFormat, ClientError> {
        self.log_format.parse()
    }

    /// Where the persisted session lives.
    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE)
    }

    pub fn backend_options(&self) -> BackendOptions {
        BackendOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            discard_stale_responses: self.discard_stale_responses,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            data_dir: default_data_dir(),
            history_page_size: default_history_page_size(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
            discard_stale_responses: default_true(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

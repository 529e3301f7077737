//! The wired-up client.

use std::sync::Arc;

use dompet_gateway::Gateway;
use dompet_session::SessionStore;
use dompet_transport::{
    Channel, CredentialVault, FileTokenStore, HttpBackend, ReqwestBackend, TokenStore,
};
use dompet_wallet_core::WalletStore;
use tracing::info;

use crate::{ClientConfig, ClientError};

/// One signed-in (or signed-out) wallet client.
///
/// The session store and the wallet store share one gateway, and through
/// it one channel and one credential vault.
pub struct DompetClient {
    config: ClientConfig,
    session: SessionStore,
    wallet: WalletStore,
}

impl DompetClient {
    /// Build a client talking to `config.base_url`, with the session
    /// persisted under `config.data_dir`.
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let backend = ReqwestBackend::new(config.base_url.clone(), &config.backend_options())?;
        let tokens = FileTokenStore::new(config.token_path());
        info!(base_url = %backend.base_url(), "wallet client configured");
        Self::with_backend(Arc::new(backend), Arc::new(tokens), config)
    }

    /// Build a client over caller-supplied infrastructure.
    pub fn with_backend(
        backend: Arc<dyn HttpBackend>,
        tokens: Arc<dyn TokenStore>,
        config: ClientConfig,
    ) -> Result<Self, ClientError> {
        let vault = Arc::new(CredentialVault::open(tokens)?);
        let gateway = Gateway::new(Channel::new(backend, vault.clone()));
        let session = SessionStore::new(gateway.clone(), vault);
        let wallet = WalletStore::new(gateway, config.store_options());
        Ok(Self {
            config,
            session,
            wallet,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn wallet(&self) -> &WalletStore {
        &self.wallet
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Sign out and drop every cached wallet value.
    pub fn sign_out(&self) {
        self.session.sign_out();
        self.wallet.clear();
    }
}

//! Sign-in/sign-out state machine.

use std::sync::Arc;

use dompet_gateway::{Gateway, Registration};
use dompet_transport::{AuthState, CredentialVault, TransportError};
use dompet_types::{Credential, OperationStatus};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::AuthError;

const SIGN_IN_FAILED: &str = "Sign in failed, please try again";
const SIGN_UP_FAILED: &str = "Registration failed, please try again";
const SIGNED_IN: &str = "Signed in";

/// Lifecycle of the two authentication commands plus the last message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStatus {
    pub sign_in: OperationStatus<()>,
    /// Fulfilled with the server's confirmation message.
    pub sign_up: OperationStatus<String>,
    pub message: Option<String>,
}

/// Point-in-time view of the session, combining the vault's auth state
/// with the command lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub auth: AuthState,
    pub sign_in: OperationStatus<()>,
    pub sign_up: OperationStatus<String>,
    pub message: Option<String>,
}

impl SessionSnapshot {
    pub fn is_loading(&self) -> bool {
        self.sign_in.is_pending() || self.sign_up.is_pending()
    }

    pub fn is_error(&self) -> bool {
        self.sign_in.is_rejected() || self.sign_up.is_rejected()
    }
}

pub struct SessionStore {
    gateway: Gateway,
    vault: Arc<CredentialVault>,
    status: watch::Sender<SessionStatus>,
}

impl SessionStore {
    pub fn new(gateway: Gateway, vault: Arc<CredentialVault>) -> Self {
        let (status, _) = watch::channel(SessionStatus::default());
        Self {
            gateway,
            vault,
            status,
        }
    }

    /// Exchange credentials for a token and persist it, replacing any
    /// credential already held.
    ///
    /// A failed attempt leaves the held credential untouched.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Credential, AuthError> {
        self.status.send_modify(|s| {
            s.sign_in = OperationStatus::Pending;
            s.message = None;
        });

        let credential = match self.gateway.login(email, password).await {
            Ok(credential) => credential,
            Err(e) => return Err(self.reject_sign_in(e)),
        };

        if let Err(e) = self.vault.replace(credential.clone()) {
            warn!(error = %e, "signed in but could not persist credential");
            let err = AuthError::Storage(e);
            let message = err.message();
            self.status.send_modify(|s| {
                s.sign_in = OperationStatus::Rejected(message.clone());
                s.message = Some(message);
            });
            return Err(err);
        }

        info!("signed in");
        self.status.send_modify(|s| {
            s.sign_in = OperationStatus::Fulfilled(());
            s.message = Some(SIGNED_IN.to_string());
        });
        Ok(credential)
    }

    fn reject_sign_in(&self, source: TransportError) -> AuthError {
        let message = display_message(&source, SIGN_IN_FAILED);
        warn!(error = %source, "sign in rejected");
        self.status.send_modify(|s| {
            s.sign_in = OperationStatus::Rejected(message.clone());
            s.message = Some(message.clone());
        });
        AuthError::Rejected { message, source }
    }

    /// Register a new account. Does not authenticate.
    pub async fn sign_up(&self, form: &Registration) -> Result<String, AuthError> {
        self.status.send_modify(|s| {
            s.sign_up = OperationStatus::Pending;
            s.message = None;
        });

        match self.gateway.register(form).await {
            Ok(confirmation) => {
                info!("account registered");
                self.status.send_modify(|s| {
                    s.sign_up = OperationStatus::Fulfilled(confirmation.clone());
                    s.message = Some(confirmation.clone());
                });
                Ok(confirmation)
            }
            Err(source) => {
                let message = display_message(&source, SIGN_UP_FAILED);
                warn!(error = %source, "registration rejected");
                self.status.send_modify(|s| {
                    s.sign_up = OperationStatus::Rejected(message.clone());
                    s.message = Some(message.clone());
                });
                Err(AuthError::Rejected { message, source })
            }
        }
    }

    /// Drop the credential and reset the command lifecycle. Never fails
    /// and never touches the network; a storage failure is only logged.
    pub fn sign_out(&self) {
        if let Err(e) = self.vault.clear() {
            warn!(error = %e, "credential removal failed during sign out");
        }
        self.status.send_replace(SessionStatus::default());
        info!("signed out");
    }

    pub fn current_credential(&self) -> Option<Credential> {
        self.vault.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.vault.is_authenticated()
    }

    /// UI acknowledgment: return both commands to idle and drop the message.
    pub fn reset(&self) {
        self.status.send_replace(SessionStatus::default());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let status = self.status.borrow().clone();
        SessionSnapshot {
            auth: self.vault.state(),
            sign_in: status.sign_in,
            sign_up: status.sign_up,
            message: status.message,
        }
    }

    /// Changes to the command lifecycle.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Changes to the authentication state, including forced expiry.
    pub fn subscribe_auth(&self) -> watch::Receiver<AuthState> {
        self.vault.subscribe()
    }

    pub fn vault(&self) -> &Arc<CredentialVault> {
        &self.vault
    }
}

/// Prefer the server's message, otherwise the generic one for the command.
pub(crate) fn display_message(error: &TransportError, fallback: &str) -> String {
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

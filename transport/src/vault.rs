//! The single serialized access point to the persisted credential.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dompet_types::{Credential, TOKEN_KEY};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::token_store::TokenStore;

/// Authentication state as observed by everything downstream of the vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthState {
    /// No credential held.
    SignedOut,
    /// A credential is held and has not been rejected.
    Authenticated,
    /// The server rejected the held credential; it has been cleared.
    Expired,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// Owns the in-memory copy of the credential and its durable persistence.
///
/// At most one credential is held at a time. Every write goes through the
/// internal lock, so persistence and the in-memory copy never diverge
/// between concurrent writers. State changes are published on a `watch`
/// channel.
pub struct CredentialVault {
    store: Arc<dyn TokenStore>,
    current: Mutex<Option<Credential>>,
    state: watch::Sender<AuthState>,
}

impl CredentialVault {
    /// Open the vault, loading the last persisted credential if any.
    pub fn open(store: Arc<dyn TokenStore>) -> Result<Self, StorageError> {
        let current = store
            .load(TOKEN_KEY)?
            .map(Credential::new)
            .filter(|c| !c.is_empty());
        let initial = if current.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::SignedOut
        };
        debug!(authenticated = current.is_some(), "credential vault opened");
        let (state, _) = watch::channel(initial);
        Ok(Self {
            store,
            current: Mutex::new(current),
            state,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Option<Credential>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The credential currently held, if any.
    pub fn current(&self) -> Option<Credential> {
        self.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    pub fn state(&self) -> AuthState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Persist `credential` and make it the active one, replacing any other.
    ///
    /// Nothing changes if persistence fails.
    pub fn replace(&self, credential: Credential) -> Result<(), StorageError> {
        let mut current = self.lock();
        self.store.store(TOKEN_KEY, credential.as_str())?;
        *current = Some(credential);
        self.state.send_replace(AuthState::Authenticated);
        Ok(())
    }

    /// Voluntary sign-out.
    ///
    /// The in-memory credential is dropped even if removing the persisted
    /// copy fails; the error is returned for the caller to report.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut current = self.lock();
        self.drop_locked(&mut current, AuthState::SignedOut)
    }

    /// Forced sign-out after the server rejected `rejected`.
    ///
    /// Only clears when `rejected` is still the active credential, so a
    /// late 401 for a superseded token cannot sign out a fresh session.
    /// Returns whether the vault was cleared.
    pub fn expire(&self, rejected: &Credential) -> Result<bool, StorageError> {
        let mut current = self.lock();
        if current.as_ref() != Some(rejected) {
            debug!("ignoring rejection of a superseded credential");
            return Ok(false);
        }
        self.drop_locked(&mut current, AuthState::Expired)?;
        Ok(true)
    }

    fn drop_locked(
        &self,
        current: &mut MutexGuard<'_, Option<Credential>>,
        next: AuthState,
    ) -> Result<(), StorageError> {
        **current = None;
        self.state.send_replace(next);
        let removed = self.store.remove(TOKEN_KEY);
        if let Err(ref e) = removed {
            warn!(error = %e, "failed to remove persisted credential");
        }
        removed
    }
}

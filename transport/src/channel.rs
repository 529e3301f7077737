//! The one outbound channel every remote call goes through.

use std::sync::Arc;

use dompet_types::ApiEnvelope;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::http::{HttpBackend, HttpRequest, HttpResponse, MultipartFile};
use crate::vault::CredentialVault;

const AUTHORIZATION: &str = "Authorization";
const HTTP_UNAUTHORIZED: u16 = 401;

/// Outbound HTTP channel with centralized credential handling.
#[derive(Clone)]
pub struct Channel {
    backend: Arc<dyn HttpBackend>,
    vault: Arc<CredentialVault>,
}

impl Channel {
    pub fn new(backend: Arc<dyn HttpBackend>, vault: Arc<CredentialVault>) -> Self {
        Self { backend, vault }
    }

    pub fn vault(&self) -> &Arc<CredentialVault> {
        &self.vault
    }

    /// Send `request` once and decode the response envelope.
    ///
    /// A 401 clears the credential that was attached before the error is
    /// returned; the caller still receives [`TransportError::Unauthorized`].
    pub async fn send<T: DeserializeOwned>(
        &self,
        mut request: HttpRequest,
    ) -> Result<ApiEnvelope<T>, TransportError> {
        let credential = self.vault.current();
        if let Some(ref credential) = credential {
            request
                .headers
                .push((AUTHORIZATION.to_string(), credential.bearer_header()));
        }
        let method = request.method;
        let path = request.path.clone();
        debug!(%method, %path, authenticated = credential.is_some(), "sending request");

        let response = self.backend.execute(request).await?;

        if response.status == HTTP_UNAUTHORIZED {
            let message = envelope_message(&response);
            warn!(%method, %path, "server rejected credential");
            if let Some(rejected) = credential {
                match self.vault.expire(&rejected) {
                    Ok(true) => warn!("session invalidated, credential cleared"),
                    Ok(false) => {}
                    Err(e) => warn!(error = %e, "session invalidated but credential removal failed"),
                }
            }
            return Err(TransportError::Unauthorized { message });
        }

        if !response.is_success() {
            let message = envelope_message(&response);
            debug!(%method, %path, status = response.status, "request rejected");
            return Err(TransportError::Domain {
                status: response.status,
                message,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| {
            TransportError::Malformed(format!("{method} {path}: invalid response envelope: {e}"))
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiEnvelope<T>, TransportError> {
        self.send(HttpRequest::get(path)).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>, TransportError> {
        self.send(HttpRequest::post(path).with_json(to_json(body)?))
            .await
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>, TransportError> {
        self.send(HttpRequest::put(path).with_json(to_json(body)?))
            .await
    }

    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        file: MultipartFile,
    ) -> Result<ApiEnvelope<T>, TransportError> {
        self.send(HttpRequest::put(path).with_multipart(file)).await
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, TransportError> {
    serde_json::to_value(body)
        .map_err(|e| TransportError::Malformed(format!("request body not serializable: {e}")))
}

/// Best-effort extraction of the envelope message from an error response.
fn envelope_message(response: &HttpResponse) -> Option<String> {
    serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(&response.body)
        .ok()
        .and_then(|envelope| envelope.message().map(str::to_string))
}

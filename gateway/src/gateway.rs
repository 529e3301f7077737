//! The typed gateway over the transport channel.

use std::num::NonZeroU64;

use dompet_transport::{Channel, HttpRequest, MultipartFile, TransportError};
use dompet_types::{
    ApiEnvelope, Balance, Banner, Credential, HistoryPage, Profile, ProfileImage, Service,
    TopUpAmount, TransactionReceipt,
};
use tracing::debug;

use crate::requests::{
    BalanceData, LoginRequest, ProfileUpdateRequest, Registration, TokenData, TopUpRequest,
    TransactionRequest,
};
use crate::routes;

/// Stateless, typed access to every remote operation.
#[derive(Clone)]
pub struct Gateway {
    channel: Channel,
}

impl Gateway {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Create an account. Returns the server's confirmation message.
    pub async fn register(&self, form: &Registration) -> Result<String, TransportError> {
        let envelope: ApiEnvelope<serde_json::Value> =
            self.channel.post_json(routes::REGISTRATION, form).await?;
        Ok(envelope.message)
    }

    /// Exchange credentials for a bearer token. Does not persist anything.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential, TransportError> {
        let envelope: ApiEnvelope<TokenData> = self
            .channel
            .post_json(routes::LOGIN, &LoginRequest { email, password })
            .await?;
        let token = into_data(envelope, routes::LOGIN)?.token;
        let credential = Credential::new(token);
        if credential.is_empty() {
            return Err(TransportError::Malformed(format!(
                "{}: server returned an empty token",
                routes::LOGIN
            )));
        }
        Ok(credential)
    }

    pub async fn get_profile(&self) -> Result<Profile, TransportError> {
        into_data(self.channel.get(routes::PROFILE).await?, routes::PROFILE)
    }

    pub async fn get_balance(&self) -> Result<Balance, TransportError> {
        let data: BalanceData = into_data(self.channel.get(routes::BALANCE).await?, routes::BALANCE)?;
        Ok(data.balance)
    }

    /// Service catalog, in server order.
    pub async fn get_services(&self) -> Result<Vec<Service>, TransportError> {
        into_data(self.channel.get(routes::SERVICES).await?, routes::SERVICES)
    }

    /// Banner list, in server order.
    pub async fn get_banners(&self) -> Result<Vec<Banner>, TransportError> {
        into_data(self.channel.get(routes::BANNER).await?, routes::BANNER)
    }

    /// Top up the wallet. Returns the new balance as computed by the server.
    pub async fn top_up(&self, amount: TopUpAmount) -> Result<Balance, TransportError> {
        let envelope = self
            .channel
            .post_json(routes::TOPUP, &TopUpRequest { top_up_amount: amount })
            .await?;
        let data: BalanceData = into_data(envelope, routes::TOPUP)?;
        Ok(data.balance)
    }

    /// Pay for a service.
    pub async fn make_transaction(
        &self,
        service_code: &str,
    ) -> Result<TransactionReceipt, TransportError> {
        let envelope = self
            .channel
            .post_json(routes::TRANSACTION, &TransactionRequest { service_code })
            .await?;
        into_data(envelope, routes::TRANSACTION)
    }

    /// One page of history, most recent first.
    pub async fn get_transaction_history(
        &self,
        offset: u64,
        limit: NonZeroU64,
    ) -> Result<HistoryPage, TransportError> {
        debug!(offset, limit = limit.get(), "fetching history page");
        let request = HttpRequest::get(routes::TRANSACTION_HISTORY)
            .with_query("offset", offset)
            .with_query("limit", limit.get());
        into_data(
            self.channel.send(request).await?,
            routes::TRANSACTION_HISTORY,
        )
    }

    pub async fn update_profile(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Profile, TransportError> {
        let envelope = self
            .channel
            .put_json(
                routes::PROFILE_UPDATE,
                &ProfileUpdateRequest {
                    first_name,
                    last_name,
                },
            )
            .await?;
        into_data(envelope, routes::PROFILE_UPDATE)
    }

    pub async fn upload_profile_image(
        &self,
        image: &ProfileImage,
    ) -> Result<Profile, TransportError> {
        let file = MultipartFile {
            field: routes::PROFILE_IMAGE_FIELD.to_string(),
            file_name: image.file_name().to_string(),
            content_type: image.format().mime_type().to_string(),
            bytes: image.bytes().to_vec(),
        };
        into_data(
            self.channel.put_multipart(routes::PROFILE_IMAGE, file).await?,
            routes::PROFILE_IMAGE,
        )
    }
}

/// Unwrap the envelope payload; a success without data is malformed.
fn into_data<T>(envelope: ApiEnvelope<T>, route: &str) -> Result<T, TransportError> {
    envelope
        .data
        .ok_or_else(|| TransportError::Malformed(format!("{route}: response has no data")))
}

//! Wire shapes of request bodies and of response `data` wrappers.

use dompet_types::{Balance, TopUpAmount};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sign-up form.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct TokenData {
    pub token: String,
}

#[derive(Deserialize)]
pub(crate) struct BalanceData {
    pub balance: Balance,
}

#[derive(Serialize)]
pub(crate) struct TopUpRequest {
    pub top_up_amount: TopUpAmount,
}

#[derive(Serialize)]
pub(crate) struct TransactionRequest<'a> {
    pub service_code: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ProfileUpdateRequest<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
}

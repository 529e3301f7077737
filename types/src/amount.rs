//! Balance and top-up amount types.
//!
//! The currency has no minor unit, so every amount is a plain integer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AmountError;

/// Smallest top-up the wallet UI suggests.
pub const TOP_UP_MIN: u64 = 10_000;
/// Largest top-up the wallet UI suggests.
pub const TOP_UP_MAX: u64 = 1_000_000;
/// Quick-pick amounts offered by the top-up screen.
pub const TOP_UP_PRESETS: [u64; 6] = [10_000, 20_000, 50_000, 100_000, 250_000, 500_000];

/// Wallet balance as reported by the server.
///
/// Only ever produced from a server response; the client never derives a new
/// balance arithmetically.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Balance(u64);

impl Balance {
    pub const ZERO: Self = Self(0);

    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> u64 {
        self.0
    }

    /// Whether a payment of `tariff` could be covered by this balance.
    pub fn covers(&self, tariff: u64) -> bool {
        self.0 >= tariff
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A positive top-up amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TopUpAmount(u64);

impl TopUpAmount {
    pub fn new(amount: u64) -> Result<Self, AmountError> {
        if amount == 0 {
            return Err(AmountError::Zero);
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> u64 {
        self.0
    }

    /// Whether the amount falls inside `[TOP_UP_MIN, TOP_UP_MAX]`.
    ///
    /// The server is the authority on limits; this is only the range the
    /// top-up screen enforces before dispatching.
    pub fn within_recommended_range(&self) -> bool {
        (TOP_UP_MIN..=TOP_UP_MAX).contains(&self.0)
    }

    /// Like [`TopUpAmount::new`], additionally enforcing the recommended range.
    pub fn checked(amount: u64) -> Result<Self, AmountError> {
        let value = Self::new(amount)?;
        if !value.within_recommended_range() {
            return Err(AmountError::OutOfRange {
                amount,
                min: TOP_UP_MIN,
                max: TOP_UP_MAX,
            });
        }
        Ok(value)
    }
}

impl TryFrom<u64> for TopUpAmount {
    type Error = AmountError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for TopUpAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

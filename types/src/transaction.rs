//! Transaction ledger records and history pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money added to the wallet.
    Topup,
    /// Money spent on a service.
    Payment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Topup => "TOPUP",
            Self::Payment => "PAYMENT",
        }
    }

    /// Whether the entry increases the balance.
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Topup)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry of the server-side ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique key.
    pub invoice_number: String,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub description: String,
    pub total_amount: u64,
    pub created_on: DateTime<Utc>,
}

/// Confirmation returned by the server after a successful payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub invoice_number: String,
    pub service_code: String,
    pub service_name: String,
    pub transaction_type: TransactionType,
    pub total_amount: u64,
    pub created_on: DateTime<Utc>,
}

/// One page of transaction history, most recent first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub offset: u64,
    pub limit: u64,
    #[serde(default)]
    pub records: Vec<TransactionRecord>,
}

impl HistoryPage {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

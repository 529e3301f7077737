//! Operation families and their lifecycle table.

use std::fmt;

use dompet_types::OperationStatus;

/// One family of asynchronous wallet commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Profile,
    Balance,
    Services,
    Banners,
    TopUp,
    Transaction,
    History,
    UpdateProfile,
    UploadImage,
}

impl Operation {
    pub const COUNT: usize = 9;

    pub const ALL: [Operation; Self::COUNT] = [
        Operation::Profile,
        Operation::Balance,
        Operation::Services,
        Operation::Banners,
        Operation::TopUp,
        Operation::Transaction,
        Operation::History,
        Operation::UpdateProfile,
        Operation::UploadImage,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Balance => "balance",
            Self::Services => "services",
            Self::Banners => "banners",
            Self::TopUp => "top_up",
            Self::Transaction => "transaction",
            Self::History => "history",
            Self::UpdateProfile => "update_profile",
            Self::UploadImage => "upload_image",
        }
    }

    /// Shown when a failure carries no server message.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Profile => "Failed to load profile",
            Self::Balance => "Failed to load balance",
            Self::Services => "Failed to load services",
            Self::Banners => "Failed to load banners",
            Self::TopUp => "Top up failed",
            Self::Transaction => "Payment failed",
            Self::History => "Failed to load transaction history",
            Self::UpdateProfile => "Failed to update profile",
            Self::UploadImage => "Failed to update profile image",
        }
    }

    /// Shown on fulfilment. Plain fetches have none.
    pub fn success_message(&self) -> Option<&'static str> {
        match self {
            Self::TopUp => Some("Top up succeeded"),
            Self::Transaction => Some("Payment succeeded"),
            Self::UpdateProfile => Some("Profile updated"),
            Self::UploadImage => Some("Profile image updated"),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of every operation family.
///
/// Payloads live in the snapshot's cache slots, so statuses here carry no
/// data of their own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationTable {
    statuses: [OperationStatus<()>; Operation::COUNT],
}

impl OperationTable {
    pub fn get(&self, op: Operation) -> &OperationStatus<()> {
        &self.statuses[op.index()]
    }

    pub(crate) fn set(&mut self, op: Operation, status: OperationStatus<()>) {
        self.statuses[op.index()] = status;
    }

    pub fn is_pending(&self, op: Operation) -> bool {
        self.get(op).is_pending()
    }

    pub fn any_pending(&self) -> bool {
        self.statuses.iter().any(OperationStatus::is_pending)
    }

    /// Families currently in flight.
    pub fn pending(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.is_pending(*op))
            .collect()
    }

    pub(crate) fn reset_all(&mut self) {
        self.statuses = Default::default();
    }
}

//! Lifecycle of one asynchronous operation.

/// Tagged state of an async operation family.
///
/// `Idle -> Pending -> {Fulfilled, Rejected} -> (reset) -> Idle`. A new
/// dispatch may start from any terminal state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationStatus<T> {
    Idle,
    Pending,
    Fulfilled(T),
    /// Display-ready failure message.
    Rejected(String),
}

impl<T> OperationStatus<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Fulfilled or rejected.
    pub fn is_settled(&self) -> bool {
        self.is_fulfilled() || self.is_rejected()
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Fulfilled(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Fulfilled(_) => "fulfilled",
            Self::Rejected(_) => "rejected",
        }
    }
}

impl<T> Default for OperationStatus<T> {
    fn default() -> Self {
        Self::Idle
    }
}

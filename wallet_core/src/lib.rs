//! Wallet state store for the Dompet wallet client.
//!
//! Provides the client-side cache a wallet UI renders from:
//! - Profile, balance, service catalog and banners
//! - The transaction ledger with its pagination cursor
//! - One Idle/Pending/Fulfilled/Rejected lifecycle per operation family
//!
//! State is published as an immutable [`WalletSnapshot`] on a
//! `tokio::sync::watch` channel. Every transition is applied in a single
//! step, so subscribers never observe a half-applied update.

pub mod error;
pub mod ledger;
pub mod operation;
pub mod pagination;
pub mod snapshot;
pub mod store;

pub use error::WalletError;
pub use ledger::{Ledger, LedgerCursor};
pub use operation::{Operation, OperationTable};
pub use snapshot::{PaymentOutcome, WalletSnapshot};
pub use store::{StoreOptions, WalletStore};

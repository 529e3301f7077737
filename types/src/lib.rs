//! Fundamental types for the Dompet wallet client.
//!
//! This crate defines the data model shared across every other crate in the
//! workspace: the bearer credential, balance and amounts, profile and profile
//! images, the service catalog, banners, transaction ledger records the
//! response envelope every remote call is wrapped in, and the lifecycle
//! status shared by every asynchronous operation.

pub mod amount;
pub mod catalog;
pub mod credential;
pub mod envelope;
pub mod error;
pub mod profile;
pub mod status;
pub mod transaction;

pub use amount::{Balance, TopUpAmount, TOP_UP_MAX, TOP_UP_MIN, TOP_UP_PRESETS};
pub use catalog::{Banner, Service};
pub use credential::{Credential, TOKEN_KEY};
pub use envelope::ApiEnvelope;
pub use error::{AmountError, ImageError};
pub use profile::{ImageFormat, Profile, ProfileImage, MAX_PROFILE_IMAGE_BYTES};
pub use status::OperationStatus;
pub use transaction::{HistoryPage, TransactionReceipt, TransactionRecord, TransactionType};

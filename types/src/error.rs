//! Validation errors raised while constructing typed requests.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount must be greater than zero")]
    Zero,

    #[error("amount {amount} outside allowed range {min}..={max}")]
    OutOfRange { amount: u64, min: u64, max: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("unsupported image format: only JPEG and PNG are allowed")]
    UnsupportedFormat,

    #[error("image too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("image is empty")]
    Empty,
}

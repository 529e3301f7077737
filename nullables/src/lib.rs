//! Nullable infrastructure for deterministic testing.
//!
//! The wallet client's external dependencies (the HTTP backend and the
//! durable credential storage) sit behind traits. This crate provides
//! test-friendly implementations that:
//! - Return scripted values
//! - Record what they were asked to do
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod http;
pub mod token_store;

pub use http::{DeferredResponse, NullHttp};
pub use token_store::NullTokenStore;

//! Shared utilities for the Dompet wallet client: Rupiah amounts and WIB
//! timestamps as the wallet displays them.

pub mod format;
pub mod time;

pub use format::{format_rupiah, group_thousands};
pub use time::format_wib;

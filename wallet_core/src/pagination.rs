//! Offset arithmetic for the transaction ledger.
//!
//! The remote API pages by `offset`/`limit` and never reports a total, so
//! the end of the ledger is inferred from page length alone.

use std::num::NonZeroU64;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: NonZeroU64 = match NonZeroU64::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Offset of the page after one requested at `request_offset` that
/// returned `returned` records.
///
/// Advances by what arrived, not by what was asked for, so a short final
/// page moves the cursor to the true end.
pub fn next_offset(request_offset: u64, returned: usize) -> u64 {
    request_offset.saturating_add(returned as u64)
}

/// Whether another page may follow one that returned `returned` records.
///
/// A full page is assumed to have a successor. When the ledger length is an
/// exact multiple of `limit` this costs one extra, empty fetch.
pub fn has_more(returned: usize, limit: NonZeroU64) -> bool {
    returned as u64 >= limit.get()
}

//! Accumulated transaction history and its cursor.

use std::num::NonZeroU64;

use dompet_types::TransactionRecord;

use crate::pagination;

/// Where the next history page starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerCursor {
    /// Number of records accumulated when pages are consumed in order from 0.
    pub offset: u64,
    /// Limit of the last applied page; `None` before the first page.
    pub page_size: Option<NonZeroU64>,
    /// Heuristic: the last page was full.
    pub has_more: bool,
}

impl Default for LedgerCursor {
    fn default() -> Self {
        Self {
            offset: 0,
            page_size: None,
            has_more: true,
        }
    }
}

/// The client's view of the server ledger, most recent first.
///
/// Pages at offset 0 replace the accumulation; later pages are appended as
/// they arrive. Overlapping or out-of-order offsets are not reconciled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<TransactionRecord>,
    cursor: LedgerCursor,
}

impl Ledger {
    /// Forget every record and rewind the cursor.
    pub fn reset(&mut self) {
        self.records.clear();
        self.cursor = LedgerCursor::default();
    }

    /// Fold one page, requested at `offset` with `limit`, into the ledger.
    pub fn apply_page(&mut self, offset: u64, limit: NonZeroU64, records: Vec<TransactionRecord>) {
        let returned = records.len();
        if offset == 0 {
            self.records = records;
        } else {
            self.records.extend(records);
        }
        self.cursor = LedgerCursor {
            offset: pagination::next_offset(offset, returned),
            page_size: Some(limit),
            has_more: pagination::has_more(returned, limit),
        };
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn cursor(&self) -> LedgerCursor {
        self.cursor
    }

    pub fn offset(&self) -> u64 {
        self.cursor.offset
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//! Timestamp formatting helpers.

use chrono::{DateTime, Datelike, TimeDelta, Timelike, Utc};

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Western Indonesia Time, UTC+7.
const WIB_OFFSET_SECS: i64 = 7 * 3600;

/// Format a UTC timestamp as Jakarta local time, e.g. `17 Agustus 2023 17:10 WIB`.
pub fn format_wib(at: DateTime<Utc>) -> String {
    let local = at.naive_utc() + TimeDelta::seconds(WIB_OFFSET_SECS);
    format!(
        "{} {} {} {:02}:{:02} WIB",
        local.day(),
        MONTHS[local.month0() as usize],
        local.year(),
        local.hour(),
        local.minute()
    )
}

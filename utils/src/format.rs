//! Currency display helpers.

/// Group digits in threes with `.` separators (`1250000` -> `1.250.000`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Render an amount as Indonesian Rupiah, e.g. `Rp 1.250.000`.
pub fn format_rupiah(value: u64) -> String {
    format!("Rp {}", group_thousands(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1.000");
        assert_eq!(group_thousands(10_000), "10.000");
        assert_eq!(group_thousands(1_250_000), "1.250.000");
    }

    #[test]
    fn rupiah_prefix() {
        assert_eq!(format_rupiah(50_000), "Rp 50.000");
    }
}

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a money amount from extracted text into a Decimal.
///
/// Handles formats like:
/// - "10.00" -> 10.00
/// - "1,234.56" -> 1234.56 (thousands separators stripped)
/// - "$1,234.56" -> 1234.56
///
/// Returns None on anything that doesn't parse. Callers treat that as
/// "line not recognized" and move on; a bad token never aborts a scan.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().trim_start_matches('$').replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Parse an integer quantity. None on failure, same policy as amounts.
pub fn parse_qty(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

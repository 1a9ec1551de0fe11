//! Currency amount parsing
//!
//! Receipts carry amounts as currency-prefixed strings ("₹1,429.00") with
//! "N/A" standing in for missing fields. Parsing is total: anything that is
//! not a number comes back as 0.0, never an error, since partially-extracted
//! receipts are the common case.

/// Currency symbols stripped before numeric parsing
const CURRENCY_SYMBOLS: &[char] = &['₹', '$', '€', '£'];

/// Parse a raw amount string to a numeric value.
///
/// Strips a currency symbol and thousands separators; "N/A", empty, and
/// malformed inputs all normalize to 0.0.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "N/A" {
        return 0.0;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',')
        .collect();

    cleaned.trim().parse::<f64>().unwrap_or(0.0)
}

/// Round to two decimal places (monetary display precision)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place (percentage display precision)
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_amount("199.00"), 199.0);
        assert_eq!(parse_amount("0"), 0.0);
    }

    #[test]
    fn test_parse_currency_prefixed() {
        assert_eq!(parse_amount("₹199.00"), 199.0);
        assert_eq!(parse_amount("$12.50"), 12.5);
        assert_eq!(parse_amount("€7"), 7.0);
    }

    #[test]
    fn test_parse_thousands_separators() {
        assert_eq!(parse_amount("₹1,429.00"), 1429.0);
        assert_eq!(parse_amount("1,000,000"), 1_000_000.0);
    }

    #[test]
    fn test_parse_sentinel_and_garbage() {
        assert_eq!(parse_amount("N/A"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("free"), 0.0);
        assert_eq!(parse_amount("₹abc"), 0.0);
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(parse_amount("  ₹35.00  "), 35.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(25.004), 25.0);
        assert_eq!(round2(25.005001), 25.01);
        assert_eq!(round2(-1.005001), -1.01);
        assert_eq!(round2(50.0), 50.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round1(66.66), 66.7);
    }
}

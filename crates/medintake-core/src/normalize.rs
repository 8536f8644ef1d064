//! Value normalisation for fields captured out of OCR text.
//!
//! Captured values arrive with whatever punctuation the scan produced. These
//! helpers bring them into one canonical shape per kind:
//!
//! - Currency: `"1,234.00"` → `"1234.00"` (thousands separators and `$` dropped)
//! - SSN: `"123 45 6789"` → `"123-45-6789"`
//! - Phone: `"555.123.4567"` → `"(555) 123-4567"`
//! - Drug tier amount: `"25%"` → (`"25"`, `%`), `"$1,047"` → (`"1047"`, `$`)
//! - Frequency: `"per calendar year"` → `"yearly"`
//!
//! Values that cannot be brought into shape are returned trimmed rather than
//! rejected; extraction is best-effort.

use crate::fields::AmountKind;

/// Strip `$`, thousands separators and whitespace from a currency amount.
pub fn strip_currency(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect()
}

/// Normalise a 9-digit SSN to `XXX-XX-XXXX`.
pub fn normalize_ssn(s: &str) -> String {
    let digits = digits_of(s);
    if digits.len() == 9 {
        format!("{}-{}-{}", &digits[..3], &digits[3..5], &digits[5..])
    } else {
        s.trim().to_string()
    }
}

/// Normalise a US phone number to `(XXX) XXX-XXXX`.
///
/// A leading country code `1` is dropped.
pub fn normalize_phone(s: &str) -> String {
    let mut digits = digits_of(s);
    if digits.len() == 11 && digits.starts_with('1') {
        digits.remove(0);
    }
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        s.trim().to_string()
    }
}

/// Split a drug-tier amount into its numeric part and kind.
///
/// The kind is `%` when the raw capture contains a `%` anywhere, `$` otherwise.
pub fn split_tier_amount(s: &str) -> (String, AmountKind) {
    let kind = if s.contains('%') {
        AmountKind::Percent
    } else {
        AmountKind::Dollar
    };
    let value: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    (value, kind)
}

/// Canonical frequency word for an allowance period.
pub fn normalize_frequency(s: &str) -> String {
    let lower = s.trim().to_ascii_lowercase();
    if lower.contains("year") || lower.starts_with("annual") {
        "yearly".to_string()
    } else if lower.contains("quarter") {
        "quarterly".to_string()
    } else if lower.contains("month") {
        "monthly".to_string()
    } else if lower.contains("week") {
        "weekly".to_string()
    } else {
        collapse_whitespace(&lower)
    }
}

/// Split a comma/semicolon separated list, trim each item, rejoin with `", "`.
pub fn normalize_list(s: &str) -> String {
    s.split([',', ';'])
        .map(|item| collapse_whitespace(item.trim().trim_end_matches('.')))
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn digits_of(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_drops_separators() {
        assert_eq!(strip_currency("1,234.00"), "1234.00");
        assert_eq!(strip_currency("$ 45.00"), "45.00");
        assert_eq!(strip_currency("0"), "0");
        assert_eq!(strip_currency("12,500"), "12500");
    }

    #[test]
    fn ssn_formats() {
        assert_eq!(normalize_ssn("123456789"), "123-45-6789");
        assert_eq!(normalize_ssn("123 45 6789"), "123-45-6789");
        assert_eq!(normalize_ssn("123-45-6789"), "123-45-6789");
    }

    #[test]
    fn ssn_wrong_length_left_trimmed() {
        assert_eq!(normalize_ssn(" 12345 "), "12345");
    }

    #[test]
    fn phone_formats() {
        assert_eq!(normalize_phone("5551234567"), "(555) 123-4567");
        assert_eq!(normalize_phone("555.123.4567"), "(555) 123-4567");
        assert_eq!(normalize_phone("(555)123-4567"), "(555) 123-4567");
        assert_eq!(normalize_phone("1-555-123-4567"), "(555) 123-4567");
    }

    #[test]
    fn phone_wrong_length_left_trimmed() {
        assert_eq!(normalize_phone("123-4567"), "123-4567");
    }

    #[test]
    fn tier_amount_kind_detection() {
        assert_eq!(split_tier_amount("25%"), ("25".into(), AmountKind::Percent));
        assert_eq!(split_tier_amount("33 %"), ("33".into(), AmountKind::Percent));
        assert_eq!(split_tier_amount("$10"), ("10".into(), AmountKind::Dollar));
        assert_eq!(
            split_tier_amount("$1,047.50"),
            ("1047.50".into(), AmountKind::Dollar)
        );
    }

    #[test]
    fn frequency_words() {
        assert_eq!(normalize_frequency("calendar year"), "yearly");
        assert_eq!(normalize_frequency("Year"), "yearly");
        assert_eq!(normalize_frequency("annually"), "yearly");
        assert_eq!(normalize_frequency("quarter"), "quarterly");
        assert_eq!(normalize_frequency("month"), "monthly");
    }

    #[test]
    fn list_items_trimmed_and_rejoined() {
        assert_eq!(normalize_list("King,  Pierce ; Snohomish."), "King, Pierce, Snohomish");
        assert_eq!(normalize_list(" , "), "");
    }
}

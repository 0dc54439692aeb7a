//! Numeric parsing and display formatting.

/// Parses a price cell, ignoring `,` thousands separators.
///
/// Surrounding whitespace is allowed. Empty cells and non-finite results
/// (`NaN`, `inf`) are rejected.
pub fn parse_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|&ch| ch != ',').collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Formats `value` with `decimals` places and `,` thousands separators.
///
/// `1234.5` → `1,234.50` for two decimals.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match magnitude.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (magnitude.as_str(), None),
    };

    let digits = int_part.len();
    let mut out = String::with_capacity(magnitude.len() + digits / 3 + 1);
    let is_zero = magnitude.chars().all(|ch| ch == '0' || ch == '.');
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (digits - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_thousands_separators() {
        assert_eq!(parse_value("1,234.50"), Some(1234.50));
        assert_eq!(parse_value("1,050.75"), Some(1050.75));
        assert_eq!(parse_value(" 12,345,678 "), Some(12_345_678.0));
        assert_eq!(parse_value("-3.5"), Some(-3.5));
        assert_eq!(parse_value("1e3"), Some(1000.0));
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(parse_value("N/A"), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("   "), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("$100"), None);
    }

    #[test]
    fn formats_with_grouping() {
        assert_eq!(format_thousands(1234.5, 2), "1,234.50");
        assert_eq!(format_thousands(100.0, 2), "100.00");
        assert_eq!(format_thousands(999.999, 2), "1,000.00");
        assert_eq!(format_thousands(-1_234_567.891, 2), "-1,234,567.89");
        assert_eq!(format_thousands(0.0, 2), "0.00");
        assert_eq!(format_thousands(-0.001, 2), "0.00");
        assert_eq!(format_thousands(123_456.0, 0), "123,456");
    }
}

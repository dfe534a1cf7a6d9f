/// Coerce a raw cell string into a reading.
///
/// Handles formats like:
/// - "68" -> Some(68.0)
/// - " -3.5 " -> Some(-3.5)
/// - "1.2e2" -> Some(120.0)
/// - "", "n/a", "ALARM", "NaN", "inf" -> None
///
/// Anything that is not a plain finite number is treated as missing, never
/// as zero.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer() {
        assert_eq!(parse_number("68"), Some(68.0));
    }

    #[test]
    fn test_decimal_and_sign() {
        assert_eq!(parse_number("-3.5"), Some(-3.5));
        assert_eq!(parse_number("+0.25"), Some(0.25));
    }

    #[test]
    fn test_scientific() {
        assert_eq!(parse_number("1.2e2"), Some(120.0));
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(parse_number("  72  "), Some(72.0));
    }

    #[test]
    fn test_empty_returns_none() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
    }

    #[test]
    fn test_text_returns_none() {
        assert_eq!(parse_number("ALARM"), None);
        assert_eq!(parse_number("40 PSI"), None);
    }

    #[test]
    fn test_non_finite_returns_none() {
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-infinity"), None);
    }
}

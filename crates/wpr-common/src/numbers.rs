//! Lenient note-count parsing.

/// Parses a note count.
///
/// Accepts integers and decimals (fractions are truncated, negatives clamp to
/// zero). Returns `None` for blank or non-numeric text so the caller can count
/// the coercion.
///
/// # Examples
///
/// ```
/// use wpr_common::parse_count;
///
/// assert_eq!(parse_count("3"), Some(3));
/// assert_eq!(parse_count(" 4.0 "), Some(4));
/// assert_eq!(parse_count("-2"), Some(0));
/// assert_eq!(parse_count("x"), None);
/// ```
pub fn parse_count(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(u32::try_from(n.max(0)).unwrap_or(u32::MAX));
    }
    let n = trimmed.parse::<f64>().ok()?;
    if !n.is_finite() {
        return None;
    }
    if n <= 0.0 {
        return Some(0);
    }
    if n >= f64::from(u32::MAX) {
        return Some(u32::MAX);
    }
    Some(n.trunc() as u32)
}

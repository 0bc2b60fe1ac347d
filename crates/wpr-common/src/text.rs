//! Text normalization shared by the resolver and the normalizer.

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-cases and collapses whitespace.
///
/// Used for both header matching and categorical cell values, so
/// `" notas   atendidas "` and `"NOTAS ATENDIDAS"` compare equal.
pub fn normalize_label(value: &str) -> String {
    collapse_whitespace(value).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_label_collapses_and_uppercases() {
        assert_eq!(normalize_label("  notas \t atendidas "), "NOTAS ATENDIDAS");
        assert_eq!(normalize_label("são paulo"), "SÃO PAULO");
        assert_eq!(normalize_label("   "), "");
    }
}

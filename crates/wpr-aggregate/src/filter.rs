//! Exact-match attribute filters with the `TOTAL` sentinel.

use std::collections::BTreeSet;

use wpr_common::normalize_label;
use wpr_model::TOTAL_FILTER;

/// True when a selection places no restriction: empty, or contains `TOTAL`.
pub fn is_unrestricted(selection: &[String]) -> bool {
    selection.is_empty()
        || selection
            .iter()
            .any(|value| normalize_label(value) == TOTAL_FILTER)
}

/// A compiled type or locality selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelFilter {
    All,
    OneOf(BTreeSet<String>),
}

impl LabelFilter {
    pub fn new(selection: &[String]) -> Self {
        if is_unrestricted(selection) {
            Self::All
        } else {
            Self::OneOf(selection.iter().map(|v| normalize_label(v)).collect())
        }
    }

    /// `value` is expected already normalized, as records carry it.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::OneOf(allowed) => allowed.contains(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn total_sentinel_disables_filter() {
        assert!(is_unrestricted(&[]));
        assert!(is_unrestricted(&strings(&["CORRETIVA", "total"])));
        assert_eq!(LabelFilter::new(&strings(&["TOTAL"])), LabelFilter::All);
    }

    #[test]
    fn selection_is_exact_after_normalization() {
        let filter = LabelFilter::new(&strings(&[" centro "]));
        assert!(filter.matches("CENTRO"));
        assert!(!filter.matches("CENTRO SUL"));
        assert!(!filter.matches(""));
    }
}

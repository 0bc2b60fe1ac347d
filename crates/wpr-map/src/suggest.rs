//! "Did you mean" hints for unresolved roles.

use rapidfuzz::distance::jaro_winkler;

use crate::resolver::normalize_header;

/// Similarity a header must reach before it is offered as a hint.
const MIN_SIMILARITY: f64 = 0.6;

/// Returns the header most similar to any candidate, if it is close enough.
///
/// Ties keep the earlier header.
pub fn closest_header(headers: &[String], candidates: &[String]) -> Option<String> {
    let wanted: Vec<String> = candidates
        .iter()
        .map(|c| normalize_header(c))
        .filter(|c| !c.is_empty())
        .collect();

    let mut best: Option<(f64, &String)> = None;
    for header in headers {
        let normalized = normalize_header(header);
        if normalized.is_empty() {
            continue;
        }
        let score = wanted
            .iter()
            .map(|candidate| jaro_winkler::similarity(normalized.chars(), candidate.chars()))
            .fold(0.0_f64, f64::max);
        if score >= MIN_SIMILARITY && best.is_none_or(|(top, _)| score > top) {
            best = Some((score, header));
        }
    }
    best.map(|(_, header)| header.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn near_miss_is_suggested() {
        let headers = strings(&["Data", "Colaborador", "Nots Atendidas"]);
        let hint = closest_header(&headers, &strings(&["NOTAS ATENDIDAS", "QTD"]));
        assert_eq!(hint.as_deref(), Some("Nots Atendidas"));
    }

    #[test]
    fn unrelated_headers_give_no_hint() {
        let headers = strings(&["X", "Y"]);
        assert!(closest_header(&headers, &strings(&["LOCALIDADE"])).is_none());
    }
}

//! Relevance scoring between place names.

use crate::fuzzy::{fuzzy_match, levenshtein_distance, normalize_place};

/// Relevance score levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlaceRelevance {
    /// No match
    None = 0,
    /// Query characters appear in order
    Fuzzy = 10,
    /// Whole name within one edit of the query
    Typo = 15,
    /// Contains the query as a substring
    Contains = 20,
    /// A word of the name starts with the query
    WordBoundary = 30,
    /// Name starts with the query
    StartsWith = 40,
    /// Same name after normalization
    Exact = 50,
}

/// Names at least this long tolerate a single-character typo.
const TYPO_MIN_LEN: usize = 5;

/// Scores how well `query` refers to the place called `name`.
///
/// Both sides are normalized first; an empty query never matches.
pub fn place_relevance(name: &str, query: &str) -> PlaceRelevance {
    let name = normalize_place(name);
    let query = normalize_place(query);

    if query.is_empty() || name.is_empty() {
        return PlaceRelevance::None;
    }

    if name == query {
        return PlaceRelevance::Exact;
    }

    if name.starts_with(&query) {
        return PlaceRelevance::StartsWith;
    }

    if name.split(' ').any(|word| word.starts_with(&query)) {
        return PlaceRelevance::WordBoundary;
    }

    if name.contains(&query) {
        return PlaceRelevance::Contains;
    }

    if query.chars().count() >= TYPO_MIN_LEN && levenshtein_distance(&name, &query) <= 1 {
        return PlaceRelevance::Typo;
    }

    if fuzzy_match(&name, &query) {
        return PlaceRelevance::Fuzzy;
    }

    PlaceRelevance::None
}

/// True when two place names plausibly denote the same city.
///
/// Either side may be the more specific one: `"Bengaluru"` and
/// `"Koramangala, Bengaluru"` agree.
pub fn same_place(a: &str, b: &str) -> bool {
    place_relevance(a, b) >= PlaceRelevance::WordBoundary
        || place_relevance(b, a) >= PlaceRelevance::WordBoundary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(place_relevance("Mysuru", "mysuru"), PlaceRelevance::Exact);
        assert_eq!(place_relevance("Mysuru ", " MYSURU"), PlaceRelevance::Exact);
    }

    #[test]
    fn test_starts_with() {
        assert_eq!(place_relevance("Mysuru Palace", "mysuru"), PlaceRelevance::StartsWith);
    }

    #[test]
    fn test_word_boundary() {
        assert_eq!(place_relevance("Koramangala, Bengaluru", "bengaluru"), PlaceRelevance::WordBoundary);
    }

    #[test]
    fn test_contains() {
        assert_eq!(place_relevance("Navi Mumbai", "umba"), PlaceRelevance::Contains);
    }

    #[test]
    fn test_typo() {
        assert_eq!(place_relevance("Chennai", "chenai"), PlaceRelevance::Typo);
        // Short names do not get typo tolerance
        assert_ne!(place_relevance("Goa", "gao"), PlaceRelevance::Typo);
    }

    #[test]
    fn test_fuzzy_and_none() {
        assert_eq!(place_relevance("Bangalore", "blr"), PlaceRelevance::Fuzzy);
        assert_eq!(place_relevance("Bangalore", "xyz"), PlaceRelevance::None);
        assert_eq!(place_relevance("Bangalore", "  "), PlaceRelevance::None);
    }

    #[test]
    fn test_same_place_either_direction() {
        assert!(same_place("Bengaluru", "Koramangala, Bengaluru"));
        assert!(same_place("Koramangala, Bengaluru", "Bengaluru"));
        assert!(same_place("HUBLI", "hubli"));
        assert!(!same_place("Mysuru", "Mangaluru"));
    }
}

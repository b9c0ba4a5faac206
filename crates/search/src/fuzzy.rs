//! Fuzzy text matching for place names.

/// Normalizes a place name for comparison.
///
/// Lowercases, turns punctuation into spaces and collapses whitespace, so
/// `"Koramangala,  Bengaluru"` becomes `"koramangala bengaluru"`.
pub fn normalize_place(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Calculate Levenshtein edit distance between two strings.
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows are enough
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Check if text contains all characters of query in order.
///
/// The characters need not be consecutive: `"blr"` matches `"bangalore"`.
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    let mut text_chars = text.chars();

    query
        .chars()
        .all(|query_char| text_chars.any(|c| c == query_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_place() {
        assert_eq!(normalize_place("  Koramangala,  Bengaluru "), "koramangala bengaluru");
        assert_eq!(normalize_place("M.G. Road"), "m g road");
        assert_eq!(normalize_place(""), "");
    }

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("mysuru", "mysuru"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein_distance("mysuru", "mysore"), 2);
        assert_eq!(levenshtein_distance("chennai", "chenai"), 1);
        assert_eq!(levenshtein_distance("pune", "puné"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance("", "goa"), 3);
        assert_eq!(levenshtein_distance("goa", ""), 3);
    }

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("bangalore", "blr"));
        assert!(!fuzzy_match("bangalore", "rlb"));
        assert!(fuzzy_match("hubli", "hubli"));
    }
}

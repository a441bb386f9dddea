use std::collections::BTreeSet;

/// Placeholder values owners and sitters use to say "nothing declared"
const BLANK_MARKERS: [&str; 2] = ["none", "n/a"];

/// Split a comma-delimited tag list into a normalized set
///
/// Tokens are trimmed and lowercased; empty tokens are dropped.
pub fn tag_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Normalize a single tag the same way `tag_set` normalizes each token
#[inline]
pub fn normalize_tag(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// True when a needs string declares nothing ("", "none", "n/a")
pub fn is_blank_needs(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || BLANK_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_set_normalizes_tokens() {
        let tags = tag_set(" Anxiety, senior cats ,,ANXIETY, ");
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("anxiety"));
        assert!(tags.contains("senior cats"));
    }

    #[test]
    fn test_tag_set_empty_input() {
        assert!(tag_set("").is_empty());
        assert!(tag_set(" , ,").is_empty());
    }

    #[test]
    fn test_blank_needs_markers() {
        assert!(is_blank_needs(""));
        assert!(is_blank_needs("   "));
        assert!(is_blank_needs("None"));
        assert!(is_blank_needs("N/A"));
        assert!(!is_blank_needs("none of the above"));
        assert!(!is_blank_needs("Kittens"));
    }

    #[test]
    fn test_blank_markers_ignore_surrounding_whitespace() {
        assert!(is_blank_needs(" None"));
        assert!(is_blank_needs("n/a  "));
        assert_eq!(
            crate::core::scoring::calculate_special_needs_score(" None", "None, Anxiety", 20),
            0
        );
    }
}

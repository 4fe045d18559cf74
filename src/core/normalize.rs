use std::collections::BTreeSet;

/// Lowercase and trim a piece of free text for comparison
#[inline]
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalize every tag, keeping order and duplicates but dropping blanks
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| normalize_text(t))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Normalized, deduplicated tag set
///
/// A `BTreeSet` keeps iteration order stable so that reasons listing
/// matched tags are deterministic.
pub fn normalize_set(tags: &[String]) -> BTreeSet<String> {
    tags.iter()
        .map(|t| normalize_text(t))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Jaccard similarity `|A ∩ B| / |A ∪ B|`
///
/// Two empty sets are identical (1.0); exactly one empty set shares
/// nothing with the other (0.0).
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.union(b).count();

    intersection as f64 / union as f64
}

/// Round to 4 decimal places, halves away from zero
#[inline]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Whether any keyword occurs in an already normalized haystack
#[inline]
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

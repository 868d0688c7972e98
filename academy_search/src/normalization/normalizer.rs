use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block. These are the code points left behind
/// by NFD decomposition of accented Latin letters.
const COMBINING_DIACRITICAL_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

fn is_combining_diacritic(c: char) -> bool {
    COMBINING_DIACRITICAL_MARKS.contains(&c)
}

/// Fold `text` for accent- and case-insensitive comparison.
///
/// Lowercases, decomposes to NFD, drops combining diacritical marks and trims
/// surrounding whitespace, in that order.
///
/// ```rust,ignore
/// assert_eq!(normalize_str("  JOSÉ "), "jose");
/// ```
#[must_use]
pub fn normalize_str(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_diacritic(*c)).collect();
    stripped.trim().to_string()
}

/// Null-propagating form of [`normalize_str`]: absence stays absence.
#[must_use]
pub fn normalize(text: Option<&str>) -> Option<String> {
    text.map(normalize_str)
}

/// Substring containment after normalizing both sides.
///
/// Returns `false` when either side is absent.
#[must_use]
pub fn contains(haystack: Option<&str>, needle: Option<&str>) -> bool {
    match (haystack, needle) {
        (Some(haystack), Some(needle)) => normalize_str(haystack).contains(&normalize_str(needle)),
        _ => false,
    }
}

/// Null-safe equality after normalization. Two absent values are equal.
#[must_use]
pub fn equals(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => normalize_str(a) == normalize_str(b),
        _ => false,
    }
}

/// Normalize a search term before it is embedded in a LIKE pattern.
///
/// Absent and blank terms yield `None` so callers can skip the predicate.
#[must_use]
pub fn prepare_for_like(term: Option<&str>) -> Option<String> {
    term.filter(|t| !t.trim().is_empty()).map(normalize_str)
}

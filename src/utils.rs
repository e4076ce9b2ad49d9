/// Lower-cases text for substring matching. Hangul has no case, so this
/// only affects Latin aliases such as "Samsung" or "IPO".
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Counts how many `needles` occur somewhere in `haystack`. Both sides are
/// expected to be normalized already.
pub fn count_contained<S: AsRef<str>>(haystack: &str, needles: &[S]) -> usize {
    needles
        .iter()
        .filter(|needle| {
            let needle = needle.as_ref();
            !needle.is_empty() && haystack.contains(needle)
        })
        .count()
}

pub fn contains_any<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    needles.iter().any(|needle| {
        let needle = needle.as_ref();
        !needle.is_empty() && haystack.contains(needle)
    })
}

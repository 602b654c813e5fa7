//! Hindi and Hinglish language utilities
//!
//! Shared word lists for romanized Hindi detection and Devanagari number
//! words used by the entity tagger.

use unicode_segmentation::UnicodeSegmentation;

/// Romanized Hindi tokens that mark a message as Hinglish when they appear
/// as whole words. Used by the keyword fallback path, which avoids the
/// substring matching of the main classifier.
pub const HINGLISH_TOKENS: &[&str] = &[
    "kya", "kaise", "kab", "kaha", "kyu", "aap", "tum", "hai", "hain", "fee", "admission",
    "college", "ka", "ki", "ke", "mein", "par", "aur", "batao", "chahiye", "mil", "sakte",
    "sakta", "jaankari", "prakriya", "tareekh",
];

/// True when any marker occurs as a case-insensitive substring of `text`
pub fn contains_marker<S: AsRef<str>>(text: &str, markers: &[S]) -> bool {
    let lower = text.to_lowercase();
    markers
        .iter()
        .map(AsRef::as_ref)
        .filter(|m| !m.is_empty())
        .any(|m| lower.contains(m))
}

/// True when any of [`HINGLISH_TOKENS`] appears as a whole word
pub fn has_hinglish_token(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower
        .unicode_words()
        .any(|word| HINGLISH_TOKENS.contains(&word))
}

/// Convert a Hindi number word to its value.
///
/// Romanized forms are limited to multiplier words; short ones like "do"
/// collide with English.
pub fn number_word(word: &str) -> Option<u32> {
    match word {
        "एक" => Some(1),
        "दो" => Some(2),
        "तीन" => Some(3),
        "चार" => Some(4),
        "पांच" | "पाँच" => Some(5),
        "छह" | "छः" => Some(6),
        "सात" => Some(7),
        "आठ" => Some(8),
        "नौ" => Some(9),
        "दस" => Some(10),
        "बीस" => Some(20),
        "पचास" => Some(50),
        "सौ" => Some(100),
        "हज़ार" | "हजार" | "hazaar" | "hazar" => Some(1_000),
        "लाख" | "lakh" => Some(100_000),
        _ => None,
    }
}

/// True for ASCII or Devanagari digit runs
pub fn is_numeral(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || ('\u{0966}'..='\u{096F}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_marker_is_substring() {
        let markers = ["kya", "ke baare mein"];
        assert!(contains_marker("Fees KYA hai?", &markers));
        assert!(contains_marker("computer ke baare mein", &markers));
        assert!(!contains_marker("What are the fees?", &markers));
    }

    #[test]
    fn test_empty_marker_never_matches() {
        assert!(!contains_marker("anything", &[""]));
    }

    #[test]
    fn test_hinglish_token_needs_whole_word() {
        assert!(has_hinglish_token("fee kitni hai"));
        assert!(has_hinglish_token("Admission ki tareekh"));
        // "ka" inside "karate" is not a token
        assert!(!has_hinglish_token("karate club timings"));
    }

    #[test]
    fn test_number_words() {
        assert_eq!(number_word("पांच"), Some(5));
        assert_eq!(number_word("पाँच"), Some(5));
        assert_eq!(number_word("lakh"), Some(100_000));
        assert_eq!(number_word("hello"), None);
    }

    #[test]
    fn test_numerals() {
        assert!(is_numeral("2025"));
        assert!(is_numeral("२०२५"));
        assert!(!is_numeral("20a"));
        assert!(!is_numeral(""));
    }
}

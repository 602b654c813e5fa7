//! Language definitions for the assistant
//!
//! The assistant answers in three registers: English, Hindi (Devanagari) and
//! Hinglish (romanized Hindi mixed with English, or mixed scripts).

use serde::{Deserialize, Serialize};

/// Romanized Hindi words whose presence marks an utterance as Hinglish
pub const HINGLISH_MARKERS: &[&str] = &[
    "kaise",
    "kya",
    "kab",
    "kitna",
    "hai",
    "hoon",
    "main",
    "aap",
    "college",
    "admission",
    "fees",
    "batao",
    "bolo",
    "btao",
    "kya hai",
    "ke baare mein",
    "baare mein",
    "kaun hain",
];

/// Supported reply languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Hinglish,
}

impl Language {
    /// Get ISO 639-1 style code (`hi-Latn` for romanized Hindi)
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Hinglish => "hi-Latn",
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Hinglish => "Hinglish",
        }
    }

    /// Wire label, identical to the serde form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Hindi => "hindi",
            Self::Hinglish => "hinglish",
        }
    }

    /// Get the dominant script of this language
    pub fn script(&self) -> Script {
        match self {
            Self::Hindi => Script::Devanagari,
            Self::English | Self::Hinglish => Script::Latin,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "en" | "eng" | "english" => Some(Self::English),
            "hi" | "hin" | "hindi" => Some(Self::Hindi),
            "hinglish" | "hi-latn" | "hi_latn" => Some(Self::Hinglish),
            _ => None,
        }
    }

    /// Get all supported languages
    pub fn all() -> &'static [Language] {
        &[Self::English, Self::Hindi, Self::Hinglish]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Script systems seen in user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Latin,
    Devanagari,
}

impl Script {
    /// Get Unicode range for this script (first block only)
    pub fn unicode_range(&self) -> (u32, u32) {
        match self {
            Self::Latin => (0x0041, 0x007A),
            Self::Devanagari => (0x0900, 0x097F),
        }
    }

    /// Check if a character belongs to this script.
    ///
    /// Latin only counts ASCII letters; digits and punctuation belong to
    /// neither script.
    pub fn contains_char(&self, c: char) -> bool {
        match self {
            Self::Latin => c.is_ascii_alphabetic(),
            Self::Devanagari => {
                let code = c as u32;
                let (start, end) = self.unicode_range();
                code >= start && code <= end
            }
        }
    }

    /// Check whether any character of `text` belongs to this script
    pub fn present_in(&self, text: &str) -> bool {
        text.chars().any(|c| self.contains_char(c))
    }

    /// Detect script from text (returns most frequent script)
    pub fn detect(text: &str) -> Option<Self> {
        let mut latin = 0usize;
        let mut devanagari = 0usize;

        for c in text.chars() {
            if Self::Devanagari.contains_char(c) {
                devanagari += 1;
            } else if Self::Latin.contains_char(c) {
                latin += 1;
            }
        }

        match (latin, devanagari) {
            (0, 0) => None,
            (l, d) if d > l => Some(Self::Devanagari),
            _ => Some(Self::Latin),
        }
    }
}

//! Gazetteer entity tagger
//!
//! A lightweight named entity tagger over fixed word lists and a few
//! patterns. Two models are available: an English model and a
//! multilingual one that also knows Devanagari surface forms. Labels
//! follow the usual NER convention:
//!
//! - `ORG`: mentions of the college
//! - `GPE`: towns, districts and states
//! - `PERSON`: faculty and leadership surnames
//! - `DATE`: month names and four digit years
//! - `CARDINAL`: other numbers
//!
//! # Example
//!
//! ```
//! use campus_faq_core::{EntityTagger, Language};
//! use campus_faq_text_processing::GazetteerTagger;
//!
//! let tagger = GazetteerTagger::new();
//! let spans = tagger.tag("admissions close in august 2025", Language::English).unwrap();
//! assert!(spans.iter().any(|s| s.label == "DATE" && s.text == "august"));
//! ```

use std::collections::HashMap;

use campus_faq_core::{EntitySpan, EntityTagger, Language, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::hindi;

pub const ORG: &str = "ORG";
pub const GPE: &str = "GPE";
pub const PERSON: &str = "PERSON";
pub const DATE: &str = "DATE";
pub const CARDINAL: &str = "CARDINAL";

static ORG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:r\.?\s?v\.?\s+)?parankar\s+college(?:\s+of\s+engineering(?:\s+(?:and|&)\s+technology)?)?|\b(?:rvpcet|pcet)\b|आर\.?\s?वी\.?\s+पारणकर",
    )
    .unwrap()
});

const ENGLISH_PLACES: &[&str] = &[
    "arvi",
    "wardha",
    "nagpur",
    "amravati",
    "sarangpuri",
    "maharashtra",
    "india",
];

const DEVANAGARI_PLACES: &[&str] = &["आर्वी", "वर्धा", "नागपुर", "अमरावती", "महाराष्ट्र", "भारत"];

const ENGLISH_MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const DEVANAGARI_MONTHS: &[&str] = &[
    "जनवरी", "फ़रवरी", "फरवरी", "मार्च", "अप्रैल", "मई", "जून", "जुलाई", "अगस्त", "सितंबर",
    "अक्टूबर", "नवंबर", "दिसंबर",
];

/// Model selected per message language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggerModel {
    English,
    Multilingual,
}

impl TaggerModel {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::English => Self::English,
            Language::Hindi | Language::Hinglish => Self::Multilingual,
        }
    }
}

/// Word-list entity tagger
#[derive(Debug, Clone)]
pub struct GazetteerTagger {
    english: HashMap<String, &'static str>,
    multilingual: HashMap<String, &'static str>,
}

impl GazetteerTagger {
    /// Tagger without person names
    pub fn new() -> Self {
        let mut english = HashMap::new();
        for place in ENGLISH_PLACES {
            english.insert(place.to_string(), GPE);
        }
        for month in ENGLISH_MONTHS {
            english.insert(month.to_string(), DATE);
        }

        let mut multilingual = english.clone();
        for place in DEVANAGARI_PLACES {
            multilingual.insert(place.to_string(), GPE);
        }
        for month in DEVANAGARI_MONTHS {
            multilingual.insert(month.to_string(), DATE);
        }

        Self {
            english,
            multilingual,
        }
    }

    /// Tagger that also recognizes the surnames of the given people.
    ///
    /// Names like "Prof.Priti D.Ghantewar" contribute their last word of
    /// four or more letters ("ghantewar").
    pub fn with_people<S: AsRef<str>>(names: &[S]) -> Self {
        let mut tagger = Self::new();
        for name in names {
            if let Some(surname) = surname(name.as_ref()) {
                // Place and month words keep their label
                tagger.english.entry(surname.clone()).or_insert(PERSON);
                tagger.multilingual.entry(surname).or_insert(PERSON);
            }
        }
        tagger
    }

    fn gazetteer(&self, model: TaggerModel) -> &HashMap<String, &'static str> {
        match model {
            TaggerModel::English => &self.english,
            TaggerModel::Multilingual => &self.multilingual,
        }
    }

    fn tag_with(&self, text: &str, model: TaggerModel) -> Vec<EntitySpan> {
        let mut spans: Vec<EntitySpan> = ORG_PATTERN
            .find_iter(text)
            .map(|m| span(ORG, m.as_str(), m.start()))
            .collect();

        let gazetteer = self.gazetteer(model);

        for (start, word) in text.unicode_word_indices() {
            let end = start + word.len();
            if spans.iter().any(|s| start < s.end && s.start < end) {
                continue;
            }

            let lower = word.to_lowercase();
            let label = if let Some(label) = gazetteer.get(&lower) {
                Some(*label)
            } else if hindi::is_numeral(word) {
                let is_ascii = word.chars().all(|c| c.is_ascii_digit());
                if !is_ascii && model == TaggerModel::English {
                    None
                } else if is_year(word) {
                    Some(DATE)
                } else {
                    Some(CARDINAL)
                }
            } else if model == TaggerModel::Multilingual && hindi::number_word(&lower).is_some() {
                Some(CARDINAL)
            } else {
                None
            };

            if let Some(label) = label {
                spans.push(span(label, word, start));
            }
        }

        spans.sort_by_key(|s| s.start);
        spans
    }
}

impl Default for GazetteerTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityTagger for GazetteerTagger {
    fn tag(&self, text: &str, language: Language) -> Result<Vec<EntitySpan>> {
        let model = TaggerModel::for_language(language);
        let spans = self.tag_with(text, model);
        tracing::debug!(?model, spans = spans.len(), "Tagged entities");
        Ok(spans)
    }

    fn name(&self) -> &'static str {
        "gazetteer"
    }
}

fn span(label: &str, text: &str, start: usize) -> EntitySpan {
    EntitySpan {
        label: label.to_string(),
        text: text.to_string(),
        start,
        end: start + text.len(),
    }
}

fn is_year(word: &str) -> bool {
    word.len() == 4 && (word.starts_with("19") || word.starts_with("20"))
}

fn surname(name: &str) -> Option<String> {
    name.split(|c: char| !c.is_alphabetic())
        .filter(|w| w.chars().count() >= 4)
        .last()
        .map(str::to_lowercase)
}

//! Text processing for the campus FAQ assistant
//!
//! This crate provides the language-facing stages of the pipeline:
//! - **Language Classification**: English, Hindi or Hinglish from script
//!   heuristics, marker words and a statistical detector
//! - **Intent Detection**: ordered keyword rules over the closed intent set
//! - **Entity Extraction**: department and topic entities plus a gazetteer
//!   NER tagger
//!
//! # Example
//!
//! ```
//! use campus_faq_core::{Intent, Language};
//! use campus_faq_text_processing::{IntentExtractor, LanguageClassifier};
//!
//! let classifier = LanguageClassifier::default();
//! let extractor = IntentExtractor::new();
//!
//! let language = classifier.classify("Fees kya hai?");
//! let result = extractor.extract("Fees kya hai?", language);
//!
//! assert_eq!(language, Language::Hinglish);
//! assert_eq!(result.intent, Intent::Fees);
//! ```

pub mod entities;
pub mod hindi;
pub mod intent;
pub mod language;

mod error;

pub use error::{Result, TextProcessingError};

pub use entities::{GazetteerTagger, TaggerModel};
pub use intent::{
    ConfidencePolicy, Extraction, IntentExtractor, IntentRule, Keyword, KeywordMatch,
    GENERAL_CONFIDENCE,
};
pub use language::{LanguageClassifier, WhatlangDetector, DEFAULT_MARKERS};

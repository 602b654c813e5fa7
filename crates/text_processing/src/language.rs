//! Language classification
//!
//! Decides whether a message is English, Hindi or Hinglish using script
//! heuristics first and a statistical detector as the last resort.
//!
//! # Example
//!
//! ```
//! use campus_faq_core::Language;
//! use campus_faq_text_processing::LanguageClassifier;
//!
//! let classifier = LanguageClassifier::default();
//! assert_eq!(classifier.classify("फीस कितनी है"), Language::Hindi);
//! assert_eq!(classifier.classify("Fees kya hai?"), Language::Hinglish);
//! ```

use std::sync::Arc;

use campus_faq_core::{
    DetectedLanguage, Error as CoreError, Language, Result as CoreResult, Script,
    StatisticalDetector, HINGLISH_MARKERS,
};

use crate::hindi;

/// Default romanized Hindi marker words
pub const DEFAULT_MARKERS: &[&str] = HINGLISH_MARKERS;

/// Trigram detector backed by the `whatlang` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

impl StatisticalDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> CoreResult<DetectedLanguage> {
        let info = whatlang::detect(text)
            .ok_or_else(|| CoreError::Detection(format!("no verdict for {:?}", text)))?;

        Ok(DetectedLanguage {
            code: info.lang().code(),
            confidence: info.confidence(),
        })
    }

    fn name(&self) -> &'static str {
        "whatlang"
    }
}

/// Classifies raw input into one of the three reply languages.
///
/// Total over all inputs: every failure path ends in English.
pub struct LanguageClassifier {
    markers: Vec<String>,
    detector: Arc<dyn StatisticalDetector>,
    min_detector_confidence: f64,
}

impl LanguageClassifier {
    /// Create a classifier using the whatlang detector
    pub fn new<S: AsRef<str>>(markers: &[S], min_detector_confidence: f64) -> Self {
        Self::with_detector(markers, min_detector_confidence, Arc::new(WhatlangDetector))
    }

    /// Create a classifier with an injected statistical detector
    pub fn with_detector<S: AsRef<str>>(
        markers: &[S],
        min_detector_confidence: f64,
        detector: Arc<dyn StatisticalDetector>,
    ) -> Self {
        let markers = markers
            .iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();

        Self {
            markers,
            detector,
            min_detector_confidence: min_detector_confidence.clamp(0.0, 1.0),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Classify `text`
    pub fn classify(&self, text: &str) -> Language {
        let has_devanagari = Script::Devanagari.present_in(text);
        let has_latin = Script::Latin.present_in(text);

        if has_devanagari && has_latin {
            return Language::Hinglish;
        }

        if hindi::contains_marker(text, &self.markers) {
            return Language::Hinglish;
        }

        if has_devanagari {
            return Language::Hindi;
        }

        match self.detector.detect(text) {
            Ok(verdict) if verdict.confidence < self.min_detector_confidence => {
                tracing::debug!(
                    detector = self.detector.name(),
                    code = verdict.code,
                    confidence = verdict.confidence,
                    "Detector verdict below threshold, using English"
                );
                Language::English
            }
            Ok(verdict) if verdict.is_hindi() => Language::Hindi,
            Ok(_) => Language::English,
            Err(e) => {
                tracing::debug!(detector = self.detector.name(), error = %e, "Detector failed, using English");
                Language::English
            }
        }
    }
}

impl Default for LanguageClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MARKERS, 0.0)
    }
}

impl std::fmt::Debug for LanguageClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageClassifier")
            .field("markers", &self.markers.len())
            .field("detector", &self.detector.name())
            .field("min_detector_confidence", &self.min_detector_confidence)
            .finish()
    }
}

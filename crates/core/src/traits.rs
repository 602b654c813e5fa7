//! Seam traits for pluggable language backends
//!
//! Both traits are synchronous: detection and tagging are bounded by input
//! length and run on the caller's thread.

use crate::entities::EntitySpan;
use crate::error::Result;
use crate::language::Language;

/// Verdict of a statistical language detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedLanguage {
    /// ISO 639-3 code reported by the detector (e.g. "hin", "eng")
    pub code: &'static str,
    /// Detector confidence in [0, 1]
    pub confidence: f64,
}

impl DetectedLanguage {
    pub fn is_hindi(&self) -> bool {
        self.code == "hin"
    }
}

/// General-purpose statistical language detector.
///
/// Implementations return `Err` when the input is too short or too ambiguous
/// to classify.
pub trait StatisticalDetector: Send + Sync {
    fn detect(&self, text: &str) -> Result<DetectedLanguage>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}

/// Named entity tagger with a model selected per language
pub trait EntityTagger: Send + Sync {
    fn tag(&self, text: &str, language: Language) -> Result<Vec<EntitySpan>>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}

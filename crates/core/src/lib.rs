//! Core traits and types for the campus FAQ assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Language and script definitions (English, Hindi, Hinglish)
//! - The closed intent set and canonical department keys
//! - Entity maps produced by extraction
//! - Seam traits for pluggable backends (statistical detector, entity tagger)
//! - Error types

pub mod entities;
pub mod error;
pub mod intent;
pub mod language;
pub mod traits;

pub use entities::{EntityMap, EntitySpan, DEPARTMENT_KEY, TOPIC_KEY};
pub use error::{Error, Result};
pub use intent::{Department, Intent};
pub use language::{Language, Script, HINGLISH_MARKERS};
pub use traits::{DetectedLanguage, EntityTagger, StatisticalDetector};

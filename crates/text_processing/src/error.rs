//! Error types for text processing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Language detection error: {0}")]
    DetectionError(String),

    #[error("Entity tagging error: {0}")]
    TaggingError(String),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Core error: {0}")]
    Core(#[from] campus_faq_core::Error),
}

pub type Result<T> = std::result::Result<T, TextProcessingError>;

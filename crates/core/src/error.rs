//! Shared error type

use thiserror::Error;

/// Errors raised by pluggable backends
#[derive(Error, Debug)]
pub enum Error {
    /// Statistical language detection could not produce a verdict
    #[error("Language detection failed: {0}")]
    Detection(String),

    /// Named entity tagging failed
    #[error("Entity tagging failed: {0}")]
    Tagging(String),

    /// Content lookup failed
    #[error("Content error: {0}")]
    Content(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

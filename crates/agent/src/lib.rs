//! Campus FAQ agent
//!
//! Features:
//! - Response resolution over the college content store
//! - Faculty cards rendered per department
//! - The end-to-end FAQ pipeline (classify, extract, resolve)
//! - A keyword fallback chain for when the pipeline fails

pub mod faculty;
pub mod fallback;
pub mod pipeline;
pub mod resolver;

pub use fallback::KeywordFallback;
pub use pipeline::{FaqPipeline, HandlerReply, Reply, ReplySource};
pub use resolver::{ResolveError, ResponseResolver};

pub use campus_faq_config::{DEFAULT_APOLOGY, DEFAULT_EMPTY_PROMPT};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Content error: {0}")]
    Content(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<campus_faq_config::ConfigError> for AgentError {
    fn from(err: campus_faq_config::ConfigError) -> Self {
        AgentError::Content(err.to_string())
    }
}

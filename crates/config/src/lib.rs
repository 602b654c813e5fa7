//! Configuration management for the campus FAQ assistant
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, `config/{env}.yaml`)
//! - Environment variables (CAMPUS_FAQ__ prefix)
//!
//! # Content Store
//!
//! The college content (greetings, fee tables, department pages, faculty
//! lists) lives in a JSON document loaded once at startup into
//! [`CollegeContent`]. It is read-only for the process lifetime and shared
//! by reference.

pub mod content;
pub mod settings;

pub use content::{
    CollegeContent, FacultyMember, Fragment, ResponseTable, Variants, OVERVIEW_KEYS,
};
pub use settings::{
    load_settings, ClassifierConfig, ContentConfig, GreetingSelection, ObservabilityConfig,
    ResponsesConfig, RuntimeEnvironment, ServerConfig, Settings, DEFAULT_APOLOGY,
    DEFAULT_EMPTY_PROMPT, DEFAULT_HINGLISH_MARKERS,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

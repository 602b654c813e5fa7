//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default marker words for the language classifier
pub const DEFAULT_HINGLISH_MARKERS: &[&str] = campus_faq_core::HINGLISH_MARKERS;

/// The single catch-all reply for failed resolution
pub const DEFAULT_APOLOGY: &str =
    "I apologize, but I'm having trouble processing your request. Please try asking in a different way.";

/// Prompt returned for blank input
pub const DEFAULT_EMPTY_PROMPT: &str = "Please enter a message!";

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Content store location
    #[serde(default)]
    pub content: ContentConfig,

    /// Language classifier tuning
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Response selection and canned messages
    #[serde(default)]
    pub responses: ResponsesConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_classifier()?;
        self.validate_responses()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if self.environment.is_production() && !self.server.cors_enabled {
            return Err(ConfigError::InvalidValue {
                field: "server.cors_enabled".to_string(),
                message: "CORS must be enabled in production".to_string(),
            });
        }

        Ok(())
    }

    fn validate_classifier(&self) -> Result<(), ConfigError> {
        let classifier = &self.classifier;

        if !(0.0..=1.0).contains(&classifier.min_detector_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "classifier.min_detector_confidence".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    classifier.min_detector_confidence
                ),
            });
        }

        if classifier.hinglish_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "classifier.hinglish_markers".to_string(),
                message: "Marker words cannot be blank".to_string(),
            });
        }

        Ok(())
    }

    fn validate_responses(&self) -> Result<(), ConfigError> {
        if self.responses.apology.trim().is_empty() {
            return Err(ConfigError::MissingField("responses.apology".to_string()));
        }
        if self.responses.empty_prompt.trim().is_empty() {
            return Err(ConfigError::MissingField("responses.empty_prompt".to_string()));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: default_true(),
            cors_origins: Vec::new(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics at /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Content store location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Path to the college content document (JSON or YAML)
    #[serde(default = "default_content_path")]
    pub path: String,
}

fn default_content_path() -> String {
    "config/college_data.json".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: default_content_path(),
        }
    }
}

/// Language classifier tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Romanized Hindi marker words (matched as case-insensitive substrings)
    #[serde(default = "default_hinglish_markers")]
    pub hinglish_markers: Vec<String>,

    /// Statistical detector verdicts below this confidence count as failures
    #[serde(default)]
    pub min_detector_confidence: f64,
}

fn default_hinglish_markers() -> Vec<String> {
    DEFAULT_HINGLISH_MARKERS.iter().map(|m| m.to_string()).collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            hinglish_markers: default_hinglish_markers(),
            min_detector_confidence: 0.0,
        }
    }
}

/// How one variant is chosen from a multi-valued fragment (greetings, defaults)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GreetingSelection {
    /// Always the first configured variant; resolution is idempotent
    #[default]
    First,
    /// Uniformly random variant per request
    Random,
}

/// Response selection and canned messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsesConfig {
    #[serde(default)]
    pub greeting_selection: GreetingSelection,

    /// Returned whenever resolution fails
    #[serde(default = "default_apology")]
    pub apology: String,

    /// Returned for blank input without running the pipeline
    #[serde(default = "default_empty_prompt")]
    pub empty_prompt: String,
}

fn default_apology() -> String {
    DEFAULT_APOLOGY.to_string()
}
fn default_empty_prompt() -> String {
    DEFAULT_EMPTY_PROMPT.to_string()
}

impl Default for ResponsesConfig {
    fn default() -> Self {
        Self {
            greeting_selection: GreetingSelection::default(),
            apology: default_apology(),
            empty_prompt: default_empty_prompt(),
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (CAMPUS_FAQ__ prefix, `__` separator)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Same as [`load_settings`] with an explicit config directory
pub fn load_settings_from(config_dir: &str, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name(&format!("{}/default", config_dir)).required(false));

    if let Some(env_name) = env {
        builder = builder
            .add_source(File::with_name(&format!("{}/{}", config_dir, env_name)).required(false));
    }

    // Markers arrive as a comma separated list from the environment
    builder = builder.add_source(
        Environment::with_prefix("CAMPUS_FAQ")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("classifier.hinglish_markers")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.content.path, "config/college_data.json");
        assert_eq!(settings.responses.greeting_selection, GreetingSelection::First);
        assert!(settings.classifier.hinglish_markers.contains(&"kya".to_string()));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_server_validation() {
        let mut settings = Settings::default();

        settings.server.port = 0;
        assert!(settings.validate_server().is_err());
        settings.server.port = 8080;

        settings.server.timeout_seconds = 0;
        assert!(settings.validate_server().is_err());
        settings.server.timeout_seconds = 30;

        assert!(settings.validate_server().is_ok());
    }

    #[test]
    fn test_production_requires_cors() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        settings.server.cors_enabled = false;
        assert!(settings.validate_server().is_err());

        settings.server.cors_enabled = true;
        assert!(settings.validate_server().is_ok());
    }

    #[test]
    fn test_classifier_validation() {
        let mut settings = Settings::default();

        settings.classifier.min_detector_confidence = 1.5;
        assert!(settings.validate_classifier().is_err());
        settings.classifier.min_detector_confidence = 0.3;
        assert!(settings.validate_classifier().is_ok());

        settings.classifier.hinglish_markers.push("  ".to_string());
        assert!(settings.validate_classifier().is_err());
    }

    #[test]
    fn test_response_defaults() {
        let responses = ResponsesConfig::default();
        assert_eq!(responses.apology, DEFAULT_APOLOGY);
        assert_eq!(responses.empty_prompt, DEFAULT_EMPTY_PROMPT);
    }

    #[test]
    fn test_blank_apology_rejected() {
        let mut settings = Settings::default();
        settings.responses.apology = " ".to_string();
        assert!(matches!(
            settings.validate_responses(),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn test_load_from_yaml_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut default = std::fs::File::create(dir.path().join("default.yaml")).unwrap();
        writeln!(
            default,
            "server:\n  port: 6100\nresponses:\n  greeting_selection: random\ncontent:\n  path: data/content.json"
        )
        .unwrap();
        let mut staging = std::fs::File::create(dir.path().join("staging.yaml")).unwrap();
        writeln!(staging, "environment: staging\nserver:\n  port: 6200").unwrap();

        let config_dir = dir.path().to_string_lossy().to_string();

        let settings = load_settings_from(&config_dir, None).unwrap();
        assert_eq!(settings.server.port, 6100);
        assert_eq!(settings.responses.greeting_selection, GreetingSelection::Random);
        assert_eq!(settings.content.path, "data/content.json");

        let settings = load_settings_from(&config_dir, Some("staging")).unwrap();
        assert_eq!(settings.server.port, 6200);
        assert_eq!(settings.environment, RuntimeEnvironment::Staging);
        // untouched sections keep their defaults
        assert_eq!(settings.observability.log_level, "info");
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.yaml"), "server:\n  port: 0\n").unwrap();

        let config_dir = dir.path().to_string_lossy().to_string();
        assert!(load_settings_from(&config_dir, None).is_err());
    }
}

//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use aurelio_application::{AdviceParams, DEFAULT_TEMPERATURE};
use aurelio_domain::AdviceModel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default environment variable that carries the service credential.
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Default base URL of the generative-text service.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("advice.model cannot be empty")]
    EmptyModelName,

    #[error("advice.temperature must be within 0.0..=2.0 (got {0})")]
    TemperatureOutOfRange(f32),

    #[error("advice.history_window cannot be 0")]
    InvalidHistoryWindow,

    #[error("advice.endpoint cannot be empty")]
    EmptyEndpoint,
}

/// Raw advice configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAdviceConfig {
    /// Model identifier sent to the service
    pub model: AdviceModel,
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on one round-trip, in seconds; 0 disables the timeout
    pub timeout_seconds: Option<u64>,
    /// Only send the last N transcript messages
    pub history_window: Option<usize>,
    /// Environment variable holding the credential
    pub api_key_env: String,
    /// Inline credential (takes precedence over `api_key_env`)
    pub api_key: Option<String>,
    /// Service base URL
    pub endpoint: String,
}

impl Default for FileAdviceConfig {
    fn default() -> Self {
        Self {
            model: AdviceModel::default(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: Some(30),
            history_window: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl FileAdviceConfig {
    /// Convert to application-level advice parameters
    pub fn to_params(&self) -> AdviceParams {
        AdviceParams::default()
            .with_model(self.model.clone())
            .with_temperature(self.temperature)
            .with_history_window(self.history_window)
            .with_timeout(self.timeout())
    }

    /// Round-trip timeout; `None` when unset or 0
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Resolve the credential: inline value first, then the environment.
    ///
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Raw catalog configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// TOML or JSON catalog file; the built-in collection is used when unset
    pub path: Option<PathBuf>,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show the loading indicator while the stylist is thinking
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of stylist events
    pub conversation_log: Option<PathBuf>,
    /// Directory for daily-rolling diagnostic logs
    pub log_dir: Option<PathBuf>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub advice: FileAdviceConfig,
    pub catalog: FileCatalogConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.advice.model.as_str().trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        let temperature = self.advice.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigValidationError::TemperatureOutOfRange(temperature));
        }

        if let Some(0) = self.advice.history_window {
            return Err(ConfigValidationError::InvalidHistoryWindow);
        }

        if self.advice.endpoint.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[advice]
model = "gemini-3-pro-preview"
temperature = 0.4
timeout_seconds = 15
history_window = 8
api_key_env = "GEMINI_API_KEY"

[catalog]
path = "catalog.toml"

[output]
color = false

[repl]
show_progress = false
history_file = "~/.local/share/aurelio/history.txt"

[logging]
conversation_log = "aurelio.conversation.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.advice.model, AdviceModel::Gemini3Pro);
        assert_eq!(config.advice.temperature, 0.4);
        assert_eq!(config.advice.timeout_seconds, Some(15));
        assert_eq!(config.advice.history_window, Some(8));
        assert_eq!(config.advice.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.catalog.path, Some(PathBuf::from("catalog.toml")));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(
            config.logging.conversation_log,
            Some(PathBuf::from("aurelio.conversation.jsonl"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config_keeps_defaults() {
        let config: FileConfig = toml::from_str("[advice]\ntemperature = 1.0\n").unwrap();
        assert_eq!(config.advice.temperature, 1.0);
        assert_eq!(config.advice.model, AdviceModel::Gemini3Flash);
        assert_eq!(config.advice.endpoint, DEFAULT_ENDPOINT);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.advice.temperature = 3.5;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::TemperatureOutOfRange(3.5))
        );

        let mut config = FileConfig::default();
        config.advice.history_window = Some(0);
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidHistoryWindow)
        );

        let mut config = FileConfig::default();
        config.advice.model = AdviceModel::Custom("  ".to_string());
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }

    #[test]
    fn test_to_params() {
        let mut config = FileAdviceConfig::default();
        config.history_window = Some(4);
        config.timeout_seconds = None;
        let params = config.to_params();
        assert_eq!(params.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(params.history_window, Some(4));
        assert!(params.timeout.is_none());
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let config: FileConfig = toml::from_str("[advice]\ntimeout_seconds = 0\n").unwrap();
        assert!(config.validate().is_ok());
        assert!(config.advice.timeout().is_none());
        assert!(config.advice.to_params().timeout.is_none());

        let defaults = FileAdviceConfig::default();
        assert_eq!(defaults.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_inline_api_key_wins_and_blank_is_missing() {
        let mut config = FileAdviceConfig {
            api_key_env: "AURELIO_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());

        config.api_key = Some("   ".to_string());
        assert!(config.resolve_api_key().is_none());

        config.api_key = Some("secret".to_string());
        assert_eq!(config.resolve_api_key().as_deref(), Some("secret"));
    }
}

//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `awaybot.toml` in the working directory unless another path is
//! given. Every field has a default so the file is optional. Environment
//! variables take precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use awaybot_adapter_slack::DEFAULT_API_URL;
use awaybot_app::services::credentials::CredentialSettings;

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "awaybot.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Slack Web API settings.
    pub slack: SlackSettings,
    /// Secret store settings.
    pub secrets: SecretsConfig,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Slack Web API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SlackSettings {
    /// Base URL of the Web API.
    pub api_url: String,
    /// Log every request and raw response.
    pub debug: bool,
    /// Token used when no secret store is configured.
    pub token: Option<String>,
}

/// Secret store configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    /// Directory holding one file per secret. No store when unset.
    pub dir: Option<String>,
    /// Name of the secret holding the Slack token.
    pub name: String,
    /// Deadline for a single secret read, in seconds.
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("AWAYBOT_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("AWAYBOT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("AWAYBOT_DEBUG") {
            self.slack.debug = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("AWAYBOT_SLACK_API_URL") {
            self.slack.api_url = val;
        }
        if let Ok(val) = std::env::var("SLACK_TOKEN") {
            self.slack.token = Some(val);
        }
        if let Ok(val) = std::env::var("AWAYBOT_SECRETS_DIR") {
            self.secrets.dir = Some(val).filter(|dir| !dir.is_empty());
        }
        if let Ok(val) = std::env::var("AWAYBOT_SECRET_NAME") {
            self.secrets.name = val;
        }
        if let Ok(val) = std::env::var("AWAYBOT_SECRET_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.secrets.timeout_secs = secs;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.secrets.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "secrets.timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.secrets.name.is_empty() {
            return Err(ConfigError::Validation(
                "secrets.name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Build the credential resolver settings.
    #[must_use]
    pub fn credential_settings(&self) -> CredentialSettings {
        CredentialSettings {
            secret_name: self.secrets.name.clone(),
            timeout: Duration::from_secs(self.secrets.timeout_secs),
            fallback_token: self.slack.token.clone(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:awaybot.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "awaybot=info,awaybot_app=info,awaybot_adapter_slack=info".to_string(),
        }
    }
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            debug: false,
            token: None,
        }
    }
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            name: "slack-token".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

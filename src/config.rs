//! Runtime configuration.
//!
//! Configuration is read from a YAML file and then overridden from the
//! environment. Every field has a default so an empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Environment variable overriding [`BoardConfig::database_url`].
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable overriding [`BoardConfig::owner_id`].
pub const OWNER_ID_ENV: &str = "TASKBOARD_OWNER_ID";
/// Environment variable overriding [`SummarizerConfig::base_url`].
pub const SUMMARIZER_URL_ENV: &str = "TASKBOARD_SUMMARIZER_URL";
/// Environment variable overriding [`SummarizerConfig::api_key`].
pub const SUMMARIZER_KEY_ENV: &str = "TASKBOARD_SUMMARIZER_KEY";

const SUMMARIZE_PATH: &str = "/functions/v1/summarize-tasks";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`BoardConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The owner identifier is not a UUID.
    #[error("invalid owner id '{0}'")]
    InvalidOwnerId(String),

    /// A value is outside its accepted range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// Explanation.
        reason: String,
    },
}

/// Settings for the hosted prioritization endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Base URL of the functions host.
    pub base_url: String,
    /// Bearer key sent with each request.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl SummarizerConfig {
    /// Returns the full `summarize-tasks` URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{SUMMARIZE_PATH}", self.base_url.trim_end_matches('/'))
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_owned(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Top-level board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// `PostgreSQL` connection string.
    pub database_url: Option<String>,
    /// Owner whose board is loaded.
    pub owner_id: Option<Uuid>,
    /// Prioritization endpoint settings.
    pub summarizer: SummarizerConfig,
    /// How long the completion celebration stays visible, in milliseconds.
    pub celebration_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            owner_id: None,
            summarizer: SummarizerConfig::default(),
            celebration_ms: 2_000,
        }
    }
}

impl BoardConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadFile`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parses configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed input.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies overrides from a variable lookup.
    ///
    /// Takes a lookup function rather than reading the process environment
    /// so callers and tests control the source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOwnerId`] when the owner override is not
    /// a UUID.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database_url = Some(url);
        }
        if let Some(raw) = lookup(OWNER_ID_ENV) {
            let owner =
                Uuid::parse_str(raw.trim()).map_err(|_| ConfigError::InvalidOwnerId(raw.clone()))?;
            self.owner_id = Some(owner);
        }
        if let Some(url) = lookup(SUMMARIZER_URL_ENV) {
            self.summarizer.base_url = url;
        }
        if let Some(key) = lookup(SUMMARIZER_KEY_ENV) {
            self.summarizer.api_key = Some(key);
        }
        Ok(self)
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// See [`BoardConfig::with_overrides`].
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout, an empty
    /// summarizer URL or a celebration longer than a minute.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.summarizer.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "summarizer.timeout_secs",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.summarizer.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "summarizer.base_url",
                reason: "must not be empty".to_owned(),
            });
        }
        if self.celebration_ms > 60_000 {
            return Err(ConfigError::InvalidValue {
                field: "celebration_ms",
                reason: format!("{} exceeds 60000", self.celebration_ms),
            });
        }
        Ok(())
    }

    /// Returns the celebration duration.
    #[must_use]
    pub fn celebration_duration(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(i64::try_from(self.celebration_ms).unwrap_or(i64::MAX))
    }
}

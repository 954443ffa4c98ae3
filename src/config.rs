use std::path::Path;

use crate::ai::{LineWeights, SearchConfig};
use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::session::SessionConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ai: SearchConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ai.max_depth == 0 {
            return Err(ConfigError::Validation("ai.max_depth must be >= 1".into()));
        }
        if self.ai.max_depth > 12 {
            return Err(ConfigError::Validation("ai.max_depth must be <= 12".into()));
        }

        let w = &self.ai.weights;
        if w.two < 0 {
            return Err(ConfigError::Validation("ai.weights.two must be >= 0".into()));
        }
        if w.three <= w.two {
            return Err(ConfigError::Validation(
                "ai.weights.three must be > ai.weights.two".into(),
            ));
        }
        if w.four <= w.three {
            return Err(ConfigError::Validation(
                "ai.weights.four must be > ai.weights.three".into(),
            ));
        }
        if w.four > LineWeights::MAX {
            return Err(ConfigError::Validation(format!(
                "ai.weights.four must be <= {}",
                LineWeights::MAX
            )));
        }

        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not a log level",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

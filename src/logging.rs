//! Logger setup for the binaries. The library itself only emits through the
//! `log` macros.

use env_logger::{Builder, Env};

/// `[logging]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

/// Install the global logger. `RUST_LOG`, when set, wins over the config.
pub fn init(config: &LoggingConfig) -> Result<(), log::SetLoggerError> {
    Builder::from_env(Env::default().default_filter_or(config.level.as_str()))
        .format_timestamp(None)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_parses() {
        let config = LoggingConfig::default();
        assert_eq!(
            config.level.parse::<log::LevelFilter>().unwrap(),
            log::LevelFilter::Warn
        );
    }
}

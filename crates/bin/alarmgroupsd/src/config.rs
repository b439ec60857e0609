//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `alarmgroups.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use alarmgroups_adapter_local_notifications::LocalCenterConfig;
use alarmgroups_adapter_sound::SoundConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Alarm tone settings.
    pub sound: SoundConfig,
    /// Notification center settings.
    pub notifications: LocalCenterConfig,
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

impl Config {
    /// Load configuration from `alarmgroups.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("alarmgroups.toml")?;
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
        if let Ok(val) = std::env::var("ALARMGROUPS_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("ALARMGROUPS_SOUND") {
            self.sound.path = val.into();
        }
        if let Ok(val) = std::env::var("ALARMGROUPS_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "database url must not be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.sound.volume) {
            return Err(ConfigError::Validation(format!(
                "sound volume must be between 0.0 and 1.0, got {}",
                self.sound.volume
            )));
        }
        if self.notifications.tick_millis == 0 {
            return Err(ConfigError::Validation(
                "notification tick must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:alarmgroups.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "alarmgroupsd=info,alarmgroups=info".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.database.url, "sqlite:alarmgroups.db?mode=rwc");
        assert_eq!(config.notifications.tick_millis, 1_000);
        assert!(config.notifications.authorize);
        assert!((config.sound.volume - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.database_url(), "sqlite:alarmgroups.db?mode=rwc");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [sound]
            path = '/usr/share/sounds/alarm.ogg'
            volume = 0.5

            [notifications]
            tick_millis = 500
            authorize = false
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.sound.path, PathBuf::from("/usr/share/sounds/alarm.ogg"));
        assert!((config.sound.volume - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.notifications.tick_millis, 500);
        assert!(!config.notifications.authorize);
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [notifications]
            tick_millis = 250
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.notifications.tick_millis, 250);
        assert!(config.notifications.authorize);
        assert_eq!(config.database.url, "sqlite:alarmgroups.db?mode=rwc");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.database.url, "sqlite:alarmgroups.db?mode=rwc");
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_reject_out_of_range_volume() {
        let mut config = Config::default();
        config.sound.volume = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_zero_tick() {
        let mut config = Config::default();
        config.notifications.tick_millis = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_database_url() {
        let mut config = Config::default();
        config.database.url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}

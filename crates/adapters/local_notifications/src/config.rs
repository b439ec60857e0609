//! Local notification center configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the local notification center.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalCenterConfig {
    /// How often pending requests are checked, in milliseconds.
    pub tick_millis: u64,
    /// Answer given to authorization requests.
    pub authorize: bool,
}

impl Default for LocalCenterConfig {
    fn default() -> Self {
        Self {
            tick_millis: 1_000,
            authorize: true,
        }
    }
}

impl LocalCenterConfig {
    /// Tick period, never shorter than one millisecond.
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = LocalCenterConfig::default();
        assert_eq!(config.tick_millis, 1_000);
        assert!(config.authorize);
        assert_eq!(config.tick(), Duration::from_secs(1));
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r"
            tick_millis = 250
            authorize = false
        ";
        let config: LocalCenterConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.tick_millis, 250);
        assert!(!config.authorize);
    }

    #[test]
    fn should_clamp_zero_tick() {
        let config = LocalCenterConfig {
            tick_millis: 0,
            ..LocalCenterConfig::default()
        };
        assert_eq!(config.tick(), Duration::from_millis(1));
    }
}

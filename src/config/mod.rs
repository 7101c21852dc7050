//! Configuration loading and management

mod io;
mod settings;

pub use settings::Settings;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Resolved path of the habit data file
    pub fn data_file(&self) -> PathBuf {
        self.settings
            .data_file
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("habit_data.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[settings]\npretty_json = true\n").unwrap();
        assert!(config.settings.pretty_json);
        assert!(config.settings.seed_default_habits);
        assert_eq!(config.settings.heatmap_days, 14);
        assert!(config.data_file().ends_with("habit_data.json"));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_data_file() {
        let config: Config = toml::from_str("[settings]\ndata_file = \"/tmp/habits.json\"\n").unwrap();
        assert_eq!(config.data_file(), PathBuf::from("/tmp/habits.json"));
    }
}

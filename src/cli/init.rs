//! Init command implementation

use anyhow::{bail, Result};
use std::path::Path;

use habit_quest::config::Config;
use habit_quest::store::write_atomic;

/// Default configuration content for habit-quest init
pub const DEFAULT_CONFIG: &str = r#"# Habit Quest Configuration
# =========================
#
# Available options:
#   data_file            - Where habit data is stored (default: ~/.habit-quest/habit_data.json)
#   seed_default_habits  - Create the starter habits on first run (default: true)
#   pretty_json          - Write the data file as indented JSON (default: false)
#   heatmap_days         - Tracked days shown by `analytics heatmap` (default: 14)

[settings]
# data_file = "/path/to/habit_data.json"
seed_default_habits = true
pretty_json = false
heatmap_days = 14
"#;

/// Write the default config file
pub fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    // Default to global config path
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    write_atomic(&config_path, DEFAULT_CONFIG.as_bytes())?;
    println!("Created: {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_writes_config_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_command(Some(&path), false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
        assert!(!dir.path().join("nested").join("config.toml.tmp").exists());

        assert!(init_command(Some(&path), false).is_err());
        init_command(Some(&path), true).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }
}

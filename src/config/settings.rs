//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Where habit data is stored.
    /// Defaults to ~/.habit-quest/habit_data.json when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Create the default habit set when no data file exists yet
    #[serde(default = "default_seed_default_habits")]
    pub seed_default_habits: bool,

    /// Write the data file as indented JSON
    #[serde(default)]
    pub pretty_json: bool,

    /// Number of most recent tracked days shown in the heatmap
    #[serde(default = "default_heatmap_days")]
    pub heatmap_days: usize,
}

fn default_seed_default_habits() -> bool {
    true
}

fn default_heatmap_days() -> usize {
    14
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: None,
            seed_default_habits: default_seed_default_habits(),
            pretty_json: false,
            heatmap_days: default_heatmap_days(),
        }
    }
}

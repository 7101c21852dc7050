use serde::{Deserialize, Serialize};

use crate::progress::levels;

/// Account-wide progress across all habits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub total_xp: u64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_next_level_xp")]
    pub next_level_xp: u64,
}

fn default_level() -> u32 {
    1
}

fn default_next_level_xp() -> u64 {
    levels::next_level_xp(1)
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            total_xp: 0,
            level: default_level(),
            next_level_xp: default_next_level_xp(),
        }
    }
}

impl UserProfile {
    /// Add XP and re-derive level and threshold.
    ///
    /// Returns the previous level when the grant crossed into a higher level.
    pub fn grant_xp(&mut self, amount: u64) -> Option<u32> {
        let old_level = self.level;
        self.total_xp = self.total_xp.saturating_add(amount);
        self.level = levels::level_for_xp(self.total_xp);
        self.next_level_xp = levels::next_level_xp(self.level);
        (self.level > old_level).then_some(old_level)
    }
}

//! XP and Level system
//!
//! The same curve applies to a single habit's XP and to the account total:
//! `level = max(1, floor(1 + sqrt(xp / 100)))`.

/// Level reached with `xp` experience points
pub fn level_for_xp(xp: u64) -> u32 {
    // floor(sqrt(xp / 100)) == floor(isqrt(xp) / 10), kept in integers to avoid
    // rounding at exact squares.
    let level = 1 + xp.isqrt() / 10;
    u32::try_from(level).unwrap_or(u32::MAX).max(1)
}

/// XP threshold shown as the target for the level after `level`
pub fn next_level_xp(level: u32) -> u64 {
    let next = u64::from(level) + 1;
    next.saturating_mul(next).saturating_mul(100)
}

/// XP threshold used as the start of the progress bar for `level`
pub fn previous_level_xp(level: u32) -> u64 {
    let level = u64::from(level);
    level.saturating_mul(level).saturating_mul(100)
}

/// Progress towards the next level, for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProgress {
    pub xp: u64,
    pub level: u32,
    pub previous_level_xp: u64,
    pub next_level_xp: u64,
}

impl LevelProgress {
    pub fn new(xp: u64) -> Self {
        let level = level_for_xp(xp);
        Self {
            xp,
            level,
            previous_level_xp: previous_level_xp(level),
            next_level_xp: next_level_xp(level),
        }
    }

    /// Progress percentage to next level (0.0 - 100.0)
    pub fn percent(&self) -> f64 {
        if self.next_level_xp == self.previous_level_xp {
            return 0.0;
        }
        let span = (self.next_level_xp - self.previous_level_xp) as f64;
        let gained = self.xp as f64 - self.previous_level_xp as f64;
        (gained / span * 100.0).clamp(0.0, 100.0)
    }
}

/// XP rewards for habit actions
pub struct XpRewards;

impl XpRewards {
    /// Base XP for marking a habit done
    pub const COMPLETION_BASE: u64 = 5;

    /// Upper bound for a single day's completion reward
    pub const COMPLETION_CAP: u64 = 20;

    /// XP for one completion given the habit's streak
    /// Streak 0 = 5 XP, streak 1 = 7 XP, etc. (capped at 20)
    pub fn completion(streak: u32) -> u64 {
        (Self::COMPLETION_BASE + u64::from(streak) * 2).min(Self::COMPLETION_CAP)
    }
}

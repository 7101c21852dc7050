//! Gamification engine: Streaks, XP, Levels, and Achievements
//!
//! One user action flows through the engine as
//! ledger update -> streak recompute -> XP award -> level recompute -> achievement scan.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use habit_quest::progress::HabitTracker;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
//! let mut tracker = HabitTracker::new();
//! let id = tracker.add_habit("Walking Pad", "Exercise", today).unwrap();
//! let events = tracker.toggle_completion(&id, today, true, today).unwrap();
//! assert!(!events.is_empty());
//! assert_eq!(tracker.habit(&id).unwrap().streak, 1);
//! ```

pub mod analytics;
mod book;
mod checker;
mod definitions;
pub mod levels;
pub mod streaks;
mod tracker;

pub use book::AchievementBook;
pub use definitions::{Achievement, AchievementId, Milestone, StreakMilestone, ACHIEVEMENTS};
pub use levels::{LevelProgress, XpRewards};
pub use streaks::{calculate_streak, StreakSummary};
pub use tracker::{
    visible_streak_holders, HabitTracker, LevelScope, LevelUp, ProgressEvent, UnlockedAchievement,
    XpReason, DEFAULT_HABITS,
};

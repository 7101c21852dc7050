//! CLI command implementations

pub mod achievements;
pub mod analytics;
pub mod data;
pub mod habit;
pub mod init;
pub mod status;
pub mod track;

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use habit_quest::config::Config;
use habit_quest::progress::{HabitTracker, LevelScope, ProgressEvent, XpReason};
use habit_quest::store::SnapshotStore;

/// Loaded state for one command invocation
pub struct Session {
    pub config: Config,
    pub store: SnapshotStore,
    pub tracker: HabitTracker,
    pub today: NaiveDate,
}

impl Session {
    /// Load config and habit data, seeding defaults on first run and rolling
    /// streaks forward to `today`
    pub fn open(config_path: Option<&Path>, data_path: Option<&Path>, today: NaiveDate) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_or_init(path)?,
            None => Config::load()?,
        };

        let data_file = data_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.data_file());
        let store = SnapshotStore::new(data_file).pretty(config.settings.pretty_json);

        let loaded = store.load()?;
        let first_run = loaded.is_none();
        let mut tracker = match loaded {
            Some((tracker, report)) => {
                if !report.recovered_sections.is_empty() {
                    eprintln!(
                        "Warning: unreadable sections reset to defaults: {}",
                        report.recovered_sections.join(", ")
                    );
                }
                if !report.skipped_habits.is_empty() {
                    eprintln!(
                        "Warning: unreadable habits dropped: {}",
                        report.skipped_habits.join(", ")
                    );
                }
                if !report.skipped_achievements.is_empty() {
                    eprintln!(
                        "Warning: unreadable achievement entries dropped: {}",
                        report.skipped_achievements.join(", ")
                    );
                }
                tracker
            }
            None if config.settings.seed_default_habits => HabitTracker::with_default_habits(today),
            None => HabitTracker::new(),
        };

        let events = tracker.refresh_streaks(today);
        print_events(&tracker, &events);

        let session = Self {
            config,
            store,
            tracker,
            today,
        };
        if first_run || !events.is_empty() {
            session.save()?;
        }
        Ok(session)
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.tracker)
    }
}

/// Print progress notifications for the user
pub fn print_events(tracker: &HabitTracker, events: &[ProgressEvent]) {
    for event in events {
        match event {
            ProgressEvent::XpAwarded {
                habit: Some(id),
                amount,
                reason: XpReason::Completion,
            } => {
                let name = tracker.habit(id).map(|h| h.name.as_str()).unwrap_or(id.as_str());
                println!("🎯 {} completed! +{} XP", name, amount);
            }
            // Achievement XP is shown with the unlock message
            ProgressEvent::XpAwarded { .. } => {}
            ProgressEvent::AchievementUnlocked(unlocked) => {
                let target = unlocked
                    .habit
                    .as_ref()
                    .and_then(|id| tracker.habit(id))
                    .map(|h| format!(" for {}", h.name))
                    .unwrap_or_default();
                println!(
                    "🏆 Achievement Unlocked: {}{}! +{} XP",
                    unlocked.achievement.name, target, unlocked.achievement.xp_reward
                );
            }
            ProgressEvent::LevelUp(level_up) => match &level_up.scope {
                LevelScope::Account => {
                    println!("🎉 Level Up! You've reached level {}!", level_up.new_level)
                }
                LevelScope::Habit(id) => {
                    if let Some(habit) = tracker.habit(id) {
                        println!("⬆️  {} reached level {}", habit.name, level_up.new_level);
                    }
                }
            },
            ProgressEvent::StreakUpdated { .. } => {}
        }
    }
}

//! Shared test utilities for tracker integration tests

use chrono::NaiveDate;
use habit_quest::progress::HabitTracker;
use habit_quest::HabitId;

/// Day of January 2024
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).expect("valid January date")
}

/// Tracker with the given (category, name) habits, created on Jan 1st
pub fn tracker_with(habits: &[(&str, &str)]) -> (HabitTracker, Vec<HabitId>) {
    let mut tracker = HabitTracker::new();
    let ids = habits
        .iter()
        .map(|(category, name)| {
            tracker
                .add_habit(name, category, day(1))
                .expect("Failed to add habit")
        })
        .collect();
    (tracker, ids)
}

/// Mark a habit done for each listed day, using that day as "today"
pub fn complete_days(tracker: &mut HabitTracker, id: &HabitId, days: &[u32]) {
    for d in days {
        tracker
            .toggle_completion(id, day(*d), true, day(*d))
            .expect("Failed to toggle completion");
    }
}

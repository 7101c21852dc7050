//! Earned achievement records
//!
//! Records are monotonic: once an achievement is recorded it is never revoked,
//! even when the habit it was earned for is deleted later.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::definitions::{Milestone, StreakMilestone};
use crate::domain::HabitId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementBook {
    streaks: BTreeMap<StreakMilestone, BTreeMap<HabitId, NaiveDate>>,
    milestones: BTreeSet<Milestone>,
}

impl AchievementBook {
    pub fn has_streak(&self, milestone: StreakMilestone, habit: &HabitId) -> bool {
        self.streaks
            .get(&milestone)
            .is_some_and(|holders| holders.contains_key(habit))
    }

    /// Record a streak unlock for a habit. Returns false if it was already held.
    pub fn record_streak(&mut self, milestone: StreakMilestone, habit: HabitId, on: NaiveDate) -> bool {
        let holders = self.streaks.entry(milestone).or_default();
        if holders.contains_key(&habit) {
            return false;
        }
        holders.insert(habit, on);
        true
    }

    /// Habits holding a streak achievement, with their unlock date
    pub fn streak_holders(&self, milestone: StreakMilestone) -> impl Iterator<Item = (&HabitId, NaiveDate)> {
        self.streaks
            .get(&milestone)
            .into_iter()
            .flat_map(|holders| holders.iter().map(|(id, on)| (id, *on)))
    }

    pub fn has_milestone(&self, milestone: Milestone) -> bool {
        self.milestones.contains(&milestone)
    }

    /// Record a milestone. Returns false if it was already earned.
    pub fn record_milestone(&mut self, milestone: Milestone) -> bool {
        self.milestones.insert(milestone)
    }

    /// Total earned records (each streak holder counts once)
    pub fn earned_count(&self) -> usize {
        self.streaks.values().map(BTreeMap::len).sum::<usize>() + self.milestones.len()
    }
}

//! Habit Tracker - core progress logic
//!
//! Owns the whole state tree (habits, earned achievements, account profile) and
//! applies user actions to it. Every mutating call takes "today" explicitly and
//! returns the [`ProgressEvent`]s it produced.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::book::AchievementBook;
use super::checker::{check_milestone_achievements, check_streak_achievements, MilestoneContext};
use super::definitions::{Achievement, AchievementId, Milestone, StreakMilestone};
use super::levels::{self, XpRewards};
use super::streaks::StreakSummary;
use crate::domain::{Habit, HabitId, TrackerError, UserProfile};

/// Habits created on first run, by category
pub const DEFAULT_HABITS: &[(&str, &[&str])] = &[
    ("Exercise", &["Walking Pad", "Gym/Training", "Pilates/Yoga"]),
    ("Reading", &["Fantasy", "Textbooks", "DK Books"]),
    ("Entertainment", &["Gaming", "Movies/TV", "Sport"]),
    ("Self Improvement", &["YouTube Learning", "Coding Projects", "Piano"]),
];

/// An achievement that was just unlocked
#[derive(Debug, Clone, PartialEq)]
pub struct UnlockedAchievement {
    pub achievement: &'static Achievement,
    /// Habit the achievement was earned for (streak achievements only)
    pub habit: Option<HabitId>,
    pub unlocked_on: NaiveDate,
}

/// Whose level changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelScope {
    Account,
    Habit(HabitId),
}

/// A level up event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub scope: LevelScope,
    pub old_level: u32,
    pub new_level: u32,
}

/// Why XP was granted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XpReason {
    Completion,
    Achievement(AchievementId),
}

/// Events produced while applying an action
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    XpAwarded {
        habit: Option<HabitId>,
        amount: u64,
        reason: XpReason,
    },
    LevelUp(LevelUp),
    StreakUpdated {
        habit: HabitId,
        current: u32,
        longest: u32,
    },
    AchievementUnlocked(UnlockedAchievement),
}

/// The single mutable state tree of one user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitTracker {
    habits: BTreeMap<HabitId, Habit>,
    achievements: AchievementBook,
    user: UserProfile,
}

impl HabitTracker {
    /// Empty tracker with no habits
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker seeded with [`DEFAULT_HABITS`]
    pub fn with_default_habits(today: NaiveDate) -> Self {
        let mut tracker = Self::new();
        for (category, names) in DEFAULT_HABITS {
            for name in *names {
                // Default names are non-empty and distinct
                if let Err(e) = tracker.add_habit(name, category, today) {
                    tracing::warn!("Skipping default habit {}: {}", name, e);
                }
            }
        }
        tracker
    }

    /// Rebuild a tracker from already-decoded parts
    pub(crate) fn from_parts(
        habits: BTreeMap<HabitId, Habit>,
        achievements: AchievementBook,
        user: UserProfile,
    ) -> Self {
        Self {
            habits,
            achievements,
            user,
        }
    }

    pub fn habits(&self) -> &BTreeMap<HabitId, Habit> {
        &self.habits
    }

    pub fn habit(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.get(id)
    }

    pub fn achievements(&self) -> &AchievementBook {
        &self.achievements
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    // ========================================
    // HABIT OPERATIONS
    // ========================================

    /// Add a habit. Fails if name or category is blank or the derived id is taken.
    pub fn add_habit(&mut self, name: &str, category: &str, today: NaiveDate) -> Result<HabitId, TrackerError> {
        let habit = Habit::new(name, category, today)?;
        let id = habit.id();
        if self.habits.contains_key(&id) {
            return Err(TrackerError::DuplicateHabit(id));
        }

        debug!("Adding habit {}", id);
        self.habits.insert(id.clone(), habit);
        Ok(id)
    }

    /// Remove a habit and its ledger. Earned achievements and XP are kept.
    pub fn delete_habit(&mut self, id: &HabitId) -> Result<Habit, TrackerError> {
        let habit = self
            .habits
            .remove(id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        debug!("Deleted habit {}", id);
        Ok(habit)
    }

    /// Mark or unmark a habit for `date`.
    ///
    /// Marking a day that was not already complete awards completion XP based on
    /// the streak the habit had before this mark. Unmarking stores `false` and
    /// never takes XP back. Streak and achievements are re-evaluated either way.
    /// Days after `today` are rejected.
    pub fn toggle_completion(
        &mut self,
        id: &HabitId,
        date: NaiveDate,
        completed: bool,
        today: NaiveDate,
    ) -> Result<Vec<ProgressEvent>, TrackerError> {
        let habit = self
            .habits
            .get_mut(id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        if date > today {
            return Err(TrackerError::Validation(format!(
                "cannot track {} ahead of today ({})",
                date, today
            )));
        }

        let previous = habit.set_completion(date, completed);
        let streak_before = habit.streak;
        let mut events = Vec::new();

        if completed && previous != Some(true) {
            let reward = XpRewards::completion(streak_before);
            self.award_habit_xp(id, reward, XpReason::Completion, &mut events);
        }

        self.recompute_streak(id, today, &mut events);
        self.streak_pass(id, today, &mut events);
        self.milestone_pass(today, &mut events);

        Ok(events)
    }

    /// Recompute every habit's streak for a new day and run the streak pass on each
    pub fn refresh_streaks(&mut self, today: NaiveDate) -> Vec<ProgressEvent> {
        let mut events = Vec::new();
        let ids: Vec<HabitId> = self.habits.keys().cloned().collect();
        for id in &ids {
            self.recompute_streak(id, today, &mut events);
            self.streak_pass(id, today, &mut events);
        }
        self.milestone_pass(today, &mut events);
        events
    }

    /// Clear everything back to an empty tracker
    pub fn reset_all(&mut self) {
        info!("Resetting all habits, achievements and progress");
        *self = Self::default();
    }

    // ========================================
    // DERIVED STATE
    // ========================================

    fn recompute_streak(&mut self, id: &HabitId, today: NaiveDate, events: &mut Vec<ProgressEvent>) {
        let Some(habit) = self.habits.get_mut(id) else {
            return;
        };

        let summary = StreakSummary::recompute(&habit.completions, today, habit.longest_streak);
        if summary.current != habit.streak || summary.longest != habit.longest_streak {
            debug!(
                "Streak for {}: {} -> {} (longest {})",
                id, habit.streak, summary.current, summary.longest
            );
            habit.streak = summary.current;
            habit.longest_streak = summary.longest;
            events.push(ProgressEvent::StreakUpdated {
                habit: id.clone(),
                current: summary.current,
                longest: summary.longest,
            });
        }
    }

    /// Grant XP to a habit and the account, emitting level ups for both
    fn award_habit_xp(&mut self, id: &HabitId, amount: u64, reason: XpReason, events: &mut Vec<ProgressEvent>) {
        let Some(habit) = self.habits.get_mut(id) else {
            return;
        };

        let old_level = habit.level;
        habit.xp = habit.xp.saturating_add(amount);
        habit.level = levels::level_for_xp(habit.xp);
        let new_habit_level = habit.level;

        events.push(ProgressEvent::XpAwarded {
            habit: Some(id.clone()),
            amount,
            reason,
        });

        if new_habit_level > old_level {
            events.push(ProgressEvent::LevelUp(LevelUp {
                scope: LevelScope::Habit(id.clone()),
                old_level,
                new_level: new_habit_level,
            }));
        }

        self.grant_account_xp(amount, events);
    }

    fn grant_account_xp(&mut self, amount: u64, events: &mut Vec<ProgressEvent>) {
        if let Some(old_level) = self.user.grant_xp(amount) {
            info!("Level up! {} -> {}", old_level, self.user.level);
            events.push(ProgressEvent::LevelUp(LevelUp {
                scope: LevelScope::Account,
                old_level,
                new_level: self.user.level,
            }));
        }
    }

    fn streak_pass(&mut self, id: &HabitId, today: NaiveDate, events: &mut Vec<ProgressEvent>) {
        let Some(streak) = self.habits.get(id).map(|h| h.streak) else {
            return;
        };

        for milestone in check_streak_achievements(id, streak, &self.achievements) {
            if !self.achievements.record_streak(milestone, id.clone(), today) {
                continue;
            }
            let achievement = Achievement::streak(milestone);
            info!("Achievement unlocked: {} for {}", achievement.name, id);
            events.push(ProgressEvent::AchievementUnlocked(UnlockedAchievement {
                achievement,
                habit: Some(id.clone()),
                unlocked_on: today,
            }));
            self.award_habit_xp(
                id,
                achievement.xp_reward,
                XpReason::Achievement(AchievementId::Streak(milestone)),
                events,
            );
        }
    }

    fn milestone_pass(&mut self, today: NaiveDate, events: &mut Vec<ProgressEvent>) {
        let unlocked: Vec<Milestone> = {
            let ctx = MilestoneContext::from_habits(&self.habits);
            check_milestone_achievements(&ctx, &self.achievements)
        };

        for milestone in unlocked {
            if !self.achievements.record_milestone(milestone) {
                continue;
            }
            let achievement = Achievement::milestone(milestone);
            info!("Achievement unlocked: {}", achievement.name);
            events.push(ProgressEvent::AchievementUnlocked(UnlockedAchievement {
                achievement,
                habit: None,
                unlocked_on: today,
            }));
            events.push(ProgressEvent::XpAwarded {
                habit: None,
                amount: achievement.xp_reward,
                reason: XpReason::Achievement(AchievementId::Milestone(milestone)),
            });
            self.grant_account_xp(achievement.xp_reward, events);
        }
    }
}

/// Streak achievements held by habits that still exist
pub fn visible_streak_holders<'a>(
    tracker: &'a HabitTracker,
    milestone: StreakMilestone,
) -> impl Iterator<Item = (&'a Habit, NaiveDate)> + 'a {
    tracker
        .achievements
        .streak_holders(milestone)
        .filter_map(move |(id, on)| tracker.habits.get(id).map(|habit| (habit, on)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn tracker_with(habits: &[(&str, &str)]) -> (HabitTracker, Vec<HabitId>) {
        let mut tracker = HabitTracker::new();
        let ids = habits
            .iter()
            .map(|(category, name)| tracker.add_habit(name, category, day(1)).unwrap())
            .collect();
        (tracker, ids)
    }

    fn xp_events(events: &[ProgressEvent]) -> Vec<(Option<HabitId>, u64)> {
        events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::XpAwarded { habit, amount, .. } => Some((habit.clone(), *amount)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_default_seed() {
        let tracker = HabitTracker::with_default_habits(day(1));
        assert_eq!(tracker.habits().len(), 12);
        assert!(tracker.habit(&HabitId::from_raw("self_improvement_piano")).is_some());
        assert!(tracker.habit(&HabitId::from_raw("reading_dk_books")).is_some());
    }

    #[test]
    fn test_add_duplicate_and_delete_missing() {
        let (mut tracker, ids) = tracker_with(&[("Exercise", "Run")]);
        let before = tracker.clone();

        assert!(matches!(
            tracker.add_habit("run", "exercise", day(2)),
            Err(TrackerError::DuplicateHabit(_))
        ));
        assert!(matches!(
            tracker.add_habit("", "exercise", day(2)),
            Err(TrackerError::Validation(_))
        ));
        assert!(matches!(
            tracker.delete_habit(&HabitId::from_raw("nope")),
            Err(TrackerError::NotFound(_))
        ));
        assert!(matches!(
            tracker.toggle_completion(&HabitId::from_raw("nope"), day(1), true, day(1)),
            Err(TrackerError::NotFound(_))
        ));
        assert_eq!(tracker, before);

        tracker.delete_habit(&ids[0]).unwrap();
        assert!(tracker.habits().is_empty());
    }

    #[test]
    fn test_future_day_is_rejected() {
        let (mut tracker, ids) = tracker_with(&[("Exercise", "Run")]);
        tracker.toggle_completion(&ids[0], day(1), true, day(1)).unwrap();
        let before = tracker.clone();

        assert!(matches!(
            tracker.toggle_completion(&ids[0], day(30), true, day(1)),
            Err(TrackerError::Validation(_))
        ));
        assert!(matches!(
            tracker.toggle_completion(&ids[0], day(2), false, day(1)),
            Err(TrackerError::Validation(_))
        ));
        assert_eq!(tracker, before);

        // Streak keeps following the calendar
        tracker.refresh_streaks(day(20));
        assert_eq!(tracker.habit(&ids[0]).unwrap().streak, 0);
    }

    #[test]
    fn test_xp_saturates() {
        let (mut tracker, ids) = tracker_with(&[("Exercise", "Run")]);
        tracker.habits.get_mut(&ids[0]).unwrap().xp = u64::MAX - 1;
        tracker.user.total_xp = u64::MAX - 1;

        tracker.toggle_completion(&ids[0], day(1), true, day(1)).unwrap();
        assert_eq!(tracker.habit(&ids[0]).unwrap().xp, u64::MAX);
        assert_eq!(tracker.user().total_xp, u64::MAX);
        assert_eq!(tracker.user().level, levels::level_for_xp(u64::MAX));
    }

    #[test]
    fn test_first_completion_awards_base_and_first_steps() {
        let (mut tracker, ids) = tracker_with(&[("Exercise", "Run"), ("Reading", "Fantasy")]);
        let events = tracker.toggle_completion(&ids[0], day(1), true, day(1)).unwrap();

        assert_eq!(
            xp_events(&events),
            vec![(Some(ids[0].clone()), 5), (None, 10)]
        );
        let habit = tracker.habit(&ids[0]).unwrap();
        assert_eq!(habit.xp, 5);
        assert_eq!(habit.streak, 1);
        assert_eq!(tracker.user().total_xp, 15);
        assert!(tracker.achievements().has_milestone(Milestone::FirstHabit));
        assert!(!tracker.achievements().has_milestone(Milestone::AllCategories));
    }

    #[test]
    fn test_remarking_awards_nothing_and_unmark_keeps_xp() {
        let (mut tracker, ids) = tracker_with(&[("Exercise", "Run")]);
        tracker.toggle_completion(&ids[0], day(1), true, day(1)).unwrap();
        let xp = tracker.user().total_xp;

        let events = tracker.toggle_completion(&ids[0], day(1), true, day(1)).unwrap();
        assert!(xp_events(&events).is_empty());

        let events = tracker.toggle_completion(&ids[0], day(1), false, day(1)).unwrap();
        assert!(xp_events(&events).is_empty());
        assert_eq!(tracker.user().total_xp, xp);

        let habit = tracker.habit(&ids[0]).unwrap();
        assert_eq!(habit.streak, 0);
        assert_eq!(habit.longest_streak, 1);
        assert_eq!(habit.tracked_days(), 1);
    }

    #[test]
    fn test_three_day_streak_unlocks_once() {
        let (mut tracker, ids) = tracker_with(&[("Exercise", "Run")]);
        tracker.toggle_completion(&ids[0], day(1), true, day(1)).unwrap();
        tracker.toggle_completion(&ids[0], day(2), true, day(2)).unwrap();
        let events = tracker.toggle_completion(&ids[0], day(3), true, day(3)).unwrap();

        // Completion XP uses the streak before the mark (2 -> 9 XP), then +30
        assert_eq!(
            xp_events(&events),
            vec![(Some(ids[0].clone()), 9), (Some(ids[0].clone()), 30)]
        );
        assert!(tracker.achievements().has_streak(StreakMilestone::ThreeDays, &ids[0]));

        let xp = tracker.user().total_xp;
        let events = tracker.refresh_streaks(day(3));
        assert!(events.is_empty());
        assert_eq!(tracker.user().total_xp, xp);
        assert_eq!(tracker.achievements().earned_count(), 3); // streak + first steps + all categories
    }

    #[test]
    fn test_refresh_breaks_stale_streaks() {
        let (mut tracker, ids) = tracker_with(&[("Exercise", "Run")]);
        tracker.toggle_completion(&ids[0], day(1), true, day(1)).unwrap();
        tracker.toggle_completion(&ids[0], day(2), true, day(2)).unwrap();

        assert!(tracker.refresh_streaks(day(3)).is_empty()); // grace day
        let events = tracker.refresh_streaks(day(4));
        assert_eq!(
            events,
            vec![ProgressEvent::StreakUpdated {
                habit: ids[0].clone(),
                current: 0,
                longest: 2,
            }]
        );
    }

    #[test]
    fn test_account_level_up_event() {
        let (mut tracker, ids) = tracker_with(&[("Exercise", "Run")]);
        let mut level_ups = Vec::new();
        for d in 1..=8 {
            let events = tracker.toggle_completion(&ids[0], day(d), true, day(d)).unwrap();
            level_ups.extend(events.into_iter().filter_map(|e| match e {
                ProgressEvent::LevelUp(l) if l.scope == LevelScope::Account => Some(l),
                _ => None,
            }));
        }
        assert_eq!(tracker.user().level, levels::level_for_xp(tracker.user().total_xp));
        assert!(!level_ups.is_empty());
        assert_eq!(level_ups[0].old_level, 1);
        assert_eq!(level_ups[0].new_level, 2);
    }

    #[test]
    fn test_deleted_holder_is_hidden() {
        let (mut tracker, ids) = tracker_with(&[("Exercise", "Run"), ("Exercise", "Swim")]);
        for d in 1..=3 {
            tracker.toggle_completion(&ids[0], day(d), true, day(d)).unwrap();
        }
        assert_eq!(visible_streak_holders(&tracker, StreakMilestone::ThreeDays).count(), 1);

        tracker.delete_habit(&ids[0]).unwrap();
        assert!(tracker.achievements().has_streak(StreakMilestone::ThreeDays, &ids[0]));
        assert_eq!(visible_streak_holders(&tracker, StreakMilestone::ThreeDays).count(), 0);
    }

    #[test]
    fn test_reset_all() {
        let (mut tracker, ids) = tracker_with(&[("Exercise", "Run")]);
        tracker.toggle_completion(&ids[0], day(1), true, day(1)).unwrap();
        tracker.reset_all();
        assert_eq!(tracker, HabitTracker::new());
        assert_eq!(tracker.user().level, 1);
    }
}

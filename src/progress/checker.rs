//! Achievement checking logic
//!
//! Pure functions that report which achievements should unlock, given the
//! current state and what is already earned. Recording and XP happen in the
//! tracker.

use std::collections::{BTreeMap, BTreeSet};

use super::book::AchievementBook;
use super::definitions::{Milestone, StreakMilestone};
use crate::domain::{Habit, HabitId};

/// Check streak thresholds for one habit (4 achievements)
pub fn check_streak_achievements(
    habit: &HabitId,
    current_streak: u32,
    book: &AchievementBook,
) -> Vec<StreakMilestone> {
    StreakMilestone::ALL
        .into_iter()
        .filter(|m| current_streak >= m.days() && !book.has_streak(*m, habit))
        .collect()
}

/// Aggregates over all habits needed by the milestone pass
#[derive(Debug, Clone, Default)]
pub struct MilestoneContext<'a> {
    /// Habits with at least one completed day
    pub completed_habits: usize,
    /// Categories represented among completed habits
    pub completed_categories: BTreeSet<&'a str>,
    /// Every category in the collection
    pub all_categories: BTreeSet<&'a str>,
}

impl<'a> MilestoneContext<'a> {
    pub fn from_habits(habits: &'a BTreeMap<HabitId, Habit>) -> Self {
        let mut ctx = Self::default();
        for habit in habits.values() {
            ctx.all_categories.insert(habit.category.as_str());
            if habit.has_any_completion() {
                ctx.completed_habits += 1;
                ctx.completed_categories.insert(habit.category.as_str());
            }
        }
        ctx
    }
}

/// Check global milestones (3 achievements)
pub fn check_milestone_achievements(ctx: &MilestoneContext<'_>, book: &AchievementBook) -> Vec<Milestone> {
    let mut newly_unlocked = Vec::new();

    // First Steps: any completion at all
    if ctx.completed_habits >= 1 && !book.has_milestone(Milestone::FirstHabit) {
        newly_unlocked.push(Milestone::FirstHabit);
    }

    // Variety Pack: five different habits
    if ctx.completed_habits >= 5 && !book.has_milestone(Milestone::FiveHabits) {
        newly_unlocked.push(Milestone::FiveHabits);
    }

    // Well-Rounded: every category covered. An empty collection never qualifies.
    if ctx.completed_habits > 0
        && ctx.completed_categories == ctx.all_categories
        && !book.has_milestone(Milestone::AllCategories)
    {
        newly_unlocked.push(Milestone::AllCategories);
    }

    newly_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn habits(specs: &[(&str, &str, bool)]) -> BTreeMap<HabitId, Habit> {
        specs
            .iter()
            .map(|(category, name, done)| {
                let mut habit = Habit::new(name, category, day(1)).unwrap();
                if *done {
                    habit.set_completion(day(1), true);
                }
                (habit.id(), habit)
            })
            .collect()
    }

    #[test]
    fn test_streak_thresholds() {
        let id = HabitId::derive("Exercise", "Run");
        let book = AchievementBook::default();
        assert!(check_streak_achievements(&id, 2, &book).is_empty());
        assert_eq!(
            check_streak_achievements(&id, 7, &book),
            vec![StreakMilestone::ThreeDays, StreakMilestone::SevenDays]
        );
    }

    #[test]
    fn test_streak_skips_earned() {
        let id = HabitId::derive("Exercise", "Run");
        let mut book = AchievementBook::default();
        book.record_streak(StreakMilestone::ThreeDays, id.clone(), day(3));
        assert_eq!(
            check_streak_achievements(&id, 7, &book),
            vec![StreakMilestone::SevenDays]
        );
        // Another habit earns independently
        let other = HabitId::derive("Reading", "Fantasy");
        assert_eq!(
            check_streak_achievements(&other, 3, &book),
            vec![StreakMilestone::ThreeDays]
        );
    }

    #[test]
    fn test_milestones() {
        let book = AchievementBook::default();

        let none = habits(&[("A", "x", false), ("B", "y", false)]);
        let ctx = MilestoneContext::from_habits(&none);
        assert!(check_milestone_achievements(&ctx, &book).is_empty());

        let one = habits(&[("A", "x", true), ("B", "y", false)]);
        let ctx = MilestoneContext::from_habits(&one);
        assert_eq!(check_milestone_achievements(&ctx, &book), vec![Milestone::FirstHabit]);

        let both = habits(&[("A", "x", true), ("B", "y", true)]);
        let ctx = MilestoneContext::from_habits(&both);
        assert_eq!(
            check_milestone_achievements(&ctx, &book),
            vec![Milestone::FirstHabit, Milestone::AllCategories]
        );
    }

    #[test]
    fn test_empty_collection_unlocks_nothing() {
        let empty = BTreeMap::new();
        let ctx = MilestoneContext::from_habits(&empty);
        assert!(check_milestone_achievements(&ctx, &AchievementBook::default()).is_empty());
    }
}

//! Dashboard analytics over the habit collection
//!
//! Rates use tracked days as the denominator, so a day that was marked and
//! later unmarked still lowers the rate.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::domain::{Habit, HabitId};

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Share of habits completed on `today` (0.0 - 100.0)
pub fn completion_rate_on(habits: &BTreeMap<HabitId, Habit>, today: NaiveDate) -> f64 {
    let done = habits.values().filter(|h| h.is_completed(today)).count();
    percent(done, habits.len())
}

/// Completion rate of a single habit
#[derive(Debug, Clone, PartialEq)]
pub struct HabitRate<'a> {
    pub id: &'a HabitId,
    pub habit: &'a Habit,
    pub completed_days: usize,
    pub tracked_days: usize,
    pub rate: f64,
}

/// Per-habit completion rates, best first
pub fn habit_completion_rates(habits: &BTreeMap<HabitId, Habit>) -> Vec<HabitRate<'_>> {
    let mut rates: Vec<HabitRate<'_>> = habits
        .iter()
        .map(|(id, habit)| {
            let completed_days = habit.completed_days();
            let tracked_days = habit.tracked_days();
            HabitRate {
                id,
                habit,
                completed_days,
                tracked_days,
                rate: percent(completed_days, tracked_days),
            }
        })
        .collect();
    rates.sort_by(|a, b| b.rate.total_cmp(&a.rate));
    rates
}

/// Completed vs tracked entries for one category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPerformance {
    pub completed: usize,
    pub tracked: usize,
}

impl CategoryPerformance {
    pub fn rate(&self) -> f64 {
        percent(self.completed, self.tracked)
    }
}

/// Completion performance grouped by category
pub fn category_performance(habits: &BTreeMap<HabitId, Habit>) -> BTreeMap<&str, CategoryPerformance> {
    let mut by_category: BTreeMap<&str, CategoryPerformance> = BTreeMap::new();
    for habit in habits.values() {
        let entry = by_category.entry(habit.category.as_str()).or_default();
        entry.tracked += habit.tracked_days();
        entry.completed += habit.completed_days();
    }
    by_category
}

/// Habits grouped by category, for the tracking view
pub fn habits_by_category(habits: &BTreeMap<HabitId, Habit>) -> BTreeMap<&str, Vec<(&HabitId, &Habit)>> {
    let mut grouped: BTreeMap<&str, Vec<(&HabitId, &Habit)>> = BTreeMap::new();
    for (id, habit) in habits {
        grouped.entry(habit.category.as_str()).or_default().push((id, habit));
    }
    grouped
}

/// Current vs longest streak per habit, sorted by longest streak
pub fn streak_board(habits: &BTreeMap<HabitId, Habit>) -> Vec<(&Habit, u32, u32)> {
    let mut board: Vec<(&Habit, u32, u32)> = habits
        .values()
        .map(|h| (h, h.streak, h.longest_streak))
        .collect();
    board.sort_by(|a, b| b.2.cmp(&a.2));
    board
}

/// Completion grid: one row per habit, one column per tracked date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heatmap<'a> {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<(&'a Habit, Vec<bool>)>,
}

impl<'a> Heatmap<'a> {
    /// Build over every date any habit has tracked, keeping at most the last `max_days`
    pub fn build(habits: &'a BTreeMap<HabitId, Habit>, max_days: usize) -> Self {
        let all_dates: BTreeSet<NaiveDate> = habits
            .values()
            .flat_map(|h| h.completions.keys().copied())
            .collect();
        let skip = all_dates.len().saturating_sub(max_days);
        let dates: Vec<NaiveDate> = all_dates.into_iter().skip(skip).collect();

        let rows = habits
            .values()
            .map(|h| (h, dates.iter().map(|d| h.is_completed(*d)).collect()))
            .collect();

        Self { dates, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

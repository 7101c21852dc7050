use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TrackerError;

/// Stable habit identifier derived from category and name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Derive the id for a (category, name) pair.
    ///
    /// The id is the lower-cased `"{category}_{name}"` with every space replaced
    /// by an underscore. Saved files key habits by this string, so the rule
    /// must not change.
    ///
    /// ```
    /// use habit_quest::HabitId;
    /// let id = HabitId::derive("Self Improvement", "YouTube Learning");
    /// assert_eq!(id.as_str(), "self_improvement_youtube_learning");
    /// ```
    pub fn derive(category: &str, name: &str) -> Self {
        Self(format!("{}_{}", category, name).replace(' ', "_").to_lowercase())
    }

    /// Wrap an id that was already derived (e.g. read back from a snapshot)
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-day completion record of a habit.
///
/// Entries are inserted or overwritten, never removed: unmarking a day stores
/// `false`, so the day keeps counting as tracked.
pub type CompletionLedger = BTreeMap<NaiveDate, bool>;

/// A tracked habit together with its derived progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub name: String,
    pub category: String,
    /// Current streak as of the last recomputation
    #[serde(default)]
    pub streak: u32,
    /// Best streak ever observed, never decreases
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub completions: CompletionLedger,
    #[serde(default)]
    pub xp: u64,
    #[serde(default = "default_level")]
    pub level: u32,
    pub created_date: NaiveDate,
}

fn default_level() -> u32 {
    1
}

impl Habit {
    /// Create an untouched habit, validating name and category
    pub fn new(name: &str, category: &str, created_date: NaiveDate) -> Result<Self, TrackerError> {
        if name.trim().is_empty() {
            return Err(TrackerError::Validation("habit name must not be empty".to_string()));
        }
        if category.trim().is_empty() {
            return Err(TrackerError::Validation("category must not be empty".to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            category: category.to_string(),
            streak: 0,
            longest_streak: 0,
            completions: CompletionLedger::new(),
            xp: 0,
            level: 1,
            created_date,
        })
    }

    pub fn id(&self) -> HabitId {
        HabitId::derive(&self.category, &self.name)
    }

    /// Record the completion value for a day, returning the previous entry
    pub fn set_completion(&mut self, date: NaiveDate, completed: bool) -> Option<bool> {
        self.completions.insert(date, completed)
    }

    /// Whether the habit was completed on `date` (untracked days count as not completed)
    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.completions.get(&date).copied().unwrap_or(false)
    }

    pub fn has_any_completion(&self) -> bool {
        self.completions.values().any(|done| *done)
    }

    /// Number of days marked complete
    pub fn completed_days(&self) -> usize {
        self.completions.values().filter(|done| **done).count()
    }

    /// Number of days ever touched, including ones unmarked again
    pub fn tracked_days(&self) -> usize {
        self.completions.len()
    }
}

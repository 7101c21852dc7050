//! Persisted snapshot document
//!
//! The snapshot is a versionless JSON document with three sections:
//!
//! ```json
//! {
//!   "habits": { "<habit id>": { "name": "...", "category": "...", "completions": { "2024-01-03": true }, ... } },
//!   "achievements": {
//!     "streaks": { "3_day_streak": { "name": "...", "description": "...", "xp": 30, "earned": { "<habit id>": "2024-01-03" } } },
//!     "milestones": { "first_habit": { "name": "...", "description": "...", "xp": 10, "earned": true } }
//!   },
//!   "user": { "total_xp": 0, "level": 1, "next_level_xp": 400 }
//! }
//! ```
//!
//! Decoding is tolerant: a missing or unreadable section is replaced by its
//! default and reported in [`LoadReport`] instead of failing the whole load.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Habit, HabitId, TrackerError, UserProfile};
use crate::progress::{Achievement, AchievementBook, HabitTracker, Milestone, StreakMilestone};

/// Serializable projection of a [`HabitTracker`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub habits: BTreeMap<HabitId, Habit>,
    pub achievements: AchievementsDoc,
    pub user: UserProfile,
}

/// Achievement catalog with earned state embedded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementsDoc {
    #[serde(default)]
    pub streaks: BTreeMap<String, StreakAchievementDoc>,
    #[serde(default)]
    pub milestones: BTreeMap<String, MilestoneAchievementDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakAchievementDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub earned: BTreeMap<HabitId, NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneAchievementDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub earned: bool,
}

impl AchievementsDoc {
    fn from_book(book: &AchievementBook) -> Self {
        let streaks = StreakMilestone::ALL
            .into_iter()
            .map(|m| {
                let def = Achievement::streak(m);
                let doc = StreakAchievementDoc {
                    name: def.name.to_string(),
                    description: def.description.to_string(),
                    xp: def.xp_reward,
                    earned: book.streak_holders(m).map(|(id, on)| (id.clone(), on)).collect(),
                };
                (m.as_str().to_string(), doc)
            })
            .collect();

        let milestones = Milestone::ALL
            .into_iter()
            .map(|m| {
                let def = Achievement::milestone(m);
                let doc = MilestoneAchievementDoc {
                    name: def.name.to_string(),
                    description: def.description.to_string(),
                    xp: def.xp_reward,
                    earned: book.has_milestone(m),
                };
                (m.as_str().to_string(), doc)
            })
            .collect();

        Self { streaks, milestones }
    }

    /// Earned state only. Names and rewards always come from the built-in catalog.
    fn to_book(&self) -> AchievementBook {
        let mut book = AchievementBook::default();

        for (key, doc) in &self.streaks {
            let Some(milestone) = StreakMilestone::from_str(key) else {
                tracing::debug!("Ignoring unknown streak achievement '{}'", key);
                continue;
            };
            for (habit, on) in &doc.earned {
                book.record_streak(milestone, habit.clone(), *on);
            }
        }

        for (key, doc) in &self.milestones {
            let Some(milestone) = Milestone::from_str(key) else {
                tracing::debug!("Ignoring unknown milestone '{}'", key);
                continue;
            };
            if doc.earned {
                book.record_milestone(milestone);
            }
        }

        book
    }
}

/// What had to be recovered while decoding a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Top-level sections that were missing or unreadable and fell back to defaults
    pub recovered_sections: Vec<&'static str>,
    /// Habit entries that could not be decoded and were dropped
    pub skipped_habits: Vec<String>,
    /// Achievement entries that could not be decoded, as `streaks.<key>[.<habit id>]`
    /// or `milestones.<key>`
    pub skipped_achievements: Vec<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.recovered_sections.is_empty()
            && self.skipped_habits.is_empty()
            && self.skipped_achievements.is_empty()
    }
}

impl Snapshot {
    pub fn from_tracker(tracker: &HabitTracker) -> Self {
        Self {
            habits: tracker.habits().clone(),
            achievements: AchievementsDoc::from_book(tracker.achievements()),
            user: tracker.user().clone(),
        }
    }

    pub fn into_tracker(self) -> HabitTracker {
        let book = self.achievements.to_book();
        HabitTracker::from_parts(self.habits, book, self.user)
    }

    /// Decode a document, falling back to defaults section by section.
    ///
    /// Only a document whose root is not a JSON object is rejected.
    pub fn decode(doc: &Value) -> Result<(Self, LoadReport), TrackerError> {
        let Some(root) = doc.as_object() else {
            return Err(TrackerError::MalformedSnapshot(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(doc)
            )));
        };

        let mut report = LoadReport::default();
        let habits = decode_habits(root, &mut report);
        let achievements = decode_achievements(root, &mut report);
        let user: UserProfile = decode_section(root, "user", &mut report);

        Ok((
            Self {
                habits,
                achievements,
                user,
            },
            report,
        ))
    }

    /// Parse and decode snapshot text
    pub fn from_json_str(text: &str) -> Result<(Self, LoadReport), TrackerError> {
        let doc: Value = serde_json::from_str(text)
            .map_err(|e| TrackerError::MalformedSnapshot(format!("invalid JSON: {}", e)))?;
        Self::decode(&doc)
    }

    pub fn to_json_string(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl HabitTracker {
    /// Read-only projection for rendering and saving
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_tracker(self)
    }

    /// Replace the whole state with a decoded document.
    ///
    /// State is only replaced once decoding has succeeded.
    pub fn load_snapshot(&mut self, doc: &Value) -> Result<LoadReport, TrackerError> {
        let (snapshot, report) = Snapshot::decode(doc)?;
        *self = snapshot.into_tracker();
        Ok(report)
    }
}

fn decode_section<T: DeserializeOwned + Default>(
    root: &Map<String, Value>,
    name: &'static str,
    report: &mut LoadReport,
) -> T {
    let Some(value) = root.get(name) else {
        tracing::warn!("Snapshot has no '{}' section, using defaults", name);
        report.recovered_sections.push(name);
        return T::default();
    };

    match T::deserialize(value) {
        Ok(section) => section,
        Err(e) => {
            tracing::warn!("Snapshot section '{}' is unreadable ({}), using defaults", name, e);
            report.recovered_sections.push(name);
            T::default()
        }
    }
}

/// Habits are decoded entry by entry so one bad record does not drop the rest
fn decode_habits(root: &Map<String, Value>, report: &mut LoadReport) -> BTreeMap<HabitId, Habit> {
    let entries = match root.get("habits") {
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            tracing::warn!("Snapshot 'habits' is {}, using defaults", json_kind(other));
            report.recovered_sections.push("habits");
            return BTreeMap::new();
        }
        None => {
            tracing::warn!("Snapshot has no 'habits' section, using defaults");
            report.recovered_sections.push("habits");
            return BTreeMap::new();
        }
    };

    let mut habits = BTreeMap::new();
    for (id, value) in entries {
        match Habit::deserialize(value) {
            Ok(habit) => {
                habits.insert(HabitId::from_raw(id.as_str()), habit);
            }
            Err(e) => {
                tracing::warn!("Dropping unreadable habit '{}': {}", id, e);
                report.skipped_habits.push(id.clone());
            }
        }
    }
    habits
}

/// Earned records are decoded one by one so a bad entry only loses itself
fn decode_achievements(root: &Map<String, Value>, report: &mut LoadReport) -> AchievementsDoc {
    let section = match root.get("achievements") {
        Some(Value::Object(section)) => section,
        Some(other) => {
            tracing::warn!("Snapshot 'achievements' is {}, using defaults", json_kind(other));
            report.recovered_sections.push("achievements");
            return AchievementsDoc::default();
        }
        None => {
            tracing::warn!("Snapshot has no 'achievements' section, using defaults");
            report.recovered_sections.push("achievements");
            return AchievementsDoc::default();
        }
    };

    let mut doc = AchievementsDoc::default();

    for (key, value) in catalog_group(section, "streaks", report).into_iter().flatten() {
        let Some(entry) = value.as_object() else {
            skip_achievement(report, format!("streaks.{}", key), json_kind(value));
            continue;
        };
        let (name, description, xp) = catalog_fields(entry);
        let mut earned = BTreeMap::new();
        match entry.get("earned") {
            None | Some(Value::Null) => {}
            Some(Value::Object(holders)) => {
                for (habit, on) in holders {
                    match NaiveDate::deserialize(on) {
                        Ok(on) => {
                            earned.insert(HabitId::from_raw(habit.as_str()), on);
                        }
                        Err(e) => {
                            skip_achievement(report, format!("streaks.{}.{}", key, habit), &e.to_string());
                        }
                    }
                }
            }
            Some(other) => {
                skip_achievement(report, format!("streaks.{}", key), json_kind(other));
            }
        }
        doc.streaks.insert(
            key.clone(),
            StreakAchievementDoc {
                name,
                description,
                xp,
                earned,
            },
        );
    }

    for (key, value) in catalog_group(section, "milestones", report).into_iter().flatten() {
        let Some(entry) = value.as_object() else {
            skip_achievement(report, format!("milestones.{}", key), json_kind(value));
            continue;
        };
        let (name, description, xp) = catalog_fields(entry);
        let earned = match entry.get("earned") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(earned)) => *earned,
            Some(other) => {
                skip_achievement(report, format!("milestones.{}", key), json_kind(other));
                false
            }
        };
        doc.milestones.insert(
            key.clone(),
            MilestoneAchievementDoc {
                name,
                description,
                xp,
                earned,
            },
        );
    }

    doc
}

/// `achievements.<group>`; a missing group is simply empty
fn catalog_group<'a>(
    section: &'a Map<String, Value>,
    group: &str,
    report: &mut LoadReport,
) -> Option<&'a Map<String, Value>> {
    match section.get(group) {
        Some(Value::Object(entries)) => Some(entries),
        None | Some(Value::Null) => None,
        Some(other) => {
            skip_achievement(report, group.to_string(), json_kind(other));
            None
        }
    }
}

/// Display fields are informational only, so bad values fall back silently
fn catalog_fields(entry: &Map<String, Value>) -> (String, String, u64) {
    let text = |field: &str| {
        entry
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let xp = entry.get("xp").and_then(Value::as_u64).unwrap_or_default();
    (text("name"), text("description"), xp)
}

fn skip_achievement(report: &mut LoadReport, path: String, reason: &str) {
    tracing::warn!("Dropping unreadable achievement entry '{}': {}", path, reason);
    report.skipped_achievements.push(path);
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn played_tracker() -> HabitTracker {
        let mut tracker = HabitTracker::with_default_habits(day(1));
        let id = HabitId::derive("Exercise", "Walking Pad");
        for d in 1..=3 {
            tracker.toggle_completion(&id, day(d), true, day(d)).unwrap();
        }
        tracker
            .toggle_completion(&HabitId::derive("Reading", "Fantasy"), day(3), false, day(3))
            .unwrap();
        tracker
    }

    #[test]
    fn test_round_trip_preserves_state() {
        let tracker = played_tracker();
        let text = tracker.snapshot().to_json_string(false).unwrap();

        let (snapshot, report) = Snapshot::from_json_str(&text).unwrap();
        assert!(report.is_clean());
        assert_eq!(snapshot.into_tracker(), tracker);
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(played_tracker().snapshot()).unwrap();
        let habit = &value["habits"]["exercise_walking_pad"];
        assert_eq!(habit["completions"]["2024-01-02"], json!(true));
        assert_eq!(habit["created_date"], json!("2024-01-01"));
        assert_eq!(
            value["achievements"]["streaks"]["3_day_streak"]["earned"]["exercise_walking_pad"],
            json!("2024-01-03")
        );
        assert_eq!(value["achievements"]["milestones"]["first_habit"]["earned"], json!(true));
        assert_eq!(value["achievements"]["milestones"]["five_habits"]["xp"], json!(50));
        assert_eq!(value["user"]["next_level_xp"], json!(400));
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let doc = json!({
            "habits": {
                "exercise_run": {
                    "name": "Run",
                    "category": "Exercise",
                    "completions": { "2024-01-01": true },
                    "xp": 5,
                    "created_date": "2024-01-01"
                },
                "broken": { "name": 3 }
            }
        });

        let mut tracker = HabitTracker::new();
        let report = tracker.load_snapshot(&doc).unwrap();
        assert_eq!(report.recovered_sections, vec!["achievements", "user"]);
        assert_eq!(report.skipped_habits, vec!["broken".to_string()]);

        let habit = tracker.habit(&HabitId::from_raw("exercise_run")).unwrap();
        assert_eq!(habit.level, 1);
        assert!(habit.is_completed(day(1)));
        assert_eq!(tracker.user(), &UserProfile::default());
    }

    #[test]
    fn test_non_object_is_malformed() {
        let mut tracker = played_tracker();
        let before = tracker.clone();
        assert!(matches!(
            tracker.load_snapshot(&json!([1, 2, 3])),
            Err(TrackerError::MalformedSnapshot(_))
        ));
        assert!(matches!(
            Snapshot::from_json_str("{not json"),
            Err(TrackerError::MalformedSnapshot(_))
        ));
        assert_eq!(tracker, before);
    }

    #[test]
    fn test_bad_achievement_entries_are_skipped_individually() {
        let doc = json!({
            "habits": {},
            "achievements": {
                "streaks": {
                    "3_day_streak": { "earned": { "exercise_run": "2024-01-03", "ghost": 7 } },
                    "7_day_streak": "oops"
                },
                "milestones": {
                    "first_habit": { "name": 1, "earned": true },
                    "five_habits": { "earned": "yes" }
                }
            },
            "user": { "total_xp": 45, "level": 1, "next_level_xp": 400 }
        });

        let (snapshot, report) = Snapshot::decode(&doc).unwrap();
        assert!(report.recovered_sections.is_empty());
        assert_eq!(
            report.skipped_achievements,
            vec![
                "streaks.3_day_streak.ghost".to_string(),
                "streaks.7_day_streak".to_string(),
                "milestones.five_habits".to_string(),
            ]
        );

        let tracker = snapshot.into_tracker();
        let book = tracker.achievements();
        assert!(book.has_streak(StreakMilestone::ThreeDays, &HabitId::from_raw("exercise_run")));
        assert!(book.has_milestone(Milestone::FirstHabit));
        assert!(!book.has_milestone(Milestone::FiveHabits));
        assert_eq!(book.earned_count(), 2);
    }

    #[test]
    fn test_unknown_achievement_keys_are_ignored() {
        let doc = json!({
            "habits": {},
            "achievements": {
                "streaks": { "5_day_streak": { "earned": { "x": "2024-01-01" } } },
                "milestones": { "first_habit": { "earned": true }, "legend": { "earned": true } }
            },
            "user": { "total_xp": 10, "level": 1, "next_level_xp": 400 }
        });
        let (snapshot, report) = Snapshot::decode(&doc).unwrap();
        assert!(report.is_clean());
        let tracker = snapshot.into_tracker();
        assert!(tracker.achievements().has_milestone(Milestone::FirstHabit));
        assert_eq!(tracker.achievements().earned_count(), 1);
    }
}

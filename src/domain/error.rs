//! Errors surfaced to the presentation layer
//!
//! A rejected action never leaves a partial mutation behind: every operation
//! validates before it touches state.

use super::HabitId;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Habit already exists: {0}")]
    DuplicateHabit(HabitId),

    #[error("Habit not found: {0}")]
    NotFound(HabitId),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

//! Core domain types for Habit Quest

mod error;
mod habit;
mod profile;

pub use error::TrackerError;
pub use habit::{CompletionLedger, Habit, HabitId};
pub use profile::UserProfile;

//! Habit Quest - track daily habits and level up
//!
//! Habits are checked off per calendar day. Each completion feeds a small
//! progress engine: consecutive-day streaks, experience points and levels
//! (per habit and account-wide), and a fixed set of achievements.
//!
//! ## Layers
//!
//! 1. **Engine** ([`progress`]): pure, date-explicit state transitions over one
//!    [`progress::HabitTracker`]. Nothing in the engine reads the clock.
//!
//! 2. **Persistence** ([`snapshot`], [`store`]): the whole state as one JSON
//!    document, decoded section by section so a damaged file still loads.

pub mod config;
pub mod domain;
pub mod progress;
pub mod snapshot;
pub mod store;

pub use domain::*;

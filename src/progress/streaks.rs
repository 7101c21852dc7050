//! Streak calculation
//!
//! Streaks are derived from a completion ledger and an explicit "today". The
//! calculator never reads the clock, so the same ledger and date always give
//! the same result.

use chrono::NaiveDate;

use crate::domain::CompletionLedger;

/// Days allowed between the latest completion and today before a streak breaks.
/// A habit done yesterday and still open today keeps its streak.
pub const GRACE_DAYS: i64 = 1;

/// Current consecutive-day streak ending at the latest completed day.
///
/// Returns 0 when nothing is completed or when the latest completion is more
/// than [`GRACE_DAYS`] before `today`. A day stored as `false` is a hole.
pub fn calculate_streak(completions: &CompletionLedger, today: NaiveDate) -> u32 {
    // BTreeMap iterates in ascending date order
    let dates: Vec<NaiveDate> = completions
        .iter()
        .filter(|(_, done)| **done)
        .map(|(date, _)| *date)
        .collect();

    let Some(latest) = dates.last() else {
        return 0;
    };

    if (today - *latest).num_days() > GRACE_DAYS {
        return 0;
    }

    let mut streak = 1;
    for pair in dates.windows(2).rev() {
        if (pair[1] - pair[0]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Current and best streak after a recomputation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
}

impl StreakSummary {
    /// Recompute from the ledger, carrying the best streak forward
    pub fn recompute(completions: &CompletionLedger, today: NaiveDate, previous_longest: u32) -> Self {
        let current = calculate_streak(completions, today);
        Self {
            current,
            longest: previous_longest.max(current),
        }
    }
}

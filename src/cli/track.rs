//! Completion tracking command

use anyhow::Result;
use chrono::NaiveDate;

use habit_quest::HabitId;

use super::{print_events, Session};

/// Mark or unmark a habit for a day and save
pub fn track_command(session: &mut Session, id: &str, date: NaiveDate, completed: bool) -> Result<()> {
    let id = HabitId::from_raw(id);
    let events = session
        .tracker
        .toggle_completion(&id, date, completed, session.today)?;
    session.save()?;

    print_events(&session.tracker, &events);
    if let Some(habit) = session.tracker.habit(&id) {
        let verb = if completed { "done" } else { "not done" };
        println!(
            "{} marked {} for {} (streak {}, best {})",
            habit.name, verb, date, habit.streak, habit.longest_streak
        );
    }
    Ok(())
}

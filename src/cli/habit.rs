//! Habit management commands

use anyhow::Result;

use habit_quest::HabitId;

use super::Session;

/// List habits with their ids
pub fn list_command(session: &Session) {
    let habits = session.tracker.habits();
    if habits.is_empty() {
        println!("No habits found.");
        return;
    }

    println!("Habits ({}):\n", habits.len());
    for (id, habit) in habits {
        println!(
            "  {:<40} {} ({}) - since {}",
            id.as_str(),
            habit.name,
            habit.category,
            habit.created_date
        );
    }
}

/// Add a habit and save
pub fn add_command(session: &mut Session, name: &str, category: &str) -> Result<()> {
    let id = session.tracker.add_habit(name, category, session.today)?;
    session.save()?;
    println!("Habit '{}' added ({}).", name, id);
    Ok(())
}

/// Delete a habit and save
pub fn delete_command(session: &mut Session, id: &str) -> Result<()> {
    let habit = session.tracker.delete_habit(&HabitId::from_raw(id))?;
    session.save()?;
    println!("Habit '{}' deleted.", habit.name);
    Ok(())
}

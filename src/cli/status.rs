//! Status command implementation

use habit_quest::progress::analytics::{completion_rate_on, habits_by_category};
use habit_quest::progress::LevelProgress;

use super::Session;

const BAR_WIDTH: usize = 20;

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Show the profile card, today's progress and every habit
pub fn status_command(session: &Session) {
    let tracker = &session.tracker;
    let user = tracker.user();
    let progress = LevelProgress::new(user.total_xp);

    println!("Level {}  ({} XP)", user.level, user.total_xp);
    println!(
        "  {} {:.0}%  next level at {} XP",
        bar(progress.percent()),
        progress.percent(),
        user.next_level_xp
    );

    let habits = tracker.habits();
    let rate = completion_rate_on(habits, session.today);
    let done_today = habits.values().filter(|h| h.is_completed(session.today)).count();
    println!(
        "Today ({}): {}/{} habits  {} {:.0}%\n",
        session.today,
        done_today,
        habits.len(),
        bar(rate),
        rate
    );

    if habits.is_empty() {
        println!("No habits yet. Add one with `habit-quest add <name> --category <category>`.");
        return;
    }

    for (category, entries) in habits_by_category(habits) {
        println!("{}", category);
        for (id, habit) in entries {
            let mark = if habit.is_completed(session.today) { "x" } else { " " };
            println!(
                "  [{}] {:<24} streak {:>3}  best {:>3}  lvl {:>2}  ({})",
                mark, habit.name, habit.streak, habit.longest_streak, habit.level, id
            );
        }
        println!();
    }
}

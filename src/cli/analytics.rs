//! Analytics command implementation

use clap::ValueEnum;

use habit_quest::progress::analytics::{category_performance, habit_completion_rates, streak_board, Heatmap};

use super::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalyticsView {
    /// Completion grid of recent tracked days
    Heatmap,
    /// Current vs longest streaks
    Streaks,
    /// Completion rate per category
    Categories,
    /// Completion rate per habit
    Rates,
}

pub fn analytics_command(session: &Session, view: AnalyticsView) {
    let habits = session.tracker.habits();

    match view {
        AnalyticsView::Heatmap => {
            let heatmap = Heatmap::build(habits, session.config.settings.heatmap_days);
            if heatmap.is_empty() {
                println!("Complete some habits to see your heatmap!");
                return;
            }
            let first = heatmap.dates.first().map(ToString::to_string).unwrap_or_default();
            let last = heatmap.dates.last().map(ToString::to_string).unwrap_or_default();
            println!("{} .. {}\n", first, last);
            for (habit, days) in &heatmap.rows {
                let cells: String = days.iter().map(|done| if *done { '█' } else { '·' }).collect();
                println!("  {:<24} {}", habit.name, cells);
            }
        }
        AnalyticsView::Streaks => {
            println!("  {:<24} {:>7} {:>7}", "Habit", "Current", "Longest");
            for (habit, current, longest) in streak_board(habits) {
                println!("  {:<24} {:>7} {:>7}", habit.name, current, longest);
            }
        }
        AnalyticsView::Categories => {
            let perf = category_performance(habits);
            if perf.values().all(|p| p.tracked == 0) {
                println!("Complete some habits to see category performance!");
                return;
            }
            for (category, p) in perf {
                println!(
                    "  {:<20} {:>5.1}%  ({}/{} days)",
                    category,
                    p.rate(),
                    p.completed,
                    p.tracked
                );
            }
        }
        AnalyticsView::Rates => {
            let rates = habit_completion_rates(habits);
            if rates.iter().all(|r| r.tracked_days == 0) {
                println!("Complete some habits to see completion rates!");
                return;
            }
            for r in rates {
                println!(
                    "  {:<24} {:<18} {:>5.1}%  ({}/{} days)",
                    r.habit.name, r.habit.category, r.rate, r.completed_days, r.tracked_days
                );
            }
        }
    }
}

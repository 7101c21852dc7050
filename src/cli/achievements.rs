//! Achievements command implementation

use habit_quest::progress::{visible_streak_holders, Achievement, Milestone, StreakMilestone};

use super::Session;

/// Show streak achievements with their holders, then milestones
pub fn achievements_command(session: &Session) {
    let tracker = &session.tracker;

    println!("Streak Achievements\n");
    for milestone in StreakMilestone::ALL {
        let achievement = Achievement::streak(milestone);
        // Holders whose habit was deleted are not shown
        let holders: Vec<String> = visible_streak_holders(tracker, milestone)
            .map(|(habit, on)| format!("{} ({})", habit.name, on))
            .collect();
        let icon = if holders.is_empty() { "🔒" } else { "🏆" };

        println!(
            "  {} {:<16} +{:>4} XP  {}",
            icon, achievement.name, achievement.xp_reward, achievement.description
        );
        if !holders.is_empty() {
            println!("       Earned by: {}", holders.join(", "));
        }
    }

    println!("\nMilestones\n");
    for milestone in Milestone::ALL {
        let achievement = Achievement::milestone(milestone);
        let icon = if tracker.achievements().has_milestone(milestone) {
            "🏆"
        } else {
            "🔒"
        };
        println!(
            "  {} {:<16} +{:>4} XP  {}",
            icon, achievement.name, achievement.xp_reward, achievement.description
        );
    }
}

//! Achievement definitions and metadata
//!
//! The catalog is fixed: four per-habit streak thresholds and three global
//! milestones. Earned state lives in [`super::AchievementBook`].

/// Per-habit streak thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StreakMilestone {
    ThreeDays,
    SevenDays,
    ThirtyDays,
    HundredDays,
}

impl StreakMilestone {
    /// Ascending by threshold
    pub const ALL: [StreakMilestone; 4] = [
        Self::ThreeDays,
        Self::SevenDays,
        Self::ThirtyDays,
        Self::HundredDays,
    ];

    /// Consecutive days required
    pub fn days(&self) -> u32 {
        match self {
            Self::ThreeDays => 3,
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
            Self::HundredDays => 100,
        }
    }

    /// Key used in saved snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThreeDays => "3_day_streak",
            Self::SevenDays => "7_day_streak",
            Self::ThirtyDays => "30_day_streak",
            Self::HundredDays => "100_day_streak",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "3_day_streak" => Some(Self::ThreeDays),
            "7_day_streak" => Some(Self::SevenDays),
            "30_day_streak" => Some(Self::ThirtyDays),
            "100_day_streak" => Some(Self::HundredDays),
            _ => None,
        }
    }
}

/// Global one-shot milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Milestone {
    /// Any habit completed at least once
    FirstHabit,
    /// Five distinct habits completed at least once
    FiveHabits,
    /// Every category has a completed habit
    AllCategories,
}

impl Milestone {
    pub const ALL: [Milestone; 3] = [Self::FirstHabit, Self::FiveHabits, Self::AllCategories];

    /// Key used in saved snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstHabit => "first_habit",
            Self::FiveHabits => "five_habits",
            Self::AllCategories => "all_categories",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_habit" => Some(Self::FirstHabit),
            "five_habits" => Some(Self::FiveHabits),
            "all_categories" => Some(Self::AllCategories),
            _ => None,
        }
    }
}

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    Streak(StreakMilestone),
    Milestone(Milestone),
}

impl AchievementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Streak(s) => s.as_str(),
            Self::Milestone(m) => m.as_str(),
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub xp_reward: u64,
}

/// All achievement definitions
pub static ACHIEVEMENTS: &[Achievement] = &[
    // === STREAK ===
    Achievement {
        id: AchievementId::Streak(StreakMilestone::ThreeDays),
        name: "3-Day Warrior",
        description: "Complete a habit for 3 days in a row",
        xp_reward: 30,
    },
    Achievement {
        id: AchievementId::Streak(StreakMilestone::SevenDays),
        name: "Week Champion",
        description: "Complete a habit for 7 days in a row",
        xp_reward: 70,
    },
    Achievement {
        id: AchievementId::Streak(StreakMilestone::ThirtyDays),
        name: "Monthly Master",
        description: "Complete a habit for 30 days in a row",
        xp_reward: 300,
    },
    Achievement {
        id: AchievementId::Streak(StreakMilestone::HundredDays),
        name: "Centurion",
        description: "Complete a habit for 100 days in a row",
        xp_reward: 1000,
    },
    // === MILESTONE ===
    Achievement {
        id: AchievementId::Milestone(Milestone::FirstHabit),
        name: "First Steps",
        description: "Complete any habit for the first time",
        xp_reward: 10,
    },
    Achievement {
        id: AchievementId::Milestone(Milestone::FiveHabits),
        name: "Variety Pack",
        description: "Complete 5 different habits",
        xp_reward: 50,
    },
    Achievement {
        id: AchievementId::Milestone(Milestone::AllCategories),
        name: "Well-Rounded",
        description: "Complete at least one habit from each category",
        xp_reward: 100,
    },
];

impl Achievement {
    /// Get achievement definition by ID
    pub fn get(id: AchievementId) -> &'static Achievement {
        match id {
            AchievementId::Streak(s) => &ACHIEVEMENTS[s as usize],
            AchievementId::Milestone(m) => &ACHIEVEMENTS[StreakMilestone::ALL.len() + m as usize],
        }
    }

    pub fn streak(milestone: StreakMilestone) -> &'static Achievement {
        Self::get(AchievementId::Streak(milestone))
    }

    pub fn milestone(milestone: Milestone) -> &'static Achievement {
        Self::get(AchievementId::Milestone(milestone))
    }
}

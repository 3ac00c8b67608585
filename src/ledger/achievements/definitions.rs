//! Achievement definitions and metadata
//!
//! The catalog is fixed; each entry is unlocked at most once per user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for each achievement
///
/// Older data stored the catalog position ("1".."4") as the id; those load
/// through the aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first_steps", alias = "1")]
    FirstSteps,
    #[serde(rename = "week_warrior", alias = "2")]
    WeekWarrior,
    #[serde(rename = "habit_master", alias = "3")]
    HabitMaster,
    #[serde(rename = "variety_seeker", alias = "4")]
    VarietySeeker,
}

impl AchievementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSteps => "first_steps",
            Self::WeekWarrior => "week_warrior",
            Self::HabitMaster => "habit_master",
            Self::VarietySeeker => "variety_seeker",
        }
    }

    /// Position of this id's entry in [`ACHIEVEMENTS`]
    fn catalog_index(self) -> usize {
        match self {
            Self::FirstSteps => 0,
            Self::WeekWarrior => 1,
            Self::HabitMaster => 2,
            Self::VarietySeeker => 3,
        }
    }

    /// Get all achievement IDs in catalog order
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FirstSteps,
            Self::WeekWarrior,
            Self::HabitMaster,
            Self::VarietySeeker,
        ]
    }
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Bonus added to the user's total on unlock
    pub points: u32,
}

/// Catalog in [`AchievementId::all`] order
pub static ACHIEVEMENTS: [Achievement; 4] = [
    Achievement {
        id: AchievementId::FirstSteps,
        name: "First Steps",
        description: "Complete your first habit",
        icon: "🎯",
        points: 10,
    },
    Achievement {
        id: AchievementId::WeekWarrior,
        name: "Week Warrior",
        description: "Maintain a 7-day streak",
        icon: "🔥",
        points: 50,
    },
    Achievement {
        id: AchievementId::HabitMaster,
        name: "Habit Master",
        description: "Maintain a 30-day streak",
        icon: "👑",
        points: 200,
    },
    Achievement {
        id: AchievementId::VarietySeeker,
        name: "Variety Seeker",
        description: "Create habits in 3 different categories",
        icon: "🌟",
        points: 75,
    },
];

impl Achievement {
    /// Look up a catalog entry
    pub fn get(id: AchievementId) -> &'static Achievement {
        &ACHIEVEMENTS[id.catalog_index()]
    }

    /// Copy this entry into a user's unlocked list
    pub fn unlock(&self, at: DateTime<Utc>) -> UnlockedAchievement {
        UnlockedAchievement {
            id: self.id,
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            points: self.points,
            unlocked_at: at,
        }
    }
}

/// An achievement as stored on the user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub points: u32,
    pub unlocked_at: DateTime<Utc>,
}

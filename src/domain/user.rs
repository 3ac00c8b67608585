use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ledger::achievements::{AchievementId, UnlockedAchievement};

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single user profile of an installation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub total_points: u32,
    /// Unlock order
    #[serde(default)]
    pub achievements: Vec<UnlockedAchievement>,
    #[serde(default)]
    pub theme: Theme,
}

fn default_level() -> u32 {
    1
}

impl User {
    /// Profile synthesized on first run
    pub fn default_profile(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: "1".to_string(),
            name: name.into(),
            email: email.into(),
            level: 1,
            total_points: 0,
            achievements: Vec::new(),
            theme: Theme::Light,
        }
    }

    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    pub fn unlocked_ids(&self) -> Vec<AchievementId> {
        self.achievements.iter().map(|a| a.id).collect()
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a habit
///
/// New habits get a UUID v4. Ids from older data (e.g. millisecond
/// timestamps) are kept as-is, so the id is an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Generate a fresh, collision-free id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for HabitId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Fixed set of habit categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Health,
    Productivity,
    Learning,
    Social,
    Creativity,
    Wellness,
}

impl HabitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Productivity => "productivity",
            Self::Learning => "learning",
            Self::Social => "social",
            Self::Creativity => "creativity",
            Self::Wellness => "wellness",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Health => "Health & Fitness",
            Self::Productivity => "Productivity",
            Self::Learning => "Learning",
            Self::Social => "Social",
            Self::Creativity => "Creativity",
            Self::Wellness => "Wellness",
        }
    }

    /// Color a new habit in this category starts with
    pub fn default_color(&self) -> &'static str {
        match self {
            Self::Health => "#10b981",
            Self::Productivity => "#3b82f6",
            Self::Learning => "#8b5cf6",
            Self::Social => "#f59e0b",
            Self::Creativity => "#ef4444",
            Self::Wellness => "#06b6d4",
        }
    }

    pub fn all() -> &'static [HabitCategory] {
        &[
            Self::Health,
            Self::Productivity,
            Self::Learning,
            Self::Social,
            Self::Creativity,
            Self::Wellness,
        ]
    }
}

impl fmt::Display for HabitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::all().iter().map(|c| c.as_str()).collect();
                format!("unknown category '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Icon used by the habit form when none is chosen
pub const DEFAULT_ICON: &str = "💪";

/// Weekday indices, 0 = Sunday through 6 = Saturday
pub const ALL_DAYS: [u8; 7] = [0, 1, 2, 3, 4, 5, 6];

/// A tracked habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: HabitCategory,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: String,
    pub created_at: DateTime<Utc>,
    /// Advisory only, nothing in the ledger enforces it
    #[serde(default)]
    pub target_days: BTreeSet<u8>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    /// Absent dates count as not completed
    #[serde(default)]
    pub completions: BTreeMap<NaiveDate, bool>,
    #[serde(default)]
    pub points: u32,
}

impl Habit {
    /// Create a habit from form input with all derived fields zeroed
    pub fn new(id: HabitId, data: NewHabit, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name,
            description: data.description,
            category: data.category,
            color: data.color,
            icon: data.icon,
            created_at,
            target_days: sanitize_days(data.target_days),
            streak: 0,
            longest_streak: 0,
            completions: BTreeMap::new(),
            points: 0,
        }
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completions.get(&date).copied().unwrap_or(false)
    }

    /// Number of entries marked as completed
    pub fn completed_count(&self) -> usize {
        self.completions.values().filter(|done| **done).count()
    }

    /// Merge the fields present in `update`, leaving everything else alone
    pub fn apply(&mut self, update: HabitUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        if let Some(days) = update.target_days {
            self.target_days = sanitize_days(days);
        }
    }
}

fn sanitize_days(days: impl IntoIterator<Item = u8>) -> BTreeSet<u8> {
    days.into_iter()
        .filter(|d| {
            let valid = *d < 7;
            if !valid {
                tracing::debug!("Dropping out-of-range target day {}", d);
            }
            valid
        })
        .collect()
}

/// Input for creating a habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: HabitCategory,
    pub color: String,
    pub icon: String,
    #[serde(default)]
    pub target_days: Vec<u8>,
}

impl NewHabit {
    /// Form defaults: category color, default icon, every day of the week
    pub fn new(name: impl Into<String>, category: HabitCategory) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category,
            color: category.default_color().to_string(),
            icon: DEFAULT_ICON.to_string(),
            target_days: ALL_DAYS.to_vec(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Partial edit of a habit's user-editable fields
///
/// Id, creation time, streaks, completions and points are owned by the
/// ledger and cannot be edited through this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<HabitCategory>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub target_days: Option<Vec<u8>>,
}

impl HabitUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.color.is_none()
            && self.icon.is_none()
            && self.target_days.is_none()
    }
}

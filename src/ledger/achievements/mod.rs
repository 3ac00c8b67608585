//! Gamification: achievements, points and levels

mod checker;
mod definitions;
mod levels;

pub use checker::newly_qualified;
pub use definitions::{Achievement, AchievementId, UnlockedAchievement, ACHIEVEMENTS};
pub use levels::{level_for_points, LevelProgress, PointRewards, POINTS_PER_LEVEL};

//! Points and level system
//!
//! Levels are a flat 100 points wide and always derived from the total.

use serde::Serialize;

/// Points needed to advance one level
pub const POINTS_PER_LEVEL: u32 = 100;

/// Points rewards for various actions
pub struct PointRewards;

impl PointRewards {
    /// Points for marking a habit completed (and taken back on unmark)
    pub const COMPLETION: u32 = 10;
}

/// Level for a points total (level 1 starts at 0 points)
pub fn level_for_points(total_points: u32) -> u32 {
    total_points / POINTS_PER_LEVEL + 1
}

/// Where the user stands within their current level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelProgress {
    pub total_points: u32,
    pub level: u32,
    /// Points at which the current level started
    pub current_level_points: u32,
    /// Points at which the next level starts
    pub next_level_points: u32,
}

impl LevelProgress {
    pub fn new(total_points: u32) -> Self {
        let level = level_for_points(total_points);
        let current_level_points = (level - 1) * POINTS_PER_LEVEL;
        Self {
            total_points,
            level,
            current_level_points,
            next_level_points: current_level_points.saturating_add(POINTS_PER_LEVEL),
        }
    }

    /// Progress to the next level (0.0 - 1.0)
    pub fn progress_to_next(&self) -> f32 {
        let into_level = self.total_points.saturating_sub(self.current_level_points);
        into_level as f32 / POINTS_PER_LEVEL as f32
    }

    pub fn points_to_next(&self) -> u32 {
        self.next_level_points.saturating_sub(self.total_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_points() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(99), 1);
        assert_eq!(level_for_points(100), 2);
        assert_eq!(level_for_points(130), 2);
        assert_eq!(level_for_points(1000), 11);
    }

    #[test]
    fn test_level_progress() {
        let progress = LevelProgress::new(175);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.current_level_points, 100);
        assert_eq!(progress.next_level_points, 200);
        assert_eq!(progress.points_to_next(), 25);
        assert!((progress.progress_to_next() - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_level_progress_at_points_ceiling() {
        let progress = LevelProgress::new(u32::MAX);
        assert_eq!(progress.level, u32::MAX / POINTS_PER_LEVEL + 1);
        assert_eq!(progress.next_level_points, u32::MAX);
        assert_eq!(progress.points_to_next(), 0);
        assert!(progress.progress_to_next() <= 1.0);
    }
}

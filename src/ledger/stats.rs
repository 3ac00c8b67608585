//! Read-only projections for display

use chrono::NaiveDate;
use serde::Serialize;

use super::achievements::{LevelProgress, UnlockedAchievement};
use super::dates::trailing_window;
use crate::domain::{Habit, User};

/// Days in the weekly progress window
pub const WEEK_DAYS: u32 = 7;
/// Days in the monthly progress window
pub const MONTH_DAYS: u32 = 30;
/// Achievements shown in the overview
pub const RECENT_ACHIEVEMENTS: usize = 4;

/// Per-habit statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    /// Percentage of recorded entries that are completed (0 with no entries)
    pub completion_rate: f64,
    /// Recorded entries, ticked or unticked
    pub total_days_tracked: usize,
    pub completed_days: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Last 7 days ending today, oldest first
    pub weekly_progress: Vec<u8>,
    /// Last 30 days ending today, oldest first
    pub monthly_progress: Vec<u8>,
}

impl HabitStats {
    pub fn for_habit(habit: &Habit, today: NaiveDate) -> Self {
        let total_days_tracked = habit.completions.len();
        let completed_days = habit.completed_count();
        let completion_rate = if total_days_tracked > 0 {
            completed_days as f64 / total_days_tracked as f64 * 100.0
        } else {
            0.0
        };

        Self {
            completion_rate,
            total_days_tracked,
            completed_days,
            current_streak: habit.streak,
            longest_streak: habit.longest_streak,
            weekly_progress: trailing_window(&habit.completions, today, WEEK_DAYS),
            monthly_progress: trailing_window(&habit.completions, today, MONTH_DAYS),
        }
    }
}

/// Ledger-wide summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerOverview {
    pub total_habits: usize,
    pub completed_today: usize,
    /// Mean current streak, rounded
    pub average_streak: u32,
    /// Completed entries across all habits
    pub total_completions: usize,
    pub level: LevelProgress,
    /// Most recent unlocks, oldest first
    pub recent_achievements: Vec<UnlockedAchievement>,
}

impl LedgerOverview {
    pub fn compute(habits: &[Habit], user: &User, today: NaiveDate) -> Self {
        let total_habits = habits.len();
        let completed_today = habits.iter().filter(|h| h.is_completed_on(today)).count();
        let average_streak = if habits.is_empty() {
            0
        } else {
            let sum: u64 = habits.iter().map(|h| u64::from(h.streak)).sum();
            (sum as f64 / total_habits as f64).round() as u32
        };
        let total_completions = habits.iter().map(Habit::completed_count).sum();

        let skip = user.achievements.len().saturating_sub(RECENT_ACHIEVEMENTS);
        let recent_achievements = user.achievements[skip..].to_vec();

        Self {
            total_habits,
            completed_today,
            average_streak,
            total_completions,
            level: LevelProgress::new(user.total_points),
            recent_achievements,
        }
    }

    /// Share of habits completed today (0.0 - 1.0)
    pub fn today_ratio(&self) -> f32 {
        if self.total_habits == 0 {
            0.0
        } else {
            self.completed_today as f32 / self.total_habits as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HabitCategory, HabitId, NewHabit};
    use crate::ledger::achievements::{Achievement, AchievementId};
    use crate::ledger::dates::parse_date;
    use chrono::Utc;

    fn habit() -> Habit {
        Habit::new(
            HabitId::generate(),
            NewHabit::new("Walk", HabitCategory::Health),
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_habit_stats() {
        let stats = HabitStats::for_habit(&habit(), parse_date("2026-05-10").unwrap());
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.total_days_tracked, 0);
        assert_eq!(stats.weekly_progress, vec![0; 7]);
        assert_eq!(stats.monthly_progress.len(), 30);
    }

    #[test]
    fn test_completion_rate_counts_unticked_entries() {
        let mut h = habit();
        h.completions.insert(parse_date("2026-05-08").unwrap(), true);
        h.completions.insert(parse_date("2026-05-09").unwrap(), false);
        h.completions.insert(parse_date("2026-05-10").unwrap(), true);
        h.completions.insert(parse_date("2026-05-11").unwrap(), true);

        let stats = HabitStats::for_habit(&h, parse_date("2026-05-11").unwrap());
        assert_eq!(stats.total_days_tracked, 4);
        assert_eq!(stats.completed_days, 3);
        assert!((stats.completion_rate - 75.0).abs() < f64::EPSILON);
        assert_eq!(stats.weekly_progress, vec![0, 0, 0, 1, 0, 1, 1]);
    }

    #[test]
    fn test_all_true_is_full_rate() {
        let mut h = habit();
        h.completions.insert(parse_date("2026-05-01").unwrap(), true);
        let stats = HabitStats::for_habit(&h, parse_date("2026-05-11").unwrap());
        assert_eq!(stats.completion_rate, 100.0);
    }

    #[test]
    fn test_overview() {
        let today = parse_date("2026-05-11").unwrap();
        let mut a = habit();
        a.completions.insert(today, true);
        a.streak = 3;
        let mut b = habit();
        b.streak = 2;
        b.completions.insert(parse_date("2026-05-10").unwrap(), true);
        b.completions.insert(parse_date("2026-05-09").unwrap(), false);

        let mut user = User::default_profile("U", "u@example.com");
        user.total_points = 230;
        let overview = LedgerOverview::compute(&[a, b], &user, today);

        assert_eq!(overview.total_habits, 2);
        assert_eq!(overview.completed_today, 1);
        assert_eq!(overview.average_streak, 3); // 2.5 rounds up
        assert_eq!(overview.total_completions, 2);
        assert_eq!(overview.level.level, 3);
        assert!((overview.today_ratio() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_overview_keeps_last_four_achievements() {
        let mut user = User::default_profile("U", "u@example.com");
        for id in AchievementId::all().iter().chain(AchievementId::all().iter().take(1)) {
            user.achievements.push(Achievement::get(*id).unlock(Utc::now()));
        }
        let overview = LedgerOverview::compute(&[], &user, parse_date("2026-05-11").unwrap());
        assert_eq!(overview.recent_achievements.len(), 4);
        assert_eq!(overview.recent_achievements[0].id, AchievementId::WeekWarrior);
        assert_eq!(overview.average_streak, 0);
    }
}

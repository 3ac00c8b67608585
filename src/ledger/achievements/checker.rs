//! Achievement checking logic
//!
//! Pure functions over the current habits. Nothing here mutates state;
//! the ledger decides what to do with the returned ids.

use std::collections::HashSet;

use super::definitions::AchievementId;
use crate::domain::Habit;

/// Distinct categories needed for Variety Seeker
const VARIETY_CATEGORY_COUNT: usize = 3;

/// Check streak achievements against the best current streak
fn check_streak_achievements(
    best_current_streak: u32,
    unlocked: &[AchievementId],
) -> Vec<AchievementId> {
    let milestones = [
        (7, AchievementId::WeekWarrior),
        (30, AchievementId::HabitMaster),
    ];

    milestones
        .into_iter()
        .filter(|(threshold, id)| best_current_streak >= *threshold && !unlocked.contains(id))
        .map(|(_, id)| id)
        .collect()
}

/// Every achievement that qualifies now and is not unlocked yet, in catalog order
pub fn newly_qualified(habits: &[Habit], unlocked: &[AchievementId]) -> Vec<AchievementId> {
    let mut newly_unlocked = Vec::new();

    // An unticked entry is not a completion
    let has_completion = habits.iter().any(|h| h.completions.values().any(|done| *done));
    if has_completion && !unlocked.contains(&AchievementId::FirstSteps) {
        newly_unlocked.push(AchievementId::FirstSteps);
    }

    let best_streak = habits.iter().map(|h| h.streak).max().unwrap_or(0);
    newly_unlocked.extend(check_streak_achievements(best_streak, unlocked));

    let categories: HashSet<_> = habits.iter().map(|h| h.category).collect();
    if categories.len() >= VARIETY_CATEGORY_COUNT
        && !unlocked.contains(&AchievementId::VarietySeeker)
    {
        newly_unlocked.push(AchievementId::VarietySeeker);
    }

    newly_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HabitCategory, HabitId, NewHabit};
    use chrono::{NaiveDate, Utc};

    fn habit(category: HabitCategory) -> Habit {
        Habit::new(HabitId::generate(), NewHabit::new("h", category), Utc::now())
    }

    #[test]
    fn test_nothing_unlocks_on_empty_ledger() {
        assert!(newly_qualified(&[], &[]).is_empty());
    }

    #[test]
    fn test_first_steps_requires_a_true_entry() {
        let mut h = habit(HabitCategory::Health);
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        h.completions.insert(day, false);
        assert!(newly_qualified(&[h.clone()], &[]).is_empty());

        h.completions.insert(day, true);
        assert_eq!(newly_qualified(&[h], &[]), vec![AchievementId::FirstSteps]);
    }

    #[test]
    fn test_streak_milestones() {
        assert!(check_streak_achievements(6, &[]).is_empty());
        assert_eq!(check_streak_achievements(7, &[]), vec![AchievementId::WeekWarrior]);
        assert_eq!(
            check_streak_achievements(30, &[]),
            vec![AchievementId::WeekWarrior, AchievementId::HabitMaster]
        );
        assert_eq!(
            check_streak_achievements(30, &[AchievementId::WeekWarrior]),
            vec![AchievementId::HabitMaster]
        );
    }

    #[test]
    fn test_variety_needs_three_distinct_categories() {
        let two = vec![
            habit(HabitCategory::Health),
            habit(HabitCategory::Health),
            habit(HabitCategory::Social),
        ];
        assert!(newly_qualified(&two, &[]).is_empty());

        let mut three = two;
        three.push(habit(HabitCategory::Learning));
        assert_eq!(newly_qualified(&three, &[]), vec![AchievementId::VarietySeeker]);
        assert!(newly_qualified(&three, &[AchievementId::VarietySeeker]).is_empty());
    }
}

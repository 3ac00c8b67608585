//! The habit ledger engine
//!
//! Owns the habits and the user profile, applies completion toggles,
//! keeps points, levels and achievements in step, and writes the result
//! through a [`StateStore`] before every mutating call returns.
//!
//! # Usage
//!
//! ```ignore
//! let store = JsonFileStore::in_dir(&data_dir);
//! let mut ledger = HabitLedger::open(Box::new(store), Box::new(SystemClock))?;
//!
//! let id = ledger.add_habit(NewHabit::new("Read", HabitCategory::Learning))?;
//! let outcome = ledger.toggle_completion(&id, ledger.today())?;
//! let stats = ledger.habit_stats(&id)?;
//! ```

pub mod achievements;
mod dates;
mod error;
mod stats;


pub use dates::{current_streak, format_date, parse_date, trailing_window, Clock, FixedClock, SystemClock};
pub use error::LedgerError;
pub use stats::{HabitStats, LedgerOverview, MONTH_DAYS, RECENT_ACHIEVEMENTS, WEEK_DAYS};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::config::ProfileSettings;
use crate::domain::{Habit, HabitId, HabitUpdate, NewHabit, Theme, User};
use crate::storage::{LedgerState, StateStore};
use achievements::{level_for_points, Achievement, PointRewards, UnlockedAchievement};

/// Something that happened while applying a completion toggle
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    PointsAwarded { amount: u32 },
    PointsDeducted { amount: u32 },
    AchievementUnlocked(UnlockedAchievement),
    LevelChanged { old_level: u32, new_level: u32 },
}

/// Result of [`HabitLedger::toggle_completion`]
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    /// Completion value now stored for the date
    pub completed: bool,
    /// Recomputed current streak
    pub streak: u32,
    pub events: Vec<LedgerEvent>,
}

/// Working copy a mutation is applied to before it is saved
struct Draft {
    habits: Vec<Habit>,
    user: User,
}

impl Draft {
    fn habit_mut(&mut self, id: &HabitId) -> Result<&mut Habit, LedgerError> {
        self.habits
            .iter_mut()
            .find(|h| &h.id == id)
            .ok_or_else(|| LedgerError::HabitNotFound(id.clone()))
    }

    /// Set the user's total and re-derive the level
    fn set_total_points(&mut self, total: u32) -> Option<LedgerEvent> {
        self.user.total_points = total;
        let old_level = self.user.level;
        let new_level = level_for_points(total);
        self.user.level = new_level;

        if new_level != old_level {
            info!("Level changed: {} -> {}", old_level, new_level);
            Some(LedgerEvent::LevelChanged {
                old_level,
                new_level,
            })
        } else {
            None
        }
    }

    /// Unlock whatever newly qualifies and pay out its bonus
    fn evaluate_achievements(&mut self, now: DateTime<Utc>) -> Vec<LedgerEvent> {
        let unlocked = self.user.unlocked_ids();
        let mut events = Vec::new();

        for id in achievements::newly_qualified(&self.habits, &unlocked) {
            let achievement = Achievement::get(id);
            info!("Achievement unlocked: {} (+{} points)", achievement.name, achievement.points);

            let entry = achievement.unlock(now);
            self.user.achievements.push(entry.clone());
            events.push(LedgerEvent::AchievementUnlocked(entry));

            let total = self.user.total_points.saturating_add(achievement.points);
            events.extend(self.set_total_points(total));
        }

        events
    }

    fn into_state(self) -> LedgerState {
        LedgerState {
            habits: self.habits,
            user: Some(self.user),
        }
    }
}

/// The habit ledger
///
/// One instance per application, constructed at startup and handed to
/// whatever drives it. Every mutating call either returns `Ok` with the new
/// state saved, or returns an error with nothing changed.
pub struct HabitLedger {
    store: Box<dyn StateStore>,
    clock: Box<dyn Clock>,
    habits: Vec<Habit>,
    user: User,
}

impl HabitLedger {
    /// Open with the default first-run profile
    pub fn open(store: Box<dyn StateStore>, clock: Box<dyn Clock>) -> Result<Self, LedgerError> {
        Self::open_with_profile(store, clock, &ProfileSettings::default())
    }

    /// Load persisted state, falling back to an empty ledger if it is missing
    /// or unreadable. An unreadable record is first copied aside through
    /// [`StateStore::preserve_unreadable`]. A user is synthesized from
    /// `profile` and saved right away when none exists.
    pub fn open_with_profile(
        store: Box<dyn StateStore>,
        clock: Box<dyn Clock>,
        profile: &ProfileSettings,
    ) -> Result<Self, LedgerError> {
        let state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!("No stored ledger, starting empty");
                LedgerState::default()
            }
            Err(e) => {
                warn!("Ignoring unreadable ledger state: {:#}", e);
                // Must succeed before the fallback state overwrites the record
                store.preserve_unreadable()?;
                LedgerState::default()
            }
        };

        let needs_user = state.user.is_none();
        let mut ledger = Self {
            store,
            clock,
            habits: state.habits,
            user: state.user.unwrap_or_else(|| profile.to_user()),
        };

        if needs_user {
            info!("Creating profile for {}", ledger.user.name);
            ledger.store.save(&ledger.snapshot())?;
        }

        debug!("Ledger opened with {} habits", ledger.habits.len());
        Ok(ledger)
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == id)
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Today according to the ledger's clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Copy of the state as it is persisted
    pub fn snapshot(&self) -> LedgerState {
        LedgerState {
            habits: self.habits.clone(),
            user: Some(self.user.clone()),
        }
    }

    /// Apply `mutate` to a draft, save it, then make it live
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut Draft) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut draft = Draft {
            habits: self.habits.clone(),
            user: self.user.clone(),
        };
        let out = mutate(&mut draft)?;

        let state = draft.into_state();
        self.store.save(&state)?;

        self.habits = state.habits;
        if let Some(user) = state.user {
            self.user = user;
        }
        Ok(out)
    }

    fn fresh_id(&self) -> HabitId {
        loop {
            let id = HabitId::generate();
            if self.habit(&id).is_none() {
                return id;
            }
        }
    }

    /// Create a habit and return its id
    pub fn add_habit(&mut self, data: NewHabit) -> Result<HabitId, LedgerError> {
        let id = self.fresh_id();
        let now = self.clock.now();
        debug!("Adding habit {} ({})", data.name, id);

        self.commit(|draft| {
            draft.habits.push(Habit::new(id.clone(), data, now));
            draft.evaluate_achievements(now);
            Ok(id)
        })
    }

    /// Merge editable fields into an existing habit
    pub fn update_habit(&mut self, id: &HabitId, update: HabitUpdate) -> Result<(), LedgerError> {
        let now = self.clock.now();
        debug!("Updating habit {}", id);

        self.commit(|draft| {
            draft.habit_mut(id)?.apply(update);
            draft.evaluate_achievements(now);
            Ok(())
        })
    }

    /// Remove a habit. Points it earned stay on the user's total.
    pub fn delete_habit(&mut self, id: &HabitId) -> Result<Habit, LedgerError> {
        debug!("Deleting habit {}", id);

        self.commit(|draft| {
            let index = draft
                .habits
                .iter()
                .position(|h| &h.id == id)
                .ok_or_else(|| LedgerError::HabitNotFound(id.clone()))?;
            Ok(draft.habits.remove(index))
        })
    }

    /// Flip the completion for `date`, then update streak, points, level
    /// and achievements
    pub fn toggle_completion(
        &mut self,
        id: &HabitId,
        date: NaiveDate,
    ) -> Result<ToggleOutcome, LedgerError> {
        let today = self.clock.today();
        let now = self.clock.now();

        self.commit(|draft| {
            let user_total = draft.user.total_points;
            let habit = draft.habit_mut(id)?;
            let completed = !habit.is_completed_on(date);
            habit.completions.insert(date, completed);

            habit.streak = current_streak(&habit.completions, today);
            habit.longest_streak = habit.longest_streak.max(habit.streak);
            let streak = habit.streak;

            let mut events = Vec::new();
            let total = apply_completion_reward(habit, completed, user_total, &mut events);
            debug!(
                "Habit {} on {}: completed={} streak={}",
                id,
                format_date(date),
                completed,
                streak
            );

            events.extend(draft.set_total_points(total));
            events.extend(draft.evaluate_achievements(now));

            Ok(ToggleOutcome {
                completed,
                streak,
                events,
            })
        })
    }

    /// Switch between light and dark
    pub fn toggle_theme(&mut self) -> Result<Theme, LedgerError> {
        self.commit(|draft| {
            draft.user.theme = draft.user.theme.toggled();
            Ok(draft.user.theme)
        })
    }

    /// Statistics for one habit
    pub fn habit_stats(&self, id: &HabitId) -> Result<HabitStats, LedgerError> {
        let habit = self
            .habit(id)
            .ok_or_else(|| LedgerError::HabitNotFound(id.clone()))?;
        Ok(HabitStats::for_habit(habit, self.clock.today()))
    }

    /// Ledger-wide summary
    pub fn overview(&self) -> LedgerOverview {
        LedgerOverview::compute(&self.habits, &self.user, self.clock.today())
    }
}

/// Apply the completion reward (or take it back) to the habit and return
/// the user's new total. Both totals floor at zero.
fn apply_completion_reward(
    habit: &mut Habit,
    completed: bool,
    user_total: u32,
    events: &mut Vec<LedgerEvent>,
) -> u32 {
    let amount = PointRewards::COMPLETION;
    if completed {
        habit.points = habit.points.saturating_add(amount);
        events.push(LedgerEvent::PointsAwarded { amount });
        user_total.saturating_add(amount)
    } else {
        habit.points = habit.points.saturating_sub(amount);
        let deducted = user_total.min(amount);
        if deducted > 0 {
            events.push(LedgerEvent::PointsDeducted { amount: deducted });
        }
        user_total - deducted
    }
}

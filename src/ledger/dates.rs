//! Calendar helpers for streaks and progress windows
//!
//! Completion keys are calendar dates in "YYYY-MM-DD" form.

use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use std::collections::BTreeMap;

use super::LedgerError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "today" and "now" for the ledger
pub trait Clock {
    /// Current calendar date
    fn today(&self) -> NaiveDate;

    /// Current instant, used for creation and unlock timestamps
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock; "today" is the local calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Pin to noon UTC of `today`
    pub fn on(today: NaiveDate) -> Self {
        let now = today
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now);
        Self { today, now }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Format a date as "YYYY-MM-DD"
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a "YYYY-MM-DD" date
pub fn parse_date(s: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| LedgerError::InvalidDate(s.to_string()))
}

/// Consecutive completed days ending at `today`
///
/// Stops at the first day without a true entry, so an open today means 0.
pub fn current_streak(completions: &BTreeMap<NaiveDate, bool>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = Some(today);

    while let Some(d) = day {
        if !completions.get(&d).copied().unwrap_or(false) {
            break;
        }
        streak += 1;
        day = d.checked_sub_days(Days::new(1));
    }

    streak
}

/// 0/1 per day for the `days` days ending at `today`, oldest first
pub fn trailing_window(
    completions: &BTreeMap<NaiveDate, bool>,
    today: NaiveDate,
    days: u32,
) -> Vec<u8> {
    (0..days)
        .rev()
        .map(|offset| {
            today
                .checked_sub_days(Days::new(u64::from(offset)))
                .and_then(|d| completions.get(&d).copied())
                .map_or(0, u8::from)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn completed(days: &[&str]) -> BTreeMap<NaiveDate, bool> {
        days.iter().map(|s| (d(s), true)).collect()
    }

    #[test]
    fn test_format_and_parse() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();
        assert_eq!(format_date(date), "2026-02-05");
        assert_eq!(d("2026-02-05"), date);
        assert!(matches!(parse_date("05/02/2026"), Err(LedgerError::InvalidDate(_))));
        assert!(parse_date("2026-02-30").is_err());
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let map = completed(&["2026-03-08", "2026-03-09", "2026-03-10"]);
        assert_eq!(current_streak(&map, d("2026-03-10")), 3);
    }

    #[test]
    fn test_streak_zero_when_today_open() {
        let map = completed(&["2026-03-08", "2026-03-09"]);
        assert_eq!(current_streak(&map, d("2026-03-10")), 0);
    }

    #[test]
    fn test_streak_stops_at_gap_and_false_entries() {
        let mut map = completed(&["2026-03-06", "2026-03-07", "2026-03-09", "2026-03-10"]);
        assert_eq!(current_streak(&map, d("2026-03-10")), 2);

        map.insert(d("2026-03-09"), false);
        assert_eq!(current_streak(&map, d("2026-03-10")), 1);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        let map = completed(&["2026-02-27", "2026-02-28", "2026-03-01"]);
        assert_eq!(current_streak(&map, d("2026-03-01")), 3);
    }

    #[test]
    fn test_trailing_window_oldest_first() {
        let map = completed(&["2026-03-04", "2026-03-10"]);
        let week = trailing_window(&map, d("2026-03-10"), 7);
        assert_eq!(week, vec![1, 0, 0, 0, 0, 0, 1]);

        let month = trailing_window(&map, d("2026-03-10"), 30);
        assert_eq!(month.len(), 30);
        assert_eq!(month.iter().map(|v| u32::from(*v)).sum::<u32>(), 2);
        assert_eq!(month[29], 1);
    }
}

//! Longest and current streaks over a date-sorted calendar.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::ContributionDay;

/// A run of consecutive active days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub length: u32,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    pub longest: Streak,
    pub current: u32,
}

/// Longest run of active days. The first run wins ties.
pub fn longest_streak(calendar: &[ContributionDay]) -> Streak {
    let mut best = Streak::default();
    let mut run = 0u32;
    let mut run_start = None;

    for day in calendar {
        if day.is_active() {
            if run == 0 {
                run_start = Some(day.date);
            }
            run += 1;
            if run > best.length {
                best = Streak {
                    length: run,
                    start: run_start,
                    end: Some(day.date),
                };
            }
        } else {
            run = 0;
        }
    }
    best
}

/// Run of active days ending at the last calendar day.
///
/// When `last_day_in_progress` is set, an inactive last day (today, not
/// over yet) is skipped once. A finished year gets no such grace.
pub fn current_streak(calendar: &[ContributionDay], last_day_in_progress: bool) -> u32 {
    let mut days = calendar.iter().rev().peekable();
    if last_day_in_progress && days.peek().is_some_and(|day| !day.is_active()) {
        days.next();
    }
    days.take_while(|day| day.is_active()).count() as u32
}

pub fn summarize(calendar: &[ContributionDay], last_day_in_progress: bool) -> StreakSummary {
    StreakSummary {
        longest: longest_streak(calendar),
        current: current_streak(calendar, last_day_in_progress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar(counts: &[u32]) -> Vec<ContributionDay> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        start
            .iter_days()
            .zip(counts)
            .map(|(date, &count)| ContributionDay::new(date, count))
            .collect()
    }

    fn day(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 3, d)
    }

    #[test]
    fn test_empty_calendar() {
        assert_eq!(longest_streak(&[]), Streak::default());
        assert_eq!(current_streak(&[], true), 0);
    }

    #[test]
    fn test_longest_with_dates() {
        let cal = calendar(&[1, 1, 0, 2, 3, 1, 0, 1]);
        assert_eq!(
            longest_streak(&cal),
            Streak {
                length: 3,
                start: day(4),
                end: day(6)
            }
        );
    }

    #[test]
    fn test_longest_first_run_wins_ties() {
        let cal = calendar(&[1, 1, 0, 1, 1]);
        let streak = longest_streak(&cal);
        assert_eq!(streak.length, 2);
        assert_eq!(streak.start, day(1));
    }

    #[test]
    fn test_current_counts_back_from_last_day() {
        assert_eq!(current_streak(&calendar(&[0, 1, 1, 1]), false), 3);
        assert_eq!(current_streak(&calendar(&[1, 0, 1, 1]), true), 2);
    }

    #[test]
    fn test_current_skips_inactive_today_once() {
        assert_eq!(current_streak(&calendar(&[1, 1, 1, 0]), true), 3);
        assert_eq!(current_streak(&calendar(&[1, 1, 0, 0]), true), 0);
    }

    #[test]
    fn test_finished_year_ends_on_its_last_day() {
        assert_eq!(current_streak(&calendar(&[1, 1, 1, 0]), false), 0);
        assert_eq!(current_streak(&calendar(&[1, 1, 1, 1]), false), 4);
    }

    #[test]
    fn test_all_active() {
        let cal = calendar(&[4; 10]);
        let summary = summarize(&cal, false);
        assert_eq!(summary.longest.length, 10);
        assert_eq!(summary.current, 10);
    }
}

//! When the user works: hour and weekday histograms, weekend share.

use chrono::{Datelike, FixedOffset, Timelike, Weekday};

use crate::models::{CommitRecord, ContributionDay};

/// Commits per hour of day in `offset`.
pub fn hour_histogram(commits: &[CommitRecord], offset: FixedOffset) -> [u32; 24] {
    let mut hours = [0u32; 24];
    for commit in commits {
        let hour = commit.timestamp.with_timezone(&offset).hour() as usize;
        hours[hour] += 1;
    }
    hours
}

/// Argmax of the histogram; the earliest hour wins ties.
pub fn peak_hour(hours: &[u32; 24]) -> Option<u32> {
    let mut peak: Option<(usize, u32)> = None;
    for (hour, &count) in hours.iter().enumerate() {
        if count > 0 && peak.map_or(true, |(_, best)| count > best) {
            peak = Some((hour, count));
        }
    }
    peak.map(|(hour, _)| hour as u32)
}

/// Contributions per weekday, Monday first.
pub fn weekday_histogram(calendar: &[ContributionDay]) -> [u32; 7] {
    let mut days = [0u32; 7];
    for day in calendar {
        days[day.date.weekday().num_days_from_monday() as usize] += day.count;
    }
    days
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Weekend activity and total activity.
///
/// Counts commits in `offset`; without any commit records it falls back to
/// calendar contributions.
pub fn weekend_activity(
    commits: &[CommitRecord],
    calendar: &[ContributionDay],
    offset: FixedOffset,
) -> (u32, u32) {
    if commits.is_empty() {
        let weekend = calendar
            .iter()
            .filter(|day| is_weekend(day.date.weekday()))
            .map(|day| day.count)
            .sum();
        let total = calendar.iter().map(|day| day.count).sum();
        return (weekend, total);
    }
    (weekend_commits(commits, offset), commits.len() as u32)
}

/// Commits made on Saturday or Sunday in `offset`.
pub fn weekend_commits(commits: &[CommitRecord], offset: FixedOffset) -> u32 {
    commits
        .iter()
        .filter(|c| is_weekend(c.timestamp.with_timezone(&offset).weekday()))
        .count() as u32
}

pub fn weekend_ratio(weekend: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        weekend as f64 / total as f64
    }
}

/// Commits between 00:00 and 03:59 in `offset`.
pub fn night_commits(commits: &[CommitRecord], offset: FixedOffset) -> u32 {
    commits
        .iter()
        .filter(|c| c.timestamp.with_timezone(&offset).hour() < 4)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn commit(d: u32, h: u32) -> CommitRecord {
        // 2024-06-01 is a Saturday
        CommitRecord::new(Utc.with_ymd_and_hms(2024, 6, d, h, 0, 0).unwrap(), "a/b")
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_hour_histogram_respects_offset() {
        let commits = vec![commit(3, 23)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(hour_histogram(&commits, utc())[23], 1);
        assert_eq!(hour_histogram(&commits, plus_two)[1], 1);
    }

    #[test]
    fn test_peak_hour_ties_and_empty() {
        let mut hours = [0u32; 24];
        assert_eq!(peak_hour(&hours), None);
        hours[14] = 3;
        hours[9] = 3;
        hours[20] = 1;
        assert_eq!(peak_hour(&hours), Some(9));
    }

    #[test]
    fn test_weekend_activity_from_commits() {
        let commits = vec![commit(1, 10), commit(2, 10), commit(3, 10), commit(4, 10)];
        assert_eq!(weekend_activity(&commits, &[], utc()), (2, 4));
    }

    #[test]
    fn test_weekend_activity_falls_back_to_calendar() {
        let calendar = vec![
            ContributionDay::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 3),
            ContributionDay::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), 1),
        ];
        let (weekend, total) = weekend_activity(&[], &calendar, utc());
        assert_eq!((weekend, total), (3, 4));
        assert!((weekend_ratio(weekend, total) - 0.75).abs() < 1e-9);
        assert_eq!(weekend_ratio(0, 0), 0.0);
    }

    #[test]
    fn test_weekend_commits_in_offset() {
        // Sunday 23:00 UTC is already Monday at +02:00
        let commits = vec![commit(1, 10), commit(2, 23), commit(3, 10)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(weekend_commits(&commits, utc()), 2);
        assert_eq!(weekend_commits(&commits, plus_two), 1);
        assert_eq!(weekend_commits(&[], utc()), 0);
    }

    #[test]
    fn test_weekday_histogram_monday_first() {
        let calendar = vec![
            ContributionDay::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), 2),
            ContributionDay::new(NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(), 5),
        ];
        let days = weekday_histogram(&calendar);
        assert_eq!(days[0], 2);
        assert_eq!(days[6], 5);
    }

    #[test]
    fn test_night_commits() {
        let commits = vec![commit(3, 0), commit(3, 3), commit(3, 4), commit(3, 23)];
        assert_eq!(night_commits(&commits, utc()), 2);
    }
}

//! Activity data returned by the GitHub sources.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Which API strategy fetches the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    /// GraphQL when a token is available, REST otherwise.
    #[default]
    Auto,
    /// Paginated REST v3 endpoints.
    Rest,
    /// A single GraphQL v4 query.
    #[value(name = "graphql")]
    #[serde(rename = "graphql")]
    GraphQl,
}

impl ApiMode {
    /// Resolve `Auto` against token availability.
    pub fn resolve(self, has_token: bool) -> ApiMode {
        match self {
            ApiMode::Auto if has_token => ApiMode::GraphQl,
            ApiMode::Auto => ApiMode::Rest,
            other => other,
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiMode::Auto => write!(f, "auto"),
            ApiMode::Rest => write!(f, "rest"),
            ApiMode::GraphQl => write!(f, "graphql"),
        }
    }
}

/// Public profile of the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

/// A repository owned by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    /// `owner/name`
    pub full_name: String,
    pub description: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub primary_language: Option<String>,
    pub is_fork: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
}

/// One commit, tagged with the repository it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub timestamp: DateTime<Utc>,
    /// `owner/name` of the source repository
    pub repo: String,
}

impl CommitRecord {
    pub fn new(timestamp: DateTime<Utc>, repo: impl Into<String>) -> Self {
        Self {
            timestamp,
            repo: repo.into(),
        }
    }
}

/// Contribution count for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Invalid window requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// The year has not started yet.
    #[error("{year} has not happened yet (current year is {current})")]
    FutureYear { year: i32, current: i32 },
    /// The year cannot be represented as a date.
    #[error("invalid year: {0}")]
    InvalidYear(i32),
}

/// Inclusive date range covered by a wrapped report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub year: i32,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Window for `year`: Jan 1 through Dec 31, or through `today` for the
    /// current year.
    pub fn for_year(year: i32, today: NaiveDate) -> Result<Self, WindowError> {
        if year > today.year() {
            return Err(WindowError::FutureYear {
                year,
                current: today.year(),
            });
        }
        let from = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(WindowError::InvalidYear(year))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(WindowError::InvalidYear(year))?;
        Ok(Self {
            year,
            from,
            to: end.min(today),
        })
    }

    /// Number of days in the window, inclusive.
    pub fn days(&self) -> usize {
        (self.to - self.from).num_days().max(0) as usize + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Every date in the window, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.from.iter_days().take(self.days())
    }

    /// True when the window stops before Dec 31, i.e. the year is still
    /// running and its last day is today.
    pub fn is_partial(&self) -> bool {
        NaiveDate::from_ymd_opt(self.year, 12, 31).is_some_and(|end| self.to < end)
    }

    /// Start of the window as an RFC 3339 UTC timestamp.
    pub fn since_timestamp(&self) -> String {
        format!("{}T00:00:00Z", self.from.format("%Y-%m-%d"))
    }

    /// End of the window as an RFC 3339 UTC timestamp.
    pub fn until_timestamp(&self) -> String {
        format!("{}T23:59:59Z", self.to.format("%Y-%m-%d"))
    }
}

/// Everything the analytics need, regardless of which strategy fetched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityData {
    pub profile: UserProfile,
    pub repositories: Vec<Repository>,
    /// Bytes per language over the inspected repositories
    pub languages: BTreeMap<String, u64>,
    pub commits: Vec<CommitRecord>,
    pub pull_requests: u32,
    pub issues: u32,
    /// One entry per window day, ascending, zero-filled
    pub calendar: Vec<ContributionDay>,
    pub window: DateWindow,
    pub source: ApiMode,
}

/// Build a zero-filled daily calendar from commit timestamps (UTC dates).
pub fn calendar_from_commits(commits: &[CommitRecord], window: &DateWindow) -> Vec<ContributionDay> {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for commit in commits {
        let date = commit.timestamp.date_naive();
        if window.contains(date) {
            *counts.entry(date).or_insert(0) += 1;
        }
    }
    fill_calendar(&counts, window)
}

/// Expand sparse per-day counts into a full calendar over the window.
pub fn fill_calendar(counts: &BTreeMap<NaiveDate, u32>, window: &DateWindow) -> Vec<ContributionDay> {
    window
        .dates()
        .map(|date| ContributionDay::new(date, counts.get(&date).copied().unwrap_or(0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_api_mode_resolve() {
        assert_eq!(ApiMode::Auto.resolve(true), ApiMode::GraphQl);
        assert_eq!(ApiMode::Auto.resolve(false), ApiMode::Rest);
        assert_eq!(ApiMode::Rest.resolve(true), ApiMode::Rest);
        assert_eq!(ApiMode::GraphQl.resolve(false), ApiMode::GraphQl);
    }

    #[test]
    fn test_api_mode_serde_names() {
        assert_eq!(serde_json::to_string(&ApiMode::GraphQl).unwrap(), "\"graphql\"");
        let mode: ApiMode = serde_json::from_str("\"rest\"").unwrap();
        assert_eq!(mode, ApiMode::Rest);
    }

    #[test]
    fn test_window_past_year_is_full() {
        let window = DateWindow::for_year(2023, date(2024, 3, 1)).unwrap();
        assert_eq!(window.from, date(2023, 1, 1));
        assert_eq!(window.to, date(2023, 12, 31));
        assert_eq!(window.days(), 365);
    }

    #[test]
    fn test_window_current_year_ends_today() {
        let window = DateWindow::for_year(2024, date(2024, 3, 1)).unwrap();
        assert_eq!(window.to, date(2024, 3, 1));
        // 31 + 29 + 1
        assert_eq!(window.days(), 61);
    }

    #[test]
    fn test_window_future_year_rejected() {
        let err = DateWindow::for_year(2030, date(2024, 3, 1)).unwrap_err();
        assert_eq!(
            err,
            WindowError::FutureYear {
                year: 2030,
                current: 2024
            }
        );
    }

    #[test]
    fn test_window_error_messages() {
        let future = WindowError::FutureYear {
            year: 2030,
            current: 2024,
        };
        assert_eq!(
            future.to_string(),
            "2030 has not happened yet (current year is 2024)"
        );
        let err: Box<dyn std::error::Error> = Box::new(WindowError::InvalidYear(-1));
        assert_eq!(err.to_string(), "invalid year: -1");
    }

    #[test]
    fn test_window_partial_only_for_running_year() {
        assert!(DateWindow::for_year(2024, date(2024, 3, 1)).unwrap().is_partial());
        assert!(!DateWindow::for_year(2023, date(2024, 3, 1)).unwrap().is_partial());
    }

    #[test]
    fn test_window_timestamps() {
        let window = DateWindow::for_year(2023, date(2024, 1, 5)).unwrap();
        assert_eq!(window.since_timestamp(), "2023-01-01T00:00:00Z");
        assert_eq!(window.until_timestamp(), "2023-12-31T23:59:59Z");
    }

    #[test]
    fn test_calendar_from_commits_zero_fills_and_ignores_outside() {
        let window = DateWindow::for_year(2024, date(2024, 1, 4)).unwrap();
        let commits = vec![
            CommitRecord::new(Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(), "a/b"),
            CommitRecord::new(Utc.with_ymd_and_hms(2024, 1, 2, 18, 0, 0).unwrap(), "a/c"),
            CommitRecord::new(Utc.with_ymd_and_hms(2023, 12, 31, 9, 0, 0).unwrap(), "a/b"),
        ];

        let calendar = calendar_from_commits(&commits, &window);
        assert_eq!(calendar.len(), 4);
        assert_eq!(calendar[0], ContributionDay::new(date(2024, 1, 1), 0));
        assert_eq!(calendar[1], ContributionDay::new(date(2024, 1, 2), 2));
        assert_eq!(calendar[3].date, date(2024, 1, 4));
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        let mut profile = UserProfile {
            login: "octocat".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "octocat");
        profile.name = Some("  ".to_string());
        assert_eq!(profile.display_name(), "octocat");
        profile.name = Some("The Octocat".to_string());
        assert_eq!(profile.display_name(), "The Octocat");
    }
}

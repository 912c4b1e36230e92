//! Canned activity for tests and benchmarks.

use chrono::{Datelike, Duration, NaiveTime, Weekday};
use std::collections::BTreeMap;

use crate::models::{
    calendar_from_commits, ActivityData, ApiMode, CommitRecord, DateWindow, Repository,
    UserProfile,
};

pub const SAMPLE_LOGIN: &str = "octocat";

fn repo(name: &str, stars: u32, language: &str) -> Repository {
    Repository {
        name: name.to_string(),
        full_name: format!("{}/{}", SAMPLE_LOGIN, name),
        stars,
        primary_language: Some(language.to_string()),
        ..Default::default()
    }
}

/// A busy year: commits on most weekdays in the evening, a few weekend
/// nights, three repositories and three languages.
pub fn sample_activity(window: DateWindow) -> ActivityData {
    let repos = [
        repo("hello-world", 120, "Rust"),
        repo("spoon-knife", 12, "TypeScript"),
        repo("linguist", 3, "Go"),
    ];

    let mut commits = Vec::new();
    for (i, date) in window.dates().enumerate() {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let count = if weekend { i % 2 } else { (i * 7) % 5 };
        for n in 0..count {
            let hour = if weekend { 1 } else { 19 + (n as i64 % 3) };
            commits.push(CommitRecord::new(
                midnight + Duration::hours(hour),
                repos[(i + n) % repos.len()].full_name.clone(),
            ));
        }
    }
    let calendar = calendar_from_commits(&commits, &window);

    ActivityData {
        profile: UserProfile {
            login: SAMPLE_LOGIN.to_string(),
            name: Some("The Octocat".to_string()),
            public_repos: repos.len() as u32,
            followers: 42,
            ..Default::default()
        },
        repositories: repos.to_vec(),
        languages: BTreeMap::from([
            ("Rust".to_string(), 60_000),
            ("TypeScript".to_string(), 30_000),
            ("Go".to_string(), 10_000),
        ]),
        commits,
        pull_requests: 12,
        issues: 4,
        calendar,
        window,
        source: ApiMode::Rest,
    }
}

/// A user with no activity at all in the window.
pub fn empty_activity(login: &str, window: DateWindow) -> ActivityData {
    ActivityData {
        profile: UserProfile {
            login: login.to_string(),
            ..Default::default()
        },
        repositories: Vec::new(),
        languages: BTreeMap::new(),
        commits: Vec::new(),
        pull_requests: 0,
        issues: 0,
        calendar: calendar_from_commits(&[], &window),
        window,
        source: ApiMode::Rest,
    }
}

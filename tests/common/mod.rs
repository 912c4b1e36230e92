//! Common test utilities for integration tests.
//!
//! Fixture windows, stats and canned GitHub JSON shared by the test files.

#![allow(dead_code)]

use chrono::{FixedOffset, NaiveDate};
use ghwrapped::adapters::mock::fixtures::{empty_activity, sample_activity, SAMPLE_LOGIN};
use ghwrapped::github::SourceOptions;
use ghwrapped::models::DateWindow;
use ghwrapped::stats::{compute_stats, WrappedStats, DEFAULT_TOP_N};
use serde_json::{json, Value};

/// The whole of 2024, seen from the new year.
pub fn window_2024() -> DateWindow {
    DateWindow::for_year(2024, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()).unwrap()
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

/// Stats for the busy sample user.
pub fn sample_stats() -> WrappedStats {
    compute_stats(&sample_activity(window_2024()), utc(), DEFAULT_TOP_N)
}

/// Stats for a user with nothing in 2024.
pub fn empty_stats() -> WrappedStats {
    compute_stats(&empty_activity("ghost", window_2024()), utc(), DEFAULT_TOP_N)
}

/// Source options pointing both endpoints at a mock server.
pub fn options_for(base: &str) -> SourceOptions {
    SourceOptions {
        api_url: base.to_string(),
        graphql_url: format!("{}/graphql", base),
        ..SourceOptions::default()
    }
}

pub fn rest_user() -> Value {
    json!({
        "login": SAMPLE_LOGIN,
        "name": "The Octocat",
        "public_repos": 2,
        "followers": 10,
        "following": 1,
        "created_at": "2011-01-25T18:44:36Z"
    })
}

pub fn rest_repos() -> Value {
    json!([
        {
            "name": "hello-world",
            "full_name": "octocat/hello-world",
            "stargazers_count": 80,
            "forks_count": 9,
            "language": "Rust",
            "fork": false,
            "created_at": "2024-02-01T09:00:00Z",
            "pushed_at": "2024-11-30T12:00:00Z"
        },
        {
            "name": "forked",
            "full_name": "octocat/forked",
            "stargazers_count": 5000,
            "language": "C",
            "fork": true,
            "pushed_at": "2024-06-01T12:00:00Z"
        }
    ])
}

pub fn rest_commits() -> Value {
    json!([
        {"commit": {"author": {"date": "2024-03-04T22:30:00Z"}}},
        {"commit": {"author": {"date": "2024-03-05T09:15:00Z"}}},
        {"commit": {"author": {"date": "2024-03-05T23:45:00Z"}}}
    ])
}

/// A `data.user` payload with two active days and one repository.
pub fn graphql_user() -> Value {
    json!({
        "data": {
            "user": {
                "login": SAMPLE_LOGIN,
                "name": "The Octocat",
                "followers": {"totalCount": 10},
                "following": {"totalCount": 1},
                "repositories": {
                    "totalCount": 1,
                    "nodes": [{
                        "name": "hello-world",
                        "nameWithOwner": "octocat/hello-world",
                        "stargazerCount": 80,
                        "isFork": false,
                        "createdAt": "2024-02-01T09:00:00Z",
                        "pushedAt": "2024-11-30T12:00:00Z",
                        "primaryLanguage": {"name": "Rust"},
                        "languages": {"edges": [
                            {"size": 9000, "node": {"name": "Rust"}},
                            {"size": 1000, "node": {"name": "Shell"}}
                        ]},
                        "defaultBranchRef": {"target": {"history": {"nodes": [
                            {"committedDate": "2024-03-04T22:30:00Z", "author": {"user": {"login": SAMPLE_LOGIN}}},
                            {"committedDate": "2024-03-05T09:15:00Z", "author": {"user": {"login": "someone-else"}}}
                        ]}}}
                    }]
                },
                "contributionsCollection": {
                    "totalPullRequestContributions": 6,
                    "totalIssueContributions": 2,
                    "contributionCalendar": {"weeks": [
                        {"contributionDays": [
                            {"date": "2024-03-04", "contributionCount": 3},
                            {"date": "2024-03-05", "contributionCount": 5}
                        ]}
                    ]}
                }
            }
        }
    })
}

//! Analytics layer.
//!
//! Pure functions from [`ActivityData`] to [`WrappedStats`]. Nothing here
//! does I/O; every pass is linear in the number of days or commits.

pub mod achievements;
pub mod archetype;
pub mod insights;
pub mod languages;
pub mod rhythm;
pub mod streaks;

pub use achievements::Achievement;
pub use archetype::Archetype;
pub use languages::LanguageShare;
pub use streaks::{Streak, StreakSummary};

use chrono::{Datelike, FixedOffset};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{ActivityData, ApiMode, ContributionDay, DateWindow};

/// Default number of languages kept.
pub const DEFAULT_TOP_N: usize = 5;

/// Number of repositories on the top-repositories slide.
pub const TOP_REPOS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthTotal {
    /// 1..=12
    pub month: u32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSummary {
    pub name: String,
    pub commits: u32,
    pub stars: u32,
    pub language: Option<String>,
}

/// Everything the slides, the card and the JSON output show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrappedStats {
    pub login: String,
    pub display_name: String,
    pub year: i32,
    pub window: DateWindow,
    pub source: ApiMode,
    /// `+HH:MM` offset used for hour and weekday bucketing
    pub utc_offset: String,

    pub total_contributions: u32,
    pub total_commits: u32,
    pub active_days: u32,
    pub pull_requests: u32,
    pub issues: u32,
    pub total_stars: u32,
    pub new_repos: u32,

    pub streaks: StreakSummary,
    pub languages: Vec<LanguageShare>,
    pub language_count: usize,

    pub hours: [u32; 24],
    pub peak_hour: Option<u32>,
    /// Monday first
    pub weekdays: [u32; 7],
    pub weekend_ratio: f64,
    pub busiest_day: Option<ContributionDay>,
    pub busiest_month: Option<MonthTotal>,
    pub top_repos: Vec<RepoSummary>,

    pub archetype: Archetype,
    pub achievements: Vec<Achievement>,
    pub insights: Vec<String>,

    pub calendar: Vec<ContributionDay>,
}

impl WrappedStats {
    pub fn unlocked_achievements(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(|a| a.unlocked)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked_achievements().count()
    }

    pub fn top_language(&self) -> Option<&LanguageShare> {
        self.languages.first()
    }
}

/// `+HH:MM` rendering of an offset.
pub fn format_offset(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    format!("{}{:02}:{:02}", sign, secs / 3600, (secs % 3600) / 60)
}

/// Highest-count day; the earliest wins ties. `None` when nothing happened.
pub fn busiest_day(calendar: &[ContributionDay]) -> Option<ContributionDay> {
    calendar
        .iter()
        .filter(|day| day.is_active())
        .fold(None, |best: Option<ContributionDay>, day| match best {
            Some(b) if b.count >= day.count => Some(b),
            _ => Some(*day),
        })
}

/// Highest-count month; the earliest wins ties.
pub fn busiest_month(calendar: &[ContributionDay]) -> Option<MonthTotal> {
    let mut months = [0u32; 12];
    for day in calendar {
        months[day.date.month0() as usize] += day.count;
    }
    let mut best: Option<MonthTotal> = None;
    for (index, &count) in months.iter().enumerate() {
        if count > 0 && best.map_or(true, |b| count > b.count) {
            best = Some(MonthTotal {
                month: index as u32 + 1,
                count,
            });
        }
    }
    best
}

/// Repositories by commit count, descending; ties by name.
pub fn top_repositories(data: &ActivityData, n: usize) -> Vec<RepoSummary> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for commit in &data.commits {
        *counts.entry(commit.repo.as_str()).or_insert(0) += 1;
    }

    let mut repos: Vec<RepoSummary> = counts
        .into_iter()
        .map(|(full_name, commits)| {
            let repo = data.repositories.iter().find(|r| r.full_name == full_name);
            RepoSummary {
                name: full_name.to_string(),
                commits,
                stars: repo.map_or(0, |r| r.stars),
                language: repo.and_then(|r| r.primary_language.clone()),
            }
        })
        .collect();
    repos.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.name.cmp(&b.name)));
    repos.truncate(n);
    repos
}

/// Derive the full statistics bundle.
///
/// `offset` buckets commit hours and weekdays; `top_n` caps the language
/// list.
pub fn compute_stats(data: &ActivityData, offset: FixedOffset, top_n: usize) -> WrappedStats {
    let mut calendar = data.calendar.clone();
    calendar.sort_by_key(|day| day.date);

    let total_contributions: u32 = calendar.iter().map(|day| day.count).sum();
    let active_days = calendar.iter().filter(|day| day.is_active()).count() as u32;
    let total_commits = data.commits.len() as u32;

    let streaks = streaks::summarize(&calendar, data.window.is_partial());
    let top_languages = languages::top_languages(&data.languages, top_n);
    let language_count = languages::language_count(&data.languages);

    let hours = rhythm::hour_histogram(&data.commits, offset);
    let peak_hour = rhythm::peak_hour(&hours);
    let weekdays = rhythm::weekday_histogram(&calendar);
    let (weekend, weekend_total) = rhythm::weekend_activity(&data.commits, &calendar, offset);
    let weekend_ratio = rhythm::weekend_ratio(weekend, weekend_total);

    let owned = data.repositories.iter().filter(|r| !r.is_fork);
    let total_stars: u32 = owned.clone().map(|r| r.stars).sum();
    let new_repos = owned
        .filter(|r| {
            r.created_at
                .is_some_and(|created| data.window.contains(created.date_naive()))
        })
        .count() as u32;

    let archetype = archetype::classify(&archetype::ArchetypeInputs {
        total_commits,
        total_contributions,
        peak_hour,
        weekend_ratio,
        pull_requests: data.pull_requests,
    });

    let achievements = achievements::evaluate(&achievements::AchievementInputs {
        total_contributions,
        longest_streak: streaks.longest.length,
        language_count,
        pull_requests: data.pull_requests,
        issues: data.issues,
        total_stars,
        night_commits: rhythm::night_commits(&data.commits, offset),
        weekend_commits: rhythm::weekend_commits(&data.commits, offset),
        new_repos,
        active_days,
    });

    let busiest_day = busiest_day(&calendar);
    let busiest_month = busiest_month(&calendar);
    let insights = insights::generate(&insights::InsightInputs {
        total_contributions,
        busiest_day,
        longest_streak: streaks.longest.length,
        top_language: top_languages.first(),
        weekend_ratio,
        busiest_month,
        pull_requests: data.pull_requests,
        issues: data.issues,
    });

    tracing::debug!(
        total_contributions,
        total_commits,
        active_days,
        %archetype,
        "computed stats"
    );

    WrappedStats {
        login: data.profile.login.clone(),
        display_name: data.profile.display_name().to_string(),
        year: data.window.year,
        window: data.window,
        source: data.source,
        utc_offset: format_offset(offset),
        total_contributions,
        total_commits,
        active_days,
        pull_requests: data.pull_requests,
        issues: data.issues,
        total_stars,
        new_repos,
        streaks,
        languages: top_languages,
        language_count,
        hours,
        peak_hour,
        weekdays,
        weekend_ratio,
        busiest_day,
        busiest_month,
        top_repos: top_repositories(data, TOP_REPOS),
        archetype,
        achievements,
        insights,
        calendar,
    }
}

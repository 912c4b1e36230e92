//! Templated one-line insights.

use chrono::Month;

use super::languages::LanguageShare;
use super::MonthTotal;
use crate::models::ContributionDay;

pub struct InsightInputs<'a> {
    pub total_contributions: u32,
    pub busiest_day: Option<ContributionDay>,
    pub longest_streak: u32,
    pub top_language: Option<&'a LanguageShare>,
    pub weekend_ratio: f64,
    pub busiest_month: Option<MonthTotal>,
    pub pull_requests: u32,
    pub issues: u32,
}

pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("?", |m| m.name())
}

fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

fn busiest_day(day: Option<ContributionDay>) -> Option<String> {
    let day = day.filter(ContributionDay::is_active)?;
    Some(format!(
        "Your busiest day was {} with {}.",
        day.date.format("%A, %B %-d"),
        plural(day.count, "contribution")
    ))
}

fn streak_tier(longest: u32) -> Option<String> {
    let line = match longest {
        0 => return None,
        100..=u32::MAX => format!("A {}-day streak. That is real commitment.", longest),
        30..=99 => format!("You kept a {}-day streak alive. Impressive focus.", longest),
        7..=29 => format!("Your longest streak ran {} days.", longest),
        _ => format!("Your longest streak was {}. Room to grow.", plural(longest, "day")),
    };
    Some(line)
}

fn dominant_language(top: Option<&LanguageShare>) -> Option<String> {
    let top = top?;
    if top.percent >= 50.0 {
        Some(format!(
            "{} dominated your year at {:.0}% of your code.",
            top.name, top.percent
        ))
    } else {
        Some(format!(
            "{} led a varied mix at {:.0}% of your code.",
            top.name, top.percent
        ))
    }
}

fn weekend_habit(ratio: f64, total: u32) -> Option<String> {
    if total == 0 {
        return None;
    }
    if ratio >= 0.40 {
        Some(format!(
            "{:.0}% of your work landed on weekends.",
            ratio * 100.0
        ))
    } else if ratio <= 0.05 {
        Some("You kept your weekends free.".to_string())
    } else {
        None
    }
}

fn busiest_month(month: Option<MonthTotal>) -> Option<String> {
    let month = month.filter(|m| m.count > 0)?;
    Some(format!(
        "{} was your most active month with {}.",
        month_name(month.month),
        plural(month.count, "contribution")
    ))
}

fn pr_issue_balance(prs: u32, issues: u32) -> Option<String> {
    if prs == 0 && issues == 0 {
        return None;
    }
    let line = if prs >= issues.saturating_mul(2) {
        format!(
            "You ship more than you report: {} and {}.",
            plural(prs, "pull request"),
            plural(issues, "issue")
        )
    } else if issues >= prs.saturating_mul(2) {
        format!(
            "You keep the tracker honest: {} against {}.",
            plural(issues, "issue"),
            plural(prs, "pull request")
        )
    } else {
        format!(
            "A balanced year: {} and {}.",
            plural(prs, "pull request"),
            plural(issues, "issue")
        )
    };
    Some(line)
}

/// Insights in a fixed order. Never empty.
pub fn generate(inputs: &InsightInputs<'_>) -> Vec<String> {
    let mut insights: Vec<String> = [
        busiest_day(inputs.busiest_day),
        streak_tier(inputs.longest_streak),
        dominant_language(inputs.top_language),
        weekend_habit(inputs.weekend_ratio, inputs.total_contributions),
        busiest_month(inputs.busiest_month),
        pr_issue_balance(inputs.pull_requests, inputs.issues),
    ]
    .into_iter()
    .flatten()
    .collect();

    if insights.is_empty() {
        insights.push("A quiet year. Every journey starts with a first commit.".to_string());
    }
    insights
}

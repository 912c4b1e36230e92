//! Plain-text report for `--summary`.

use std::fmt::Write;

use chrono::NaiveDate;

use super::boxes::{icons, LINE_WIDTH};
use crate::stats::insights::month_name;
use crate::stats::{Streak, WrappedStats};

fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

fn streak_range(streak: &Streak) -> String {
    match (streak.start, streak.end) {
        (Some(start), Some(end)) if start == end => format!(" ({})", short_date(start)),
        (Some(start), Some(end)) => format!(" ({} - {})", short_date(start), short_date(end)),
        _ => String::new(),
    }
}

fn days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "─".repeat(LINE_WIDTH));
}

fn row(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {:<22}{}", label, value);
}

/// The full report as one string.
pub fn summary_report(stats: &WrappedStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "@{} · {} GITHUB WRAPPED", stats.login, stats.year);
    let _ = writeln!(out, "{}", "═".repeat(LINE_WIDTH));
    if stats.display_name != stats.login {
        let _ = writeln!(out, "{}", stats.display_name);
    }
    let _ = writeln!(
        out,
        "{} to {} via {}",
        stats.window.from, stats.window.to, stats.source
    );

    section(&mut out, "CONTRIBUTIONS");
    row(&mut out, "Contributions", stats.total_contributions);
    row(&mut out, "Commits", stats.total_commits);
    row(&mut out, "Active days", stats.active_days);
    row(&mut out, "Pull requests", stats.pull_requests);
    row(&mut out, "Issues", stats.issues);
    row(&mut out, "Stars", stats.total_stars);
    row(&mut out, "New repositories", stats.new_repos);

    section(&mut out, "STREAKS");
    let longest = &stats.streaks.longest;
    row(
        &mut out,
        "Longest",
        format!("{}{}", days(longest.length), streak_range(longest)),
    );
    row(&mut out, "Current", days(stats.streaks.current));

    if !stats.languages.is_empty() {
        section(&mut out, "LANGUAGES");
        for language in &stats.languages {
            row(&mut out, &language.name, format!("{:.1}%", language.percent));
        }
    }

    section(&mut out, "RHYTHM");
    row(
        &mut out,
        "Peak hour",
        stats.peak_hour.map_or_else(
            || "-".to_string(),
            |h| format!("{:02}:00 (UTC{})", h, stats.utc_offset),
        ),
    );
    row(
        &mut out,
        "Weekend share",
        format!("{:.0}%", stats.weekend_ratio * 100.0),
    );
    if let Some(day) = stats.busiest_day {
        row(
            &mut out,
            "Busiest day",
            format!("{} ({})", short_date(day.date), day.count),
        );
    }
    if let Some(month) = stats.busiest_month {
        row(
            &mut out,
            "Busiest month",
            format!("{} ({})", month_name(month.month), month.count),
        );
    }

    if !stats.top_repos.is_empty() {
        section(&mut out, "TOP REPOSITORIES");
        for repo in &stats.top_repos {
            row(&mut out, &repo.name, format!("{} commits", repo.commits));
        }
    }

    section(&mut out, "ARCHETYPE");
    let _ = writeln!(out, "  {}", stats.archetype.title());
    let _ = writeln!(out, "  {}", stats.archetype.description());

    section(
        &mut out,
        &format!(
            "ACHIEVEMENTS ({}/{})",
            stats.unlocked_count(),
            stats.achievements.len()
        ),
    );
    for achievement in &stats.achievements {
        let icon = if achievement.unlocked { icons::SUCCESS } else { " " };
        let _ = writeln!(
            out,
            "  {} {:<18}{}",
            icon, achievement.title, achievement.description
        );
    }

    section(&mut out, "INSIGHTS");
    for insight in &stats.insights {
        let _ = writeln!(out, "  - {}", insight);
    }
    out
}

pub fn print_summary(stats: &WrappedStats) {
    print!("{}", summary_report(stats));
}

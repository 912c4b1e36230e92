//! Slide bodies.
//!
//! Every slide is a list of lines drawn into the centered content area by
//! [`super::render`].

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::helpers::{
    bar, format_count, heatmap_by_month, heatmap_by_week, sparkline, truncate_string,
};
use super::layout::LayoutContext;
use super::theme::{
    COLOR_ACCENT, COLOR_DIM, COLOR_HEADER, COLOR_SELECTED, COLOR_SUCCESS, LANGUAGE_COLORS,
};
use crate::app::{ActionItem, App, Slide};
use crate::stats::insights::month_name;
use crate::stats::{Streak, WrappedStats};

fn headline(value: String, label: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            value,
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(label.to_string(), Style::default().fg(COLOR_HEADER)),
    ])
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<18}", label), Style::default().fg(COLOR_DIM)),
        Span::styled(value, Style::default().fg(COLOR_HEADER)),
    ])
}

fn dim(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(COLOR_DIM)))
}

fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        format!("1 {}", word)
    } else {
        format!("{} {}s", format_count(n), word)
    }
}

fn streak_dates(streak: &Streak) -> String {
    match (streak.start, streak.end) {
        (Some(start), Some(end)) => format!(
            "{} - {}",
            start.format("%b %-d"),
            end.format("%b %-d")
        ),
        _ => "-".to_string(),
    }
}

fn intro(stats: &WrappedStats) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("@{}", stats.login),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if stats.display_name != stats.login {
        lines.push(Line::from(stats.display_name.clone()));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Your {} on GitHub, wrapped.", stats.year),
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());
    lines.push(dim(format!(
        "{} to {} · times in UTC{}",
        stats.window.from, stats.window.to, stats.utc_offset
    )));
    lines.push(dim("Press → to begin"));
    lines
}

fn contributions(stats: &WrappedStats, ctx: LayoutContext) -> Vec<Line<'static>> {
    let mut lines = vec![
        headline(format_count(stats.total_contributions), "contributions"),
        Line::default(),
        row("Commits", format_count(stats.total_commits)),
        row("Pull requests", format_count(stats.pull_requests)),
        row("Issues", format_count(stats.issues)),
        row(
            "Active days",
            format!("{} of {}", stats.active_days, stats.window.days()),
        ),
        row("New repositories", format_count(stats.new_repos)),
        row("Stars earned", format_count(stats.total_stars)),
    ];
    if !ctx.is_short() {
        lines.push(Line::default());
        if ctx.fits_week_heatmap() {
            lines.extend(heatmap_by_week(&stats.calendar));
        } else {
            lines.extend(heatmap_by_month(&stats.calendar));
        }
    }
    lines
}

fn streaks(stats: &WrappedStats, ctx: LayoutContext) -> Vec<Line<'static>> {
    let longest = &stats.streaks.longest;
    let width = ctx.bar_width();
    let max = longest.length.max(stats.streaks.current) as f64;
    vec![
        headline(plural(longest.length, "day"), "longest streak"),
        dim(streak_dates(longest)),
        Line::default(),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Longest"), Style::default().fg(COLOR_DIM)),
            Span::styled(bar(longest.length as f64, max, width), Style::default().fg(COLOR_ACCENT)),
            Span::raw(format!(" {}", longest.length)),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Current"), Style::default().fg(COLOR_DIM)),
            Span::styled(
                bar(stats.streaks.current as f64, max, width),
                Style::default().fg(COLOR_SELECTED),
            ),
            Span::raw(format!(" {}", stats.streaks.current)),
        ]),
    ]
}

fn languages(stats: &WrappedStats, ctx: LayoutContext) -> Vec<Line<'static>> {
    let width = ctx.bar_width();
    let max = stats
        .languages
        .first()
        .map_or(0.0, |language| language.percent);
    let mut lines = vec![
        headline(
            stats.language_count.to_string(),
            if stats.language_count == 1 { "language" } else { "languages" },
        ),
        Line::default(),
    ];
    for (i, language) in stats.languages.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<14}", truncate_string(&language.name, 13))),
            Span::styled(
                bar(language.percent, max, width),
                Style::default().fg(LANGUAGE_COLORS[i % LANGUAGE_COLORS.len()]),
            ),
            Span::styled(
                format!(" {:>5.1}%", language.percent),
                Style::default().fg(COLOR_DIM),
            ),
        ]));
    }
    lines
}

fn rhythm(stats: &WrappedStats, ctx: LayoutContext) -> Vec<Line<'static>> {
    let peak = stats
        .peak_hour
        .map_or_else(|| "-".to_string(), |h| format!("{:02}:00", h));
    let mut lines = vec![
        headline(peak, "peak hour"),
        Line::default(),
        Line::from(Span::styled(
            sparkline(&stats.hours),
            Style::default().fg(COLOR_ACCENT),
        )),
        dim("0     6     12    18   23"),
        Line::default(),
    ];

    let width = ctx.bar_width().min(24);
    let max = stats.weekdays.iter().copied().max().unwrap_or(0) as f64;
    if !ctx.is_short() {
        for (label, count) in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
            .iter()
            .zip(stats.weekdays)
        {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", label), Style::default().fg(COLOR_DIM)),
                Span::styled(bar(count as f64, max, width), Style::default().fg(COLOR_SELECTED)),
                Span::raw(format!(" {}", count)),
            ]));
        }
        lines.push(Line::default());
    }

    lines.push(row(
        "Weekend share",
        format!("{:.0}%", stats.weekend_ratio * 100.0),
    ));
    if let Some(day) = stats.busiest_day {
        lines.push(row(
            "Busiest day",
            format!("{} ({})", day.date.format("%b %-d"), day.count),
        ));
    }
    if let Some(month) = stats.busiest_month {
        lines.push(row(
            "Busiest month",
            format!("{} ({})", month_name(month.month), month.count),
        ));
    }
    lines
}

fn top_repos(stats: &WrappedStats, ctx: LayoutContext) -> Vec<Line<'static>> {
    let name_width = if ctx.is_narrow() { 20 } else { 32 };
    let mut lines = vec![headline(
        stats.top_repos.len().to_string(),
        "repositories you kept coming back to",
    )];
    lines.push(Line::default());
    for (i, repo) in stats.top_repos.iter().enumerate() {
        let mut spans = vec![
            Span::styled(format!("{}. ", i + 1), Style::default().fg(COLOR_DIM)),
            Span::styled(
                format!(
                    "{:<width$}",
                    truncate_string(&repo.name, name_width),
                    width = name_width + 1
                ),
                Style::default().fg(COLOR_HEADER),
            ),
            Span::styled(plural(repo.commits, "commit"), Style::default().fg(COLOR_ACCENT)),
        ];
        if repo.stars > 0 {
            spans.push(Span::styled(
                format!("  ★ {}", format_count(repo.stars)),
                Style::default().fg(COLOR_DIM),
            ));
        }
        if let Some(language) = &repo.language {
            if !ctx.is_narrow() {
                spans.push(Span::styled(
                    format!("  {}", language),
                    Style::default().fg(COLOR_DIM),
                ));
            }
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn archetype(stats: &WrappedStats) -> Vec<Line<'static>> {
    let archetype = stats.archetype;
    vec![
        dim("Your coding archetype"),
        Line::default(),
        Line::from(Span::styled(
            format!("{}  {}", archetype.symbol(), archetype.title()),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(archetype.description()),
        Line::default(),
        dim(format!(
            "peak hour {} · weekend share {:.0}% · {}",
            stats
                .peak_hour
                .map_or_else(|| "-".to_string(), |h| format!("{:02}:00", h)),
            stats.weekend_ratio * 100.0,
            plural(stats.pull_requests, "pull request")
        )),
    ]
}

fn achievements(stats: &WrappedStats) -> Vec<Line<'static>> {
    let mut lines = vec![
        headline(
            format!("{}/{}", stats.unlocked_count(), stats.achievements.len()),
            "achievements unlocked",
        ),
        Line::default(),
    ];
    for achievement in &stats.achievements {
        let line = if achievement.unlocked {
            Line::from(vec![
                Span::styled("✓ ", Style::default().fg(COLOR_SUCCESS)),
                Span::styled(
                    format!("{:<16}", achievement.title),
                    Style::default()
                        .fg(COLOR_HEADER)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(achievement.description, Style::default().fg(COLOR_DIM)),
            ])
        } else {
            dim(format!("· {:<16}{}", achievement.title, achievement.description))
        };
        lines.push(line);
    }
    lines
}

fn insights(stats: &WrappedStats) -> Vec<Line<'static>> {
    let mut lines = vec![dim("A few things we noticed"), Line::default()];
    for insight in &stats.insights {
        lines.push(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(COLOR_ACCENT)),
            Span::raw(insight.clone()),
        ]));
        lines.push(Line::default());
    }
    lines
}

fn actions(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![dim("Take it with you"), Line::default()];
    for (i, item) in ActionItem::ALL.iter().enumerate() {
        let selected = i == app.action_index;
        let marker = if selected { "▶ " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(COLOR_SELECTED)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_HEADER)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("{:<14}", item.label()), style),
            Span::styled(format!("[{}]", item.shortcut()), Style::default().fg(COLOR_DIM)),
        ]));
    }
    lines.push(Line::default());
    lines.push(dim(format!("Cards are saved to {}", app.export_dir.display())));
    lines
}

/// Lines for the current slide.
pub fn slide_lines(app: &App, ctx: LayoutContext) -> Vec<Line<'static>> {
    let stats = &app.stats;
    match app.current_slide() {
        Slide::Intro => intro(stats),
        Slide::Contributions => contributions(stats, ctx),
        Slide::Streaks => streaks(stats, ctx),
        Slide::Languages => languages(stats, ctx),
        Slide::Rhythm => rhythm(stats, ctx),
        Slide::TopRepos => top_repos(stats, ctx),
        Slide::Archetype => archetype(stats),
        Slide::Achievements => achievements(stats),
        Slide::Insights => insights(stats),
        Slide::Actions => actions(app),
    }
}

//! Fixed achievement catalog.

use serde::Serialize;

/// Counters the catalog predicates look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct AchievementInputs {
    pub total_contributions: u32,
    pub longest_streak: u32,
    pub language_count: usize,
    pub pull_requests: u32,
    pub issues: u32,
    pub total_stars: u32,
    pub night_commits: u32,
    pub weekend_commits: u32,
    pub new_repos: u32,
    pub active_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

struct Rule {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    check: fn(&AchievementInputs) -> bool,
}

const CATALOG: &[Rule] = &[
    Rule {
        id: "first-steps",
        title: "First Steps",
        description: "Made a contribution",
        check: |i| i.total_contributions >= 1,
    },
    Rule {
        id: "centurion",
        title: "Centurion",
        description: "100 contributions",
        check: |i| i.total_contributions >= 100,
    },
    Rule {
        id: "thousand-club",
        title: "Thousand Club",
        description: "1,000 contributions",
        check: |i| i.total_contributions >= 1000,
    },
    Rule {
        id: "on-a-roll",
        title: "On a Roll",
        description: "7-day streak",
        check: |i| i.longest_streak >= 7,
    },
    Rule {
        id: "unstoppable",
        title: "Unstoppable",
        description: "30-day streak",
        check: |i| i.longest_streak >= 30,
    },
    Rule {
        id: "legendary",
        title: "Legendary",
        description: "100-day streak",
        check: |i| i.longest_streak >= 100,
    },
    Rule {
        id: "polyglot",
        title: "Polyglot",
        description: "Wrote 5 or more languages",
        check: |i| i.language_count >= 5,
    },
    Rule {
        id: "pr-machine",
        title: "PR Machine",
        description: "Opened 25 pull requests",
        check: |i| i.pull_requests >= 25,
    },
    Rule {
        id: "bug-hunter",
        title: "Bug Hunter",
        description: "Opened 10 issues",
        check: |i| i.issues >= 10,
    },
    Rule {
        id: "star-collector",
        title: "Star Collector",
        description: "100 stars across your repositories",
        check: |i| i.total_stars >= 100,
    },
    Rule {
        id: "midnight-coder",
        title: "Midnight Coder",
        description: "10 commits between midnight and 4am",
        check: |i| i.night_commits >= 10,
    },
    Rule {
        id: "weekend-shipper",
        title: "Weekend Shipper",
        description: "20 weekend commits",
        check: |i| i.weekend_commits >= 20,
    },
    Rule {
        id: "builder",
        title: "Builder",
        description: "Created 5 repositories",
        check: |i| i.new_repos >= 5,
    },
    Rule {
        id: "dedicated",
        title: "Dedicated",
        description: "Active on 200 days",
        check: |i| i.active_days >= 200,
    },
];

/// Every catalog entry in order, each with its `unlocked` flag.
pub fn evaluate(inputs: &AchievementInputs) -> Vec<Achievement> {
    CATALOG
        .iter()
        .map(|rule| Achievement {
            id: rule.id,
            title: rule.title,
            description: rule.description,
            unlocked: (rule.check)(inputs),
        })
        .collect()
}

pub fn catalog_len() -> usize {
    CATALOG.len()
}

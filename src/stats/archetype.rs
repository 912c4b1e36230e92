//! Coding archetype picked from when and how the user works.

use serde::Serialize;
use std::fmt;

/// Coding personality, picked by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    Observer,
    NightOwl,
    EarlyBird,
    WeekendWarrior,
    Collaborator,
    NineToFiver,
    EveningHacker,
}

impl Archetype {
    pub fn title(&self) -> &'static str {
        match self {
            Archetype::Observer => "The Observer",
            Archetype::NightOwl => "The Night Owl",
            Archetype::EarlyBird => "The Early Bird",
            Archetype::WeekendWarrior => "The Weekend Warrior",
            Archetype::Collaborator => "The Collaborator",
            Archetype::NineToFiver => "The Nine-to-Fiver",
            Archetype::EveningHacker => "The Evening Hacker",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Archetype::Observer => "Watching, learning, waiting for the right moment to ship.",
            Archetype::NightOwl => "Your best ideas arrive after everyone else has logged off.",
            Archetype::EarlyBird => "Commits land before the coffee is cold.",
            Archetype::WeekendWarrior => "Saturdays and Sundays are when the real work happens.",
            Archetype::Collaborator => "Pull requests are your love language.",
            Archetype::NineToFiver => "Steady, focused and done by dinner.",
            Archetype::EveningHacker => "Day job done, side projects on.",
        }
    }

    /// Single-cell marker used on the card and in the TUI.
    pub fn symbol(&self) -> &'static str {
        match self {
            Archetype::Observer => "o",
            Archetype::NightOwl => "*",
            Archetype::EarlyBird => "^",
            Archetype::WeekendWarrior => "#",
            Archetype::Collaborator => "&",
            Archetype::NineToFiver => "=",
            Archetype::EveningHacker => "~",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArchetypeInputs {
    pub total_commits: u32,
    pub total_contributions: u32,
    pub peak_hour: Option<u32>,
    pub weekend_ratio: f64,
    pub pull_requests: u32,
}

pub const WEEKEND_WARRIOR_RATIO: f64 = 0.40;
pub const COLLABORATOR_PRS: u32 = 30;

/// Ordered decision list; the first matching rule wins.
pub fn classify(inputs: &ArchetypeInputs) -> Archetype {
    if inputs.total_commits == 0 && inputs.total_contributions == 0 {
        return Archetype::Observer;
    }
    match inputs.peak_hour {
        Some(22..=23) | Some(0..=3) => return Archetype::NightOwl,
        Some(4..=8) => return Archetype::EarlyBird,
        _ => {}
    }
    if inputs.weekend_ratio >= WEEKEND_WARRIOR_RATIO {
        return Archetype::WeekendWarrior;
    }
    if inputs.pull_requests >= COLLABORATOR_PRS {
        return Archetype::Collaborator;
    }
    if matches!(inputs.peak_hour, Some(9..=17)) {
        return Archetype::NineToFiver;
    }
    Archetype::EveningHacker
}

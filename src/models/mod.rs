//! Data models shared by the fetch, analytics and presentation layers.

mod activity;

pub use activity::{
    calendar_from_commits, fill_calendar, ActivityData, ApiMode, CommitRecord, ContributionDay,
    DateWindow, Repository, UserProfile, WindowError,
};

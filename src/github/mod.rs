//! GitHub data-fetch layer.
//!
//! Two strategies implement [`ActivitySource`]:
//!
//! - [`RestSource`] paginates the v3 REST endpoints and fans out per
//!   repository with bounded concurrency.
//! - [`GraphQlSource`] issues one v4 query for the whole window.
//!
//! Both go through [`HttpClient`] and map failures onto [`FetchError`].

pub mod graphql;
pub mod rest;
pub mod status;

pub use graphql::GraphQlSource;
pub use rest::RestSource;
pub use status::check_status;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::FetchError;
use crate::models::{ActivityData, ApiMode, DateWindow, Repository};
use crate::traits::{Headers, HttpClient};

/// Public REST endpoint.
pub const API_URL: &str = "https://api.github.com";

/// Public GraphQL endpoint.
pub const GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Sent on every request; GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("ghwrapped/", env!("CARGO_PKG_VERSION"));

const API_VERSION: &str = "2022-11-28";

/// Common contract of the fetch strategies.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// The concrete strategy (never `Auto`).
    fn mode(&self) -> ApiMode;

    /// Fetch everything the analytics need for `login` inside `window`.
    async fn fetch(&self, login: &str, window: &DateWindow) -> Result<ActivityData, FetchError>;
}

/// Tunables shared by both strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    pub api_url: String,
    pub graphql_url: String,
    /// Maximum pages fetched from any paginated REST endpoint
    pub page_cap: u32,
    /// Maximum repositories inspected for languages and commits
    pub repo_limit: usize,
    /// Parallel per-repository requests
    pub concurrency: usize,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            api_url: API_URL.to_string(),
            graphql_url: GRAPHQL_URL.to_string(),
            page_cap: 3,
            repo_limit: 30,
            concurrency: 8,
        }
    }
}

/// Headers sent with every API request.
pub fn request_headers(token: Option<&str>) -> Headers {
    let mut headers = Headers::new();
    headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
    headers.insert(
        "Accept".to_string(),
        "application/vnd.github+json".to_string(),
    );
    headers.insert("X-GitHub-Api-Version".to_string(), API_VERSION.to_string());
    if let Some(token) = token {
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
    }
    headers
}

/// Repositories worth inspecting: not forks, pushed on or after the window
/// start, newest push first, at most `limit`.
pub fn select_repositories<'a>(
    repositories: &'a [Repository],
    window: &DateWindow,
    limit: usize,
) -> Vec<&'a Repository> {
    let mut selected: Vec<&Repository> = repositories
        .iter()
        .filter(|repo| !repo.is_fork)
        .filter(|repo| {
            repo.pushed_at
                .map_or(true, |pushed| pushed.date_naive() >= window.from)
        })
        .collect();
    selected.sort_by(|a, b| b.pushed_at.cmp(&a.pushed_at));
    selected.truncate(limit);
    selected
}

/// Build the source for `mode`, resolving `Auto` against the token.
pub fn build_source<C>(
    http: Arc<C>,
    mode: ApiMode,
    token: Option<String>,
    options: SourceOptions,
) -> Box<dyn ActivitySource>
where
    C: HttpClient + 'static,
{
    match mode.resolve(token.is_some()) {
        ApiMode::GraphQl => Box::new(GraphQlSource::new(http, token, options)),
        _ => Box::new(RestSource::new(http, token, options)),
    }
}

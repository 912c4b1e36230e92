//! REST v3 strategy.
//!
//! Pages through the user's repositories, fans out per repository for
//! languages and commits, and counts PRs and issues with the search API.
//! The contribution calendar is derived from the commit timestamps.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::{stream, FutureExt, StreamExt, TryStreamExt};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::status::check_status;
use super::{request_headers, select_repositories, ActivitySource, SourceOptions};
use crate::error::FetchError;
use crate::models::{
    calendar_from_commits, ActivityData, ApiMode, CommitRecord, DateWindow, Repository,
    UserProfile,
};
use crate::traits::{Headers, HttpClient, Response};

const PER_PAGE: usize = 100;

#[derive(Debug, Deserialize)]
struct RestUser {
    login: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    public_repos: u32,
    #[serde(default)]
    followers: u32,
    #[serde(default)]
    following: u32,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<RestUser> for UserProfile {
    fn from(user: RestUser) -> Self {
        UserProfile {
            login: user.login,
            name: user.name,
            avatar_url: user.avatar_url,
            bio: user.bio,
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RestRepo {
    name: String,
    full_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u32,
    #[serde(default)]
    forks_count: u32,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pushed_at: Option<DateTime<Utc>>,
}

impl From<RestRepo> for Repository {
    fn from(repo: RestRepo) -> Self {
        Repository {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            primary_language: repo.language,
            is_fork: repo.fork,
            created_at: repo.created_at,
            pushed_at: repo.pushed_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RestCommit {
    commit: RestCommitDetail,
}

#[derive(Debug, Deserialize)]
struct RestCommitDetail {
    #[serde(default)]
    author: Option<RestSignature>,
    #[serde(default)]
    committer: Option<RestSignature>,
}

#[derive(Debug, Deserialize)]
struct RestSignature {
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

impl RestCommit {
    /// Author date, falling back to the committer date.
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.commit
            .author
            .as_ref()
            .and_then(|s| s.date)
            .or_else(|| self.commit.committer.as_ref().and_then(|s| s.date))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    total_count: u32,
}

/// Languages and commits of one repository.
#[derive(Debug, Default)]
struct RepoActivity {
    languages: BTreeMap<String, u64>,
    commits: Vec<CommitRecord>,
}

/// Paginated REST strategy.
pub struct RestSource<C: HttpClient> {
    http: Arc<C>,
    token: Option<String>,
    options: SourceOptions,
}

impl<C: HttpClient> RestSource<C> {
    pub fn new(http: Arc<C>, token: Option<String>, options: SourceOptions) -> Self {
        Self {
            http,
            token,
            options,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.options.api_url.trim_end_matches('/'), path)
    }

    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, FetchError> {
        tracing::debug!(url, "GET");
        Ok(self.http.get(url, headers).await?)
    }

    async fn fetch_profile(&self, login: &str, headers: &Headers) -> Result<UserProfile, FetchError> {
        let response = self.get(&self.url(&format!("/users/{}", login)), headers).await?;
        check_status(&response, login)?;
        Ok(response.json::<RestUser>()?.into())
    }

    async fn fetch_repositories(
        &self,
        login: &str,
        headers: &Headers,
    ) -> Result<Vec<Repository>, FetchError> {
        let mut repositories = Vec::new();
        for page in 1..=self.options.page_cap {
            let url = self.url(&format!(
                "/users/{}/repos?type=owner&sort=pushed&per_page={}&page={}",
                login, PER_PAGE, page
            ));
            let response = self.get(&url, headers).await?;
            check_status(&response, login)?;
            let batch: Vec<RestRepo> = response.json()?;
            let short_page = batch.len() < PER_PAGE;
            repositories.extend(batch.into_iter().map(Repository::from));
            if short_page {
                break;
            }
        }
        Ok(repositories)
    }

    /// Repository-scoped responses: a vanished (404) or empty (409)
    /// repository yields `None` instead of an error.
    fn repo_response_ok(response: &Response, login: &str) -> Result<bool, FetchError> {
        match response.status {
            404 | 409 => Ok(false),
            _ => check_status(response, login).map(|_| true),
        }
    }

    async fn fetch_languages(
        &self,
        login: &str,
        repo: &Repository,
        headers: &Headers,
    ) -> Result<BTreeMap<String, u64>, FetchError> {
        let url = self.url(&format!("/repos/{}/languages", repo.full_name));
        let response = self.get(&url, headers).await?;
        if !Self::repo_response_ok(&response, login)? {
            return Ok(BTreeMap::new());
        }
        Ok(response.json()?)
    }

    async fn fetch_commits(
        &self,
        login: &str,
        repo: &Repository,
        window: &DateWindow,
        headers: &Headers,
    ) -> Result<Vec<CommitRecord>, FetchError> {
        let mut commits = Vec::new();
        for page in 1..=self.options.page_cap {
            let url = self.url(&format!(
                "/repos/{}/commits?author={}&since={}&until={}&per_page={}&page={}",
                repo.full_name,
                login,
                window.since_timestamp(),
                window.until_timestamp(),
                PER_PAGE,
                page
            ));
            let response = self.get(&url, headers).await?;
            if !Self::repo_response_ok(&response, login)? {
                break;
            }
            let batch: Vec<RestCommit> = response.json()?;
            let short_page = batch.len() < PER_PAGE;
            commits.extend(
                batch
                    .iter()
                    .filter_map(RestCommit::timestamp)
                    .map(|timestamp| CommitRecord::new(timestamp, repo.full_name.clone())),
            );
            if short_page {
                break;
            }
        }
        Ok(commits)
    }

    async fn fetch_repo_activity(
        &self,
        login: &str,
        repo: &Repository,
        window: &DateWindow,
        headers: &Headers,
    ) -> Result<RepoActivity, FetchError> {
        let (languages, commits) = futures::try_join!(
            self.fetch_languages(login, repo, headers),
            self.fetch_commits(login, repo, window, headers),
        )?;
        Ok(RepoActivity { languages, commits })
    }

    /// `total_count` of a search for items of `kind` (`pr` or `issue`)
    /// authored by `login` inside the window.
    async fn search_count(
        &self,
        login: &str,
        kind: &str,
        window: &DateWindow,
        headers: &Headers,
    ) -> Result<u32, FetchError> {
        let query = format!(
            "author:{} type:{} created:{}..{}",
            login,
            kind,
            window.from.format("%Y-%m-%d"),
            window.to.format("%Y-%m-%d")
        );
        let url = self.url(&format!(
            "/search/issues?q={}&per_page=1",
            urlencoding::encode(&query)
        ));
        let response = self.get(&url, headers).await?;
        check_status(&response, login)?;
        Ok(response.json::<SearchResult>()?.total_count)
    }

    async fn fetch_with(
        &self,
        login: &str,
        window: &DateWindow,
        token: Option<&str>,
    ) -> Result<ActivityData, FetchError> {
        let headers = request_headers(token);

        let profile = self.fetch_profile(login, &headers).await?;
        let repositories = self.fetch_repositories(login, &headers).await?;
        let selected = select_repositories(&repositories, window, self.options.repo_limit);
        tracing::info!(
            login,
            repositories = repositories.len(),
            inspected = selected.len(),
            "fetched repository list"
        );

        // Collected eagerly so the async_trait future stays Send
        let lookups: Vec<_> = selected
            .into_iter()
            .map(|repo| self.fetch_repo_activity(login, repo, window, &headers).boxed())
            .collect();
        let per_repo = stream::iter(lookups)
            .buffer_unordered(self.options.concurrency.max(1))
            .try_collect::<Vec<_>>();

        let (activities, pull_requests, issues) = futures::try_join!(
            per_repo,
            self.search_count(login, "pr", window, &headers),
            self.search_count(login, "issue", window, &headers),
        )?;

        let mut languages = BTreeMap::new();
        let mut commits = Vec::new();
        for activity in activities {
            for (language, bytes) in activity.languages {
                *languages.entry(language).or_insert(0) += bytes;
            }
            commits.extend(activity.commits);
        }
        commits.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        let calendar = calendar_from_commits(&commits, window);

        Ok(ActivityData {
            profile,
            repositories,
            languages,
            commits,
            pull_requests,
            issues,
            calendar,
            window: *window,
            source: ApiMode::Rest,
        })
    }
}

#[async_trait]
impl<C: HttpClient> ActivitySource for RestSource<C> {
    fn mode(&self) -> ApiMode {
        ApiMode::Rest
    }

    async fn fetch(&self, login: &str, window: &DateWindow) -> Result<ActivityData, FetchError> {
        match self.fetch_with(login, window, self.token.as_deref()).await {
            Err(FetchError::AuthRequired { message }) if self.token.is_some() => {
                tracing::warn!(%message, "token rejected, retrying without authentication");
                self.fetch_with(login, window, None).await
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use chrono::NaiveDate;

    const BASE: &str = "https://api.test";

    fn window() -> DateWindow {
        DateWindow::for_year(2024, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()).unwrap()
    }

    fn options() -> SourceOptions {
        SourceOptions {
            api_url: BASE.to_string(),
            ..SourceOptions::default()
        }
    }

    fn mock_user(http: &MockHttpClient) {
        http.set_response(
            &format!("{}/users/octocat", BASE),
            MockResponse::json(
                200,
                r#"{"login":"octocat","name":"The Octocat","public_repos":2,"followers":10,"following":1}"#,
            ),
        );
        http.set_response(
            &format!("{}/users/octocat/repos", BASE),
            MockResponse::json(
                200,
                r#"[
                    {"name":"hello","full_name":"octocat/hello","stargazers_count":5,"fork":false,"pushed_at":"2024-01-05T10:00:00Z","language":"Rust"},
                    {"name":"forked","full_name":"octocat/forked","fork":true,"pushed_at":"2024-01-06T10:00:00Z"}
                ]"#,
            ),
        );
        http.set_response(
            &format!("{}/repos/octocat/hello/languages", BASE),
            MockResponse::json(200, r#"{"Rust":1000,"Shell":24}"#),
        );
        http.set_response(
            &format!("{}/repos/octocat/hello/commits", BASE),
            MockResponse::json(
                200,
                r#"[
                    {"commit":{"author":{"date":"2024-01-02T23:15:00Z"}}},
                    {"commit":{"author":null,"committer":{"date":"2024-01-03T08:00:00Z"}}}
                ]"#,
            ),
        );
        http.set_response(
            &format!("{}/search/issues", BASE),
            MockResponse::json(200, r#"{"total_count":7,"items":[]}"#),
        );
    }

    #[tokio::test]
    async fn test_fetch_assembles_activity() {
        let http = Arc::new(MockHttpClient::new());
        mock_user(&http);
        let source = RestSource::new(http.clone(), None, options());

        let data = source.fetch("octocat", &window()).await.unwrap();

        assert_eq!(data.profile.login, "octocat");
        assert_eq!(data.repositories.len(), 2);
        assert_eq!(data.languages.get("Rust"), Some(&1000));
        assert_eq!(data.commits.len(), 2);
        assert!(data.commits.iter().all(|c| c.repo == "octocat/hello"));
        assert_eq!(data.pull_requests, 7);
        assert_eq!(data.issues, 7);
        assert_eq!(data.calendar.len(), 10);
        assert_eq!(data.calendar[1].count, 1);
        assert_eq!(data.source, ApiMode::Rest);

        // The fork is never inspected.
        assert!(http.requests_to(&format!("{}/repos/octocat/forked", BASE)).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_runs_on_a_spawned_task() {
        let http = Arc::new(MockHttpClient::new());
        mock_user(&http);
        let source: Box<dyn ActivitySource> =
            Box::new(RestSource::new(http, None, options()));

        let data = tokio::spawn(async move { source.fetch("octocat", &window()).await })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(data.commits.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let http = Arc::new(MockHttpClient::new());
        http.set_response(
            &format!("{}/users/ghost", BASE),
            MockResponse::json(404, r#"{"message":"Not Found"}"#),
        );
        let source = RestSource::new(http, None, options());

        let err = source.fetch("ghost", &window()).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::NotFound {
                login: "ghost".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_rejected_token_falls_back_to_anonymous() {
        let http = Arc::new(MockHttpClient::new());
        mock_user(&http);
        http.push_response(
            &format!("{}/users/octocat", BASE),
            MockResponse::json(401, r#"{"message":"Bad credentials"}"#),
        );
        let source = RestSource::new(http.clone(), Some("stale".to_string()), options());

        let data = source.fetch("octocat", &window()).await.unwrap();
        assert_eq!(data.profile.login, "octocat");

        let profile_requests = http.requests_to(&format!("{}/users/octocat", BASE));
        assert!(profile_requests[0].headers.contains_key("Authorization"));
        let retried = profile_requests
            .iter()
            .skip(1)
            .find(|r| r.url == format!("{}/users/octocat", BASE))
            .unwrap();
        assert!(!retried.headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn test_rate_limit_propagates() {
        let http = Arc::new(MockHttpClient::new());
        http.set_response(
            &format!("{}/users/octocat", BASE),
            MockResponse::with_headers(
                403,
                &[("x-ratelimit-remaining", "0"), ("x-ratelimit-reset", "1700000000")],
                r#"{"message":"API rate limit exceeded"}"#,
            ),
        );
        let source = RestSource::new(http, None, options());

        let err = source.fetch("octocat", &window()).await.unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_empty_repository_has_no_commits() {
        let http = Arc::new(MockHttpClient::new());
        mock_user(&http);
        http.set_response(
            &format!("{}/repos/octocat/hello/commits", BASE),
            MockResponse::json(409, r#"{"message":"Git Repository is empty."}"#),
        );
        let source = RestSource::new(http, None, options());

        let data = source.fetch("octocat", &window()).await.unwrap();
        assert!(data.commits.is_empty());
        assert!(data.calendar.iter().all(|d| d.count == 0));
    }

    #[tokio::test]
    async fn test_repository_pages_stop_at_cap() {
        let http = Arc::new(MockHttpClient::new());
        mock_user(&http);
        let full_page: Vec<serde_json::Value> = (0..PER_PAGE)
            .map(|i| {
                serde_json::json!({
                    "name": format!("r{}", i),
                    "full_name": format!("octocat/r{}", i),
                    "fork": true
                })
            })
            .collect();
        http.set_response(
            &format!("{}/users/octocat/repos", BASE),
            MockResponse::json(200, &serde_json::to_string(&full_page).unwrap()),
        );
        let source = RestSource::new(
            http.clone(),
            None,
            SourceOptions {
                page_cap: 2,
                ..options()
            },
        );

        let data = source.fetch("octocat", &window()).await.unwrap();
        assert_eq!(data.repositories.len(), 2 * PER_PAGE);
        assert_eq!(
            http.requests_to(&format!("{}/users/octocat/repos", BASE)).len(),
            2
        );
    }
}

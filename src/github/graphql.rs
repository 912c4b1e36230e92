//! GraphQL v4 strategy: one query for profile, repositories, languages,
//! commit history and the contribution calendar.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::status::{check_status, rate_limit_reset};
use super::{request_headers, select_repositories, ActivitySource, SourceOptions};
use crate::error::FetchError;
use crate::models::{
    fill_calendar, ActivityData, ApiMode, CommitRecord, DateWindow, Repository, UserProfile,
};
use crate::traits::HttpClient;

const WRAPPED_QUERY: &str = r#"
query Wrapped($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    login
    name
    avatarUrl
    bio
    createdAt
    followers { totalCount }
    following { totalCount }
    repositories(ownerAffiliations: OWNER, first: 100, orderBy: {field: PUSHED_AT, direction: DESC}) {
      totalCount
      nodes {
        name
        nameWithOwner
        description
        stargazerCount
        forkCount
        isFork
        createdAt
        pushedAt
        primaryLanguage { name }
        languages(first: 10, orderBy: {field: SIZE, direction: DESC}) {
          edges { size node { name } }
        }
        defaultBranchRef {
          target {
            ... on Commit {
              history(first: 100, since: $from, until: $to) {
                nodes { committedDate author { user { login } } }
              }
            }
          }
        }
      }
    }
    contributionsCollection(from: $from, to: $to) {
      totalPullRequestContributions
      totalIssueContributions
      contributionCalendar {
        weeks { contributionDays { date contributionCount } }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GqlEnvelope {
    #[serde(default)]
    data: Option<GqlData>,
    #[serde(default)]
    errors: Vec<GqlError>,
}

#[derive(Debug, Deserialize)]
struct GqlError {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct GqlData {
    user: Option<GqlUser>,
}

#[derive(Debug, Deserialize)]
struct Count {
    #[serde(rename = "totalCount")]
    total_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlUser {
    login: String,
    name: Option<String>,
    avatar_url: Option<String>,
    bio: Option<String>,
    created_at: Option<DateTime<Utc>>,
    followers: Count,
    following: Count,
    repositories: GqlRepositories,
    contributions_collection: GqlContributions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlRepositories {
    total_count: u32,
    #[serde(default)]
    nodes: Vec<GqlRepo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlRepo {
    name: String,
    name_with_owner: String,
    description: Option<String>,
    #[serde(default)]
    stargazer_count: u32,
    #[serde(default)]
    fork_count: u32,
    #[serde(default)]
    is_fork: bool,
    created_at: Option<DateTime<Utc>>,
    pushed_at: Option<DateTime<Utc>>,
    primary_language: Option<Named>,
    languages: Option<GqlLanguages>,
    default_branch_ref: Option<GqlBranch>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GqlLanguages {
    #[serde(default)]
    edges: Vec<GqlLanguageEdge>,
}

#[derive(Debug, Deserialize)]
struct GqlLanguageEdge {
    size: u64,
    node: Named,
}

#[derive(Debug, Deserialize)]
struct GqlBranch {
    target: Option<GqlTarget>,
}

/// Non-commit targets (tags) deserialize with no history.
#[derive(Debug, Deserialize)]
struct GqlTarget {
    #[serde(default)]
    history: Option<GqlHistory>,
}

#[derive(Debug, Deserialize)]
struct GqlHistory {
    #[serde(default)]
    nodes: Vec<GqlCommit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlCommit {
    committed_date: DateTime<Utc>,
    author: Option<GqlAuthor>,
}

#[derive(Debug, Deserialize)]
struct GqlAuthor {
    user: Option<Login>,
}

#[derive(Debug, Deserialize)]
struct Login {
    login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlContributions {
    total_pull_request_contributions: u32,
    total_issue_contributions: u32,
    contribution_calendar: GqlCalendar,
}

#[derive(Debug, Deserialize)]
struct GqlCalendar {
    #[serde(default)]
    weeks: Vec<GqlWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlWeek {
    #[serde(default)]
    contribution_days: Vec<GqlDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlDay {
    date: NaiveDate,
    contribution_count: u32,
}

impl GqlRepo {
    fn to_repository(&self) -> Repository {
        Repository {
            name: self.name.clone(),
            full_name: self.name_with_owner.clone(),
            description: self.description.clone(),
            stars: self.stargazer_count,
            forks: self.fork_count,
            primary_language: self.primary_language.as_ref().map(|l| l.name.clone()),
            is_fork: self.is_fork,
            created_at: self.created_at,
            pushed_at: self.pushed_at,
        }
    }

    fn history(&self) -> &[GqlCommit] {
        self.default_branch_ref
            .as_ref()
            .and_then(|b| b.target.as_ref())
            .and_then(|t| t.history.as_ref())
            .map(|h| h.nodes.as_slice())
            .unwrap_or(&[])
    }
}

impl GqlCommit {
    fn authored_by(&self, login: &str) -> bool {
        self.author
            .as_ref()
            .and_then(|a| a.user.as_ref())
            .is_some_and(|u| u.login.eq_ignore_ascii_case(login))
    }
}

/// Single-query GraphQL strategy. Requires a token.
pub struct GraphQlSource<C: HttpClient> {
    http: Arc<C>,
    token: Option<String>,
    options: SourceOptions,
}

impl<C: HttpClient> GraphQlSource<C> {
    pub fn new(http: Arc<C>, token: Option<String>, options: SourceOptions) -> Self {
        Self {
            http,
            token,
            options,
        }
    }

    fn assemble(&self, user: GqlUser, login: &str, window: &DateWindow) -> ActivityData {
        let repositories: Vec<Repository> = user
            .repositories
            .nodes
            .iter()
            .map(GqlRepo::to_repository)
            .collect();

        let inspected: Vec<&str> =
            select_repositories(&repositories, window, self.options.repo_limit)
                .into_iter()
                .map(|r| r.full_name.as_str())
                .collect();

        let mut languages = BTreeMap::new();
        let mut commits = Vec::new();
        for node in &user.repositories.nodes {
            if !inspected.contains(&node.name_with_owner.as_str()) {
                continue;
            }
            for edge in node.languages.iter().flat_map(|l| &l.edges) {
                *languages.entry(edge.node.name.clone()).or_insert(0) += edge.size;
            }
            commits.extend(
                node.history()
                    .iter()
                    .filter(|c| c.authored_by(login))
                    .filter(|c| window.contains(c.committed_date.date_naive()))
                    .map(|c| CommitRecord::new(c.committed_date, node.name_with_owner.clone())),
            );
        }
        commits.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        let contributions = user.contributions_collection;
        let counts: BTreeMap<NaiveDate, u32> = contributions
            .contribution_calendar
            .weeks
            .iter()
            .flat_map(|w| &w.contribution_days)
            .filter(|d| window.contains(d.date))
            .map(|d| (d.date, d.contribution_count))
            .collect();

        ActivityData {
            profile: UserProfile {
                login: user.login,
                name: user.name,
                avatar_url: user.avatar_url,
                bio: user.bio,
                public_repos: user.repositories.total_count,
                followers: user.followers.total_count,
                following: user.following.total_count,
                created_at: user.created_at,
            },
            repositories,
            languages,
            commits,
            pull_requests: contributions.total_pull_request_contributions,
            issues: contributions.total_issue_contributions,
            calendar: fill_calendar(&counts, window),
            window: *window,
            source: ApiMode::GraphQl,
        }
    }
}

#[async_trait]
impl<C: HttpClient> ActivitySource for GraphQlSource<C> {
    fn mode(&self) -> ApiMode {
        ApiMode::GraphQl
    }

    async fn fetch(&self, login: &str, window: &DateWindow) -> Result<ActivityData, FetchError> {
        let Some(token) = self.token.as_deref() else {
            return Err(FetchError::AuthRequired {
                message: "the GraphQL API requires a token".to_string(),
            });
        };

        let body = json!({
            "query": WRAPPED_QUERY,
            "variables": {
                "login": login,
                "from": window.since_timestamp(),
                "to": window.until_timestamp(),
            }
        })
        .to_string();

        let mut headers = request_headers(Some(token));
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        tracing::debug!(url = %self.options.graphql_url, login, "POST graphql");
        let response = self
            .http
            .post(&self.options.graphql_url, &body, &headers)
            .await?;
        check_status(&response, login)?;

        let envelope: GqlEnvelope = response.json()?;
        let user = envelope.data.and_then(|d| d.user);

        if !envelope.errors.is_empty() {
            let kinds: Vec<&str> = envelope
                .errors
                .iter()
                .filter_map(|e| e.kind.as_deref())
                .collect();
            if kinds.contains(&"RATE_LIMITED") {
                return Err(FetchError::RateLimited {
                    reset_at: rate_limit_reset(&response),
                });
            }
            if kinds.contains(&"NOT_FOUND") {
                return Err(FetchError::NotFound {
                    login: login.to_string(),
                });
            }
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            if user.is_none() {
                return Err(FetchError::GraphQl { messages });
            }
            tracing::warn!(?messages, "partial GraphQL response");
        }

        let user = user.ok_or_else(|| FetchError::NotFound {
            login: login.to_string(),
        })?;
        Ok(self.assemble(user, login, window))
    }
}

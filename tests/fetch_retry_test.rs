//! Rate-limit recovery and transient retries, end to end over HTTP.

mod common;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use ghwrapped::adapters::ReqwestHttpClient;
use ghwrapped::auth::TokenSource;
use ghwrapped::config::{RunMode, Settings};
use ghwrapped::models::ApiMode;
use ghwrapped::startup::{fetch_with_retry, RetryPolicy, TokenPrompt};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{graphql_user, options_for, rest_user, utc, window_2024};

/// Answers prompts from a script and remembers how often it was asked.
struct ScriptedPrompt {
    answers: Vec<Option<String>>,
    asked: usize,
}

impl ScriptedPrompt {
    fn new(answers: &[Option<&str>]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
            asked: 0,
        }
    }
}

impl TokenPrompt for ScriptedPrompt {
    fn prompt_token(&mut self, _reset_at: Option<DateTime<Utc>>) -> Option<String> {
        let answer = self.answers.get(self.asked).cloned().flatten();
        self.asked += 1;
        answer
    }
}

fn settings(server: &MockServer, api_mode: ApiMode) -> Settings {
    Settings {
        username: "octocat".to_string(),
        window: window_2024(),
        token: None,
        token_source: TokenSource::Anonymous,
        api_mode,
        run_mode: RunMode::Summary,
        export_dir: PathBuf::from("."),
        utc_offset: utc(),
        top_n: 5,
        sources: options_for(&server.uri()),
        log_filter: "info".to_string(),
        save_config: false,
    }
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        transient_retries: 2,
        backoff: Duration::from_millis(1),
    }
}

async fn mount_rate_limited_rest(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .set_body_json(json!({"message": "API rate limit exceeded for 203.0.113.7"})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_prompted_token_switches_to_graphql() {
    let server = MockServer::start().await;
    mount_rate_limited_rest(&server).await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer ghp_fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_user()))
        .expect(1)
        .mount(&server)
        .await;

    let mut prompt = ScriptedPrompt::new(&[Some("  ghp_fresh \n")]);
    let outcome = fetch_with_retry(
        Arc::new(ReqwestHttpClient::new()),
        &settings(&server, ApiMode::Auto),
        &mut prompt,
        fast_policy(),
    )
    .await
    .expect("retry with the new token should succeed");

    assert_eq!(prompt.asked, 1);
    assert_eq!(outcome.token.as_deref(), Some("ghp_fresh"));
    assert_eq!(outcome.token_source, TokenSource::Prompt);
    assert_eq!(outcome.data.source, ApiMode::GraphQl);
}

#[tokio::test]
async fn test_declined_prompt_gives_up() {
    let server = MockServer::start().await;
    mount_rate_limited_rest(&server).await;

    let mut prompt = ScriptedPrompt::new(&[Some("   ")]);
    let err = fetch_with_retry(
        Arc::new(ReqwestHttpClient::new()),
        &settings(&server, ApiMode::Rest),
        &mut prompt,
        fast_policy(),
    )
    .await
    .unwrap_err();

    assert_eq!(prompt.asked, 1);
    assert_eq!(err.error_code(), "FETCH_RATE_LIMITED");
}

#[tokio::test]
async fn test_server_errors_are_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let mut prompt = ScriptedPrompt::new(&[]);
    let err = fetch_with_retry(
        Arc::new(ReqwestHttpClient::new()),
        &settings(&server, ApiMode::Rest),
        &mut prompt,
        fast_policy(),
    )
    .await
    .unwrap_err();

    assert_eq!(prompt.asked, 0);
    assert!(err.to_string().contains("503"), "{}", err);
}

#[tokio::test]
async fn test_transient_failure_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rest_user()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_count": 1})))
        .mount(&server)
        .await;

    let mut prompt = ScriptedPrompt::new(&[]);
    let outcome = fetch_with_retry(
        Arc::new(ReqwestHttpClient::new()),
        &settings(&server, ApiMode::Rest),
        &mut prompt,
        fast_policy(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.token_source, TokenSource::Anonymous);
    assert_eq!(outcome.data.pull_requests, 1);
    assert_eq!(outcome.data.issues, 1);
}

//! Fetching with recovery.
//!
//! A rate-limited fetch asks the user for a token and starts over with a
//! freshly built source. Transient network and server failures are retried
//! a couple of times with a linear backoff.

use chrono::{DateTime, Local, Utc};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use crate::auth::TokenSource;
use crate::cli_output::print_warning_line;
use crate::config::Settings;
use crate::error::{FetchError, WrappedResult};
use crate::github::build_source;
use crate::models::ActivityData;
use crate::traits::HttpClient;

/// Asks for a token after the rate limit was hit.
pub trait TokenPrompt {
    /// `None` or a blank answer gives up.
    fn prompt_token(&mut self, reset_at: Option<DateTime<Utc>>) -> Option<String>;
}

/// Hidden-input prompt on the controlling terminal.
pub struct TerminalTokenPrompt;

impl TokenPrompt for TerminalTokenPrompt {
    fn prompt_token(&mut self, reset_at: Option<DateTime<Utc>>) -> Option<String> {
        let when = reset_at
            .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "later".to_string());
        print_warning_line(&format!("GitHub rate limit reached (resets {}).", when));
        eprintln!("    A personal access token raises the limit.");
        eprint!("  GitHub token (leave empty to give up): ");
        io::stderr().flush().ok()?;
        rpassword::read_password().ok()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after a retryable (network/server) failure
    pub transient_retries: u32,
    /// Multiplied by the attempt number
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            transient_retries: 2,
            backoff: Duration::from_millis(750),
        }
    }
}

/// Activity plus the token that finally worked.
#[derive(Debug)]
pub struct FetchOutcome {
    pub data: ActivityData,
    pub token: Option<String>,
    pub token_source: TokenSource,
}

/// Fetch activity for the configured user, recovering from rate limits via
/// `prompt` and from transient failures per `policy`.
pub async fn fetch_with_retry<C, P>(
    http: Arc<C>,
    settings: &Settings,
    prompt: &mut P,
    policy: RetryPolicy,
) -> WrappedResult<FetchOutcome>
where
    C: HttpClient + 'static,
    P: TokenPrompt + ?Sized,
{
    let mut token = settings.token.clone();
    let mut token_source = settings.token_source;
    let mut transient_failures = 0u32;

    loop {
        let source = build_source(
            http.clone(),
            settings.api_mode,
            token.clone(),
            settings.sources.clone(),
        );
        tracing::info!(
            login = %settings.username,
            year = settings.window.year,
            mode = %source.mode(),
            %token_source,
            "fetching activity"
        );

        match source.fetch(&settings.username, &settings.window).await {
            Ok(data) => {
                return Ok(FetchOutcome {
                    data,
                    token,
                    token_source,
                })
            }
            Err(FetchError::RateLimited { reset_at }) => {
                tracing::warn!(?reset_at, "rate limited");
                let answer = prompt
                    .prompt_token(reset_at)
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty());
                match answer {
                    Some(new_token) => {
                        token = Some(new_token);
                        token_source = TokenSource::Prompt;
                        transient_failures = 0;
                    }
                    None => return Err(FetchError::RateLimited { reset_at }.into()),
                }
            }
            Err(err) if err.is_retryable() && transient_failures < policy.transient_retries => {
                transient_failures += 1;
                tracing::warn!(error = %err, attempt = transient_failures, "transient failure, retrying");
                tokio::time::sleep(policy.backoff * transient_failures).await;
            }
            Err(err) => {
                tracing::error!(error = %err, code = err.error_code(), "fetch failed");
                return Err(err.into());
            }
        }
    }
}

//! Mapping of raw GitHub responses onto [`FetchError`].

use chrono::{DateTime, TimeZone, Utc};

use crate::error::FetchError;
use crate::traits::Response;

const SNIPPET_LEN: usize = 200;

/// Reset time from the `x-ratelimit-reset` header (epoch seconds).
pub fn rate_limit_reset(response: &Response) -> Option<DateTime<Utc>> {
    response
        .header("x-ratelimit-reset")
        .and_then(|value| value.trim().parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

fn is_rate_limited(response: &Response) -> bool {
    if response.status == 429 {
        return true;
    }
    if response.status != 403 {
        return false;
    }
    if response.header("x-ratelimit-remaining").map(str::trim) == Some("0") {
        return true;
    }
    response
        .text_snippet(SNIPPET_LEN * 2)
        .to_lowercase()
        .contains("rate limit")
}

/// Extract GitHub's `{"message": ...}` from an error body when present.
fn error_message(response: &Response) -> String {
    response
        .json::<serde_json::Value>()
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| response.text_snippet(SNIPPET_LEN))
}

/// Classify a response. `Ok(())` for 2xx, the matching error otherwise.
///
/// `login` names the user in `NotFound`.
pub fn check_status(response: &Response, login: &str) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    if is_rate_limited(response) {
        return Err(FetchError::RateLimited {
            reset_at: rate_limit_reset(response),
        });
    }
    match response.status {
        404 => Err(FetchError::NotFound {
            login: login.to_string(),
        }),
        401 => Err(FetchError::AuthRequired {
            message: error_message(response),
        }),
        status => Err(FetchError::Http {
            status,
            message: error_message(response),
        }),
    }
}

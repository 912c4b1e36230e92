//! Errors raised while fetching activity from GitHub.
//!
//! Each variant maps to a distinct user-facing message. Status mapping from
//! raw responses lives in `crate::github::status`.

use chrono::{DateTime, Local, Utc};
use std::fmt;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Fetch-layer error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The user does not exist.
    NotFound { login: String },

    /// The request needs (valid) credentials.
    AuthRequired { message: String },

    /// The API quota is exhausted.
    RateLimited { reset_at: Option<DateTime<Utc>> },

    /// Any other non-2xx status.
    Http { status: u16, message: String },

    /// Transport failure before a status was received.
    Network { message: String },

    /// The body could not be decoded.
    InvalidResponse { message: String },

    /// GraphQL returned errors that map to nothing more specific.
    GraphQl { messages: Vec<String> },
}

impl FetchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FetchError::NotFound { .. } => ErrorCategory::NotFound,
            FetchError::AuthRequired { .. } => ErrorCategory::Auth,
            FetchError::RateLimited { .. } => ErrorCategory::RateLimit,
            FetchError::Http { status, .. } if *status >= 500 => ErrorCategory::Server,
            FetchError::Http { .. } => ErrorCategory::User,
            FetchError::Network { .. } => ErrorCategory::Network,
            FetchError::InvalidResponse { .. } | FetchError::GraphQl { .. } => {
                ErrorCategory::Server
            }
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::NotFound { login } => {
                format!("GitHub user '{}' was not found.", login)
            }
            FetchError::AuthRequired { message } => {
                format!("Authentication required: {}", message)
            }
            FetchError::RateLimited { reset_at: Some(reset) } => format!(
                "GitHub API rate limit exceeded. It resets at {}.",
                reset.with_timezone(&Local).format("%H:%M:%S")
            ),
            FetchError::RateLimited { reset_at: None } => {
                "GitHub API rate limit exceeded.".to_string()
            }
            FetchError::Http { status, .. } => match *status {
                500..=599 => "GitHub is experiencing issues. Please try again later.".to_string(),
                _ => format!("GitHub returned an error (HTTP {}).", status),
            },
            FetchError::Network { .. } => {
                "Unable to reach GitHub. Please check your internet connection.".to_string()
            }
            FetchError::InvalidResponse { .. } => {
                "Received an unexpected response from GitHub.".to_string()
            }
            FetchError::GraphQl { messages } => match messages.first() {
                Some(first) => format!("GitHub GraphQL error: {}", first),
                None => "GitHub GraphQL error.".to_string(),
            },
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::NotFound { .. } => "FETCH_NOT_FOUND",
            FetchError::AuthRequired { .. } => "FETCH_AUTH_REQUIRED",
            FetchError::RateLimited { .. } => "FETCH_RATE_LIMITED",
            FetchError::Http { .. } => "FETCH_HTTP_STATUS",
            FetchError::Network { .. } => "FETCH_NETWORK",
            FetchError::InvalidResponse { .. } => "FETCH_INVALID_RESPONSE",
            FetchError::GraphQl { .. } => "FETCH_GRAPHQL",
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound { login } => write!(f, "user not found: {}", login),
            FetchError::AuthRequired { message } => write!(f, "authentication required: {}", message),
            FetchError::RateLimited { reset_at } => match reset_at {
                Some(reset) => write!(f, "rate limited until {}", reset.to_rfc3339()),
                None => write!(f, "rate limited"),
            },
            FetchError::Http { status, message } => write!(f, "HTTP {}: {}", status, message),
            FetchError::Network { message } => write!(f, "network error: {}", message),
            FetchError::InvalidResponse { message } => write!(f, "invalid response: {}", message),
            FetchError::GraphQl { messages } => write!(f, "graphql errors: {}", messages.join("; ")),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        FetchError::Network {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::InvalidResponse {
            message: err.to_string(),
        }
    }
}

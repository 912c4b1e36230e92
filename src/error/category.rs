//! Error category classification for unified error handling.
//!
//! Categories drive retry decisions and the hint printed under an error.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout. Generally transient.
    Network,

    /// Missing or rejected credentials.
    Auth,

    /// The API quota is exhausted until a reset time.
    RateLimit,

    /// The requested user does not exist.
    NotFound,

    /// GitHub-side failures (5xx, malformed payloads).
    Server,

    /// User action required (invalid input).
    User,

    /// Filesystem, clipboard, browser.
    System,

    /// Missing settings or an invalid config file.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::RateLimit => "rate_limit",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Server => "server",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Auth => {
                "Pass --token, set GITHUB_TOKEN, or run `gh auth login`"
            }
            ErrorCategory::RateLimit => {
                "Authenticated requests get a much higher limit: pass --token or set GITHUB_TOKEN"
            }
            ErrorCategory::NotFound => "Check the spelling of the username",
            ErrorCategory::Server => "GitHub may be having issues. Please try again later",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Check ~/.ghwrapped/config.json and your flags",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

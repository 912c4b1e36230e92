//! Unified error handling.
//!
//! - **Error categories** decide retry policy and the hint shown to the user
//! - **`FetchError`** covers everything the GitHub layer can report
//! - **`WrappedError`** unifies fetch, config, export and share failures
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, DNS, timeout | Yes |
//! | Server | GitHub 5xx, bad payloads | Yes |
//! | Auth | Missing or rejected token | No |
//! | RateLimit | Quota exhausted | No (prompt for a token) |
//! | NotFound | Unknown user | No |
//! | System | Filesystem, clipboard, browser | No |
//! | Configuration | Flags or config file | No |

mod category;
mod fetch;
mod wrapped_error;

pub use category::ErrorCategory;
pub use fetch::FetchError;
pub use wrapped_error::WrappedError;

/// Result alias used by the application layers.
pub type WrappedResult<T> = Result<T, WrappedError>;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::export::ExportError;
    use std::path::PathBuf;

    #[test]
    fn test_error_unification() {
        let fetch: WrappedError = FetchError::NotFound {
            login: "ghost".to_string(),
        }
        .into();
        let config: WrappedError = ConfigError::MissingUsername.into();
        let export: WrappedError = ExportError::Write {
            path: PathBuf::from("/nope/card.png"),
            message: "denied".to_string(),
        }
        .into();
        let io: WrappedError = std::io::Error::new(std::io::ErrorKind::Other, "tty").into();

        assert_eq!(fetch.category(), ErrorCategory::NotFound);
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(export.category(), ErrorCategory::System);
        assert_eq!(io.category(), ErrorCategory::System);

        for err in [&fetch, &config, &export, &io] {
            assert!(!err.user_message().is_empty());
            assert!(!err.error_code().is_empty());
        }
    }

    #[test]
    fn test_report_includes_hint() {
        let err: WrappedError = FetchError::RateLimited { reset_at: None }.into();
        let report = err.report();
        assert!(report.contains("rate limit"));
        assert!(report.contains("hint:"));
        assert!(report.contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_retry_follows_category() {
        let network: WrappedError = FetchError::Network {
            message: "reset".to_string(),
        }
        .into();
        let auth: WrappedError = FetchError::AuthRequired {
            message: "token".to_string(),
        }
        .into();
        assert!(network.is_retryable());
        assert!(!auth.is_retryable());
    }
}

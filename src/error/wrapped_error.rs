//! Unified error type for the application.
//!
//! `WrappedError` gathers the domain errors so the binary can categorize
//! them and print one consistent message.

use std::fmt;

use super::category::ErrorCategory;
use super::fetch::FetchError;
use crate::config::ConfigError;
use crate::export::ExportError;
use crate::share::ShareError;

#[derive(Debug)]
pub enum WrappedError {
    /// Fetching activity from GitHub failed.
    Fetch(FetchError),

    /// Settings could not be resolved.
    Config(ConfigError),

    /// Writing the card image failed.
    Export(ExportError),

    /// Opening the browser or clipboard failed.
    Share(ShareError),

    /// Terminal or stdout I/O failed.
    Io(std::io::Error),
}

impl WrappedError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            WrappedError::Fetch(err) => err.category(),
            WrappedError::Config(_) => ErrorCategory::Configuration,
            WrappedError::Export(_) | WrappedError::Share(_) | WrappedError::Io(_) => {
                ErrorCategory::System
            }
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            WrappedError::Fetch(err) => err.user_message(),
            WrappedError::Config(err) => err.to_string(),
            WrappedError::Export(err) => format!("Could not export the card: {}", err),
            WrappedError::Share(err) => format!("Could not share: {}", err),
            WrappedError::Io(err) => format!("Terminal I/O failed: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            WrappedError::Fetch(err) => err.error_code(),
            WrappedError::Config(_) => "CONFIG",
            WrappedError::Export(_) => "EXPORT",
            WrappedError::Share(_) => "SHARE",
            WrappedError::Io(_) => "IO",
        }
    }

    /// Message plus the category's recovery hint, for the terminal.
    pub fn report(&self) -> String {
        format!(
            "{}\n  hint: {}",
            self.user_message(),
            self.category().recovery_hint()
        )
    }
}

impl fmt::Display for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrappedError::Fetch(err) => write!(f, "{}", err),
            WrappedError::Config(err) => write!(f, "{}", err),
            WrappedError::Export(err) => write!(f, "{}", err),
            WrappedError::Share(err) => write!(f, "{}", err),
            WrappedError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for WrappedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WrappedError::Fetch(err) => Some(err),
            WrappedError::Config(err) => Some(err),
            WrappedError::Export(err) => Some(err),
            WrappedError::Share(err) => Some(err),
            WrappedError::Io(err) => Some(err),
        }
    }
}

impl From<FetchError> for WrappedError {
    fn from(err: FetchError) -> Self {
        WrappedError::Fetch(err)
    }
}

impl From<ConfigError> for WrappedError {
    fn from(err: ConfigError) -> Self {
        WrappedError::Config(err)
    }
}

impl From<ExportError> for WrappedError {
    fn from(err: ExportError) -> Self {
        WrappedError::Export(err)
    }
}

impl From<ShareError> for WrappedError {
    fn from(err: ShareError) -> Self {
        WrappedError::Share(err)
    }
}

impl From<std::io::Error> for WrappedError {
    fn from(err: std::io::Error) -> Self {
        WrappedError::Io(err)
    }
}

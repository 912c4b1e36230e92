//! Startup work that happens before the TUI takes over the terminal.
//!
//! - [`fetch`] - fetching with the rate-limit token prompt and transient retries

pub mod fetch;

pub use fetch::{fetch_with_retry, FetchOutcome, RetryPolicy, TerminalTokenPrompt, TokenPrompt};

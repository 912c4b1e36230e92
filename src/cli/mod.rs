//! CLI module.
//!
//! Argument parsing happens before anything else in `main`; the parsed
//! [`Args`] feed [`crate::config::Settings::resolve`].

pub mod args;

pub use args::Args;

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

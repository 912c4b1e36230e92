//! ghwrapped - a GitHub year in review for the terminal
//!
//! This library exposes modules for use in integration tests and benches.

pub mod adapters;
pub mod app;
pub mod auth;
pub mod cli;
pub mod cli_output;
pub mod config;
pub mod error;
pub mod export;
pub mod github;
pub mod logging;
pub mod models;
pub mod share;
pub mod startup;
pub mod stats;
pub mod terminal;
pub mod traits;
pub mod ui;

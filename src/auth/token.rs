//! GitHub token discovery.
//!
//! Order: `--token`, `GITHUB_TOKEN`, `GH_TOKEN`, the config file, then
//! `gh auth token` when the GitHub CLI is installed.

use std::fmt;
use std::process::{Command, Stdio};

pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const GH_TOKEN_ENV: &str = "GH_TOKEN";

/// Where the token in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Cli,
    Env,
    ConfigFile,
    GhCli,
    /// Typed in after hitting the rate limit
    Prompt,
    Anonymous,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenSource::Cli => "--token",
            TokenSource::Env => "environment",
            TokenSource::ConfigFile => "config file",
            TokenSource::GhCli => "gh auth token",
            TokenSource::Prompt => "prompt",
            TokenSource::Anonymous => "none",
        };
        write!(f, "{}", name)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// First token found along the chain. `gh` is only consulted when nothing
/// earlier produced one.
pub fn resolve_token(
    cli: Option<&str>,
    env: &dyn Fn(&str) -> Option<String>,
    file: Option<&str>,
    gh: &dyn Fn() -> Option<String>,
) -> (Option<String>, TokenSource) {
    if let Some(token) = non_empty(cli.map(str::to_string)) {
        return (Some(token), TokenSource::Cli);
    }
    for key in [GITHUB_TOKEN_ENV, GH_TOKEN_ENV] {
        if let Some(token) = non_empty(env(key)) {
            return (Some(token), TokenSource::Env);
        }
    }
    if let Some(token) = non_empty(file.map(str::to_string)) {
        return (Some(token), TokenSource::ConfigFile);
    }
    if let Some(token) = non_empty(gh()) {
        return (Some(token), TokenSource::GhCli);
    }
    (None, TokenSource::Anonymous)
}

/// Token from `gh auth token`, if the GitHub CLI is installed and logged in.
pub fn gh_auth_token() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!(status = ?output.status, "gh auth token failed");
        return None;
    }
    non_empty(String::from_utf8(output.stdout).ok())
}

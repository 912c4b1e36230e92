//! Settings resolution against the real process environment and a config
//! file on disk.
//!
//! Tests that touch environment variables are `#[serial]` since the
//! environment is process-wide.

use std::path::PathBuf;

use chrono::{FixedOffset, NaiveDate};
use clap::Parser;
use ghwrapped::auth::token::{GH_TOKEN_ENV, GITHUB_TOKEN_ENV};
use ghwrapped::auth::TokenSource;
use ghwrapped::cli::Args;
use ghwrapped::config::{
    ConfigError, ConfigManager, Environment, FileConfig, RunMode, Settings, API_URL_ENV,
    GRAPHQL_URL_ENV, LOG_ENV,
};
use ghwrapped::export::ExportFormat;
use ghwrapped::models::ApiMode;
use serial_test::serial;
use tempfile::TempDir;

fn args(argv: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("ghwrapped").chain(argv.iter().copied())).unwrap()
}

fn process_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn no_gh() -> Option<String> {
    None
}

fn resolve(args: &Args, file: &FileConfig) -> Result<Settings, ConfigError> {
    let env = Environment {
        var: &process_var,
        gh_token: &no_gh,
        today: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        local_offset: FixedOffset::east_opt(2 * 3600).unwrap(),
    };
    Settings::resolve(args, file, &env)
}

/// Clears every variable the resolver reads, restoring them on drop.
struct CleanEnv {
    saved: Vec<(&'static str, Option<String>)>,
}

impl CleanEnv {
    fn new() -> Self {
        let names = [
            GITHUB_TOKEN_ENV,
            GH_TOKEN_ENV,
            API_URL_ENV,
            GRAPHQL_URL_ENV,
            LOG_ENV,
        ];
        let saved = names
            .iter()
            .map(|&name| (name, std::env::var(name).ok()))
            .collect();
        for name in names {
            std::env::remove_var(name);
        }
        Self { saved }
    }
}

impl Drop for CleanEnv {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

#[test]
#[serial]
fn test_environment_token_beats_config_file() {
    let _env = CleanEnv::new();
    std::env::set_var(GH_TOKEN_ENV, "from-env");

    let file = FileConfig {
        token: Some("from-file".to_string()),
        ..Default::default()
    };
    let settings = resolve(&args(&["octocat"]), &file).unwrap();
    assert_eq!(settings.token.as_deref(), Some("from-env"));
    assert_eq!(settings.token_source, TokenSource::Env);

    let settings = resolve(&args(&["octocat", "--token", "from-flag"]), &file).unwrap();
    assert_eq!(settings.token.as_deref(), Some("from-flag"));
    assert_eq!(settings.token_source, TokenSource::Cli);
}

#[test]
#[serial]
fn test_github_token_preferred_over_gh_token() {
    let _env = CleanEnv::new();
    std::env::set_var(GITHUB_TOKEN_ENV, "github");
    std::env::set_var(GH_TOKEN_ENV, "gh");

    let settings = resolve(&args(&["octocat"]), &FileConfig::default()).unwrap();
    assert_eq!(settings.token.as_deref(), Some("github"));
}

#[test]
#[serial]
fn test_api_urls_from_environment() {
    let _env = CleanEnv::new();
    std::env::set_var(API_URL_ENV, "http://127.0.0.1:9999");
    std::env::set_var(GRAPHQL_URL_ENV, "http://127.0.0.1:9999/graphql");
    std::env::set_var(LOG_ENV, "ghwrapped=trace");

    let settings = resolve(&args(&["octocat"]), &FileConfig::default()).unwrap();
    assert_eq!(settings.sources.api_url, "http://127.0.0.1:9999");
    assert_eq!(settings.sources.graphql_url, "http://127.0.0.1:9999/graphql");
    assert_eq!(settings.log_filter, "ghwrapped=trace");
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    let _env = CleanEnv::new();

    let settings = resolve(&args(&["@octocat"]), &FileConfig::default()).unwrap();
    assert_eq!(settings.username, "octocat");
    assert_eq!(settings.window.year, 2024);
    assert_eq!(settings.window.to, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    assert_eq!(settings.token, None);
    assert_eq!(settings.token_source, TokenSource::Anonymous);
    assert_eq!(settings.api_mode, ApiMode::Auto);
    assert_eq!(settings.run_mode, RunMode::Tui);
    assert_eq!(settings.utc_offset, FixedOffset::east_opt(2 * 3600).unwrap());
    assert_eq!(settings.sources.api_url, "https://api.github.com");
    assert_eq!(settings.log_filter, "info");
}

#[test]
#[serial]
fn test_config_file_fills_gaps() {
    let _env = CleanEnv::new();
    let file = FileConfig {
        username: Some("hubot".to_string()),
        api: Some(ApiMode::Rest),
        export_dir: Some(PathBuf::from("/tmp/cards")),
        utc_offset: Some("-05:00".to_string()),
        top: Some(3),
        ..Default::default()
    };

    let settings = resolve(&args(&["--export", "svg"]), &file).unwrap();
    assert_eq!(settings.username, "hubot");
    assert_eq!(settings.api_mode, ApiMode::Rest);
    assert_eq!(settings.export_dir, PathBuf::from("/tmp/cards"));
    assert_eq!(settings.utc_offset, FixedOffset::west_opt(5 * 3600).unwrap());
    assert_eq!(settings.top_n, 3);
    assert_eq!(settings.run_mode, RunMode::Export(ExportFormat::Svg));
}

#[test]
#[serial]
fn test_invalid_inputs_are_rejected() {
    let _env = CleanEnv::new();
    let file = FileConfig::default();

    assert_eq!(
        resolve(&args(&[]), &file).unwrap_err(),
        ConfigError::MissingUsername
    );
    assert!(matches!(
        resolve(&args(&["not_a_login!"]), &file).unwrap_err(),
        ConfigError::InvalidUsername(_)
    ));
    assert!(matches!(
        resolve(&args(&["octocat", "--year", "2030"]), &file).unwrap_err(),
        ConfigError::InvalidYear(_)
    ));
    assert!(matches!(
        resolve(&args(&["octocat", "--year", "2005"]), &file).unwrap_err(),
        ConfigError::InvalidYear(_)
    ));
    assert!(matches!(
        resolve(&args(&["octocat", "--utc-offset", "+25:00"]), &file).unwrap_err(),
        ConfigError::InvalidUtcOffset(_)
    ));
    assert_eq!(
        resolve(&args(&["octocat", "--top", "0"]), &file).unwrap_err(),
        ConfigError::ZeroLimit("--top")
    );
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("nested").join("config.json"));
    assert_eq!(manager.load(), FileConfig::default());

    let config = FileConfig {
        username: Some("octocat".to_string()),
        api: Some(ApiMode::GraphQl),
        top: Some(4),
        ..Default::default()
    };
    manager.save(&config).unwrap();
    assert_eq!(manager.load(), config);

    let raw = std::fs::read_to_string(manager.config_path()).unwrap();
    assert!(raw.contains("\"api\": \"graphql\""));
    assert!(!raw.contains("token"));
}

#[test]
fn test_corrupt_config_file_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert_eq!(ConfigManager::with_path(path).load(), FileConfig::default());
}

#[test]
#[serial]
fn test_saved_settings_keep_environment_token_out() {
    let _env = CleanEnv::new();
    std::env::set_var(GITHUB_TOKEN_ENV, "secret");

    let settings = resolve(&args(&["octocat", "--save-config"]), &FileConfig::default()).unwrap();
    assert!(settings.save_config);
    let saved = settings.to_file_config(&FileConfig::default());
    assert_eq!(saved.token, None);
    assert_eq!(saved.username.as_deref(), Some("octocat"));
    assert_eq!(saved.utc_offset.as_deref(), Some("+02:00"));
}

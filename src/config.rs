//! Layered configuration.
//!
//! Precedence, highest first: CLI flags, environment, `~/.ghwrapped/config.json`,
//! `gh auth token` (token only), built-in defaults.

use chrono::{Datelike, FixedOffset, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::auth::{resolve_token, TokenSource};
use crate::cli::Args;
use crate::export::ExportFormat;
use crate::github::SourceOptions;
use crate::models::{ApiMode, DateWindow, WindowError};
use crate::stats::DEFAULT_TOP_N;

/// Application directory under the home directory.
pub const APP_DIR: &str = ".ghwrapped";

const CONFIG_FILE: &str = "config.json";

pub const API_URL_ENV: &str = "GHWRAPPED_API_URL";
pub const GRAPHQL_URL_ENV: &str = "GHWRAPPED_GRAPHQL_URL";
pub const LOG_ENV: &str = "GHWRAPPED_LOG";

/// First year with GitHub activity.
const FIRST_YEAR: i32 = 2008;

const MAX_LOGIN_LEN: usize = 39;

static LOGIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+(-[A-Za-z0-9]+)*$").expect("Invalid login regex"));

static OFFSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-])(\d{1,2})(?::?(\d{2}))?$").expect("Invalid UTC offset regex")
});

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("no GitHub username given; pass one as an argument or set \"username\" in ~/.ghwrapped/config.json")]
    MissingUsername,

    #[error("'{0}' is not a valid GitHub username")]
    InvalidUsername(String),

    #[error(transparent)]
    InvalidYear(#[from] WindowError),

    #[error("invalid UTC offset '{0}', expected +HH:MM")]
    InvalidUtcOffset(String),

    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),

    #[error("could not write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

/// Contents of `~/.ghwrapped/config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,
}

/// `~/.ghwrapped`, when the home directory is known.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR))
}

/// Loads and saves [`FileConfig`].
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        Some(Self {
            config_path: app_dir()?.join(CONFIG_FILE),
        })
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Missing or unreadable files yield the defaults.
    pub fn load(&self) -> FileConfig {
        let file = match File::open(&self.config_path) {
            Ok(f) => f,
            Err(_) => return FileConfig::default(),
        };
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %self.config_path.display(), %err, "ignoring unreadable config file");
                FileConfig::default()
            }
        }
    }

    /// Creates the parent directory if needed.
    pub fn save(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let write_err = |err: std::io::Error| ConfigError::Write {
            path: self.config_path.clone(),
            message: err.to_string(),
        };

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let file = File::create(&self.config_path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, config).map_err(|err| ConfigError::Write {
            path: self.config_path.clone(),
            message: err.to_string(),
        })?;
        writer.flush().map_err(write_err)
    }
}

/// GitHub login rules: alphanumerics and single inner hyphens, at most 39
/// characters.
pub fn validate_username(username: &str) -> Result<(), ConfigError> {
    if username.len() <= MAX_LOGIN_LEN && LOGIN_RE.is_match(username) {
        Ok(())
    } else {
        Err(ConfigError::InvalidUsername(username.to_string()))
    }
}

/// Parse `+HH:MM`, `-HHMM`, `+H`, `Z` or `UTC`.
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset, ConfigError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| ConfigError::InvalidUtcOffset(value.into()));
    }
    let invalid = || ConfigError::InvalidUtcOffset(value.to_string());
    let caps = OFFSET_RE.captures(value).ok_or_else(invalid)?;

    let hours: i32 = caps[2].parse().map_err(|_| invalid())?;
    let minutes: i32 = caps
        .get(3)
        .map_or(Ok(0), |m| m.as_str().parse())
        .map_err(|_| invalid())?;
    if hours > 14 || minutes >= 60 {
        return Err(invalid());
    }

    let secs = hours * 3600 + minutes * 60;
    let secs = if &caps[1] == "-" { -secs } else { secs };
    FixedOffset::east_opt(secs).ok_or_else(invalid)
}

/// What to do once stats are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Tui,
    Summary,
    Json,
    Export(ExportFormat),
}

impl RunMode {
    fn from_args(args: &Args) -> Self {
        if args.summary {
            RunMode::Summary
        } else if args.json {
            RunMode::Json
        } else if let Some(format) = args.export {
            RunMode::Export(format)
        } else {
            RunMode::Tui
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub username: String,
    pub window: DateWindow,
    pub token: Option<String>,
    pub token_source: TokenSource,
    pub api_mode: ApiMode,
    pub run_mode: RunMode,
    pub export_dir: PathBuf,
    pub utc_offset: FixedOffset,
    pub top_n: usize,
    pub sources: SourceOptions,
    pub log_filter: String,
    pub save_config: bool,
}

/// Outside inputs to [`Settings::resolve`], injectable for tests.
pub struct Environment<'a> {
    pub var: &'a dyn Fn(&str) -> Option<String>,
    pub gh_token: &'a dyn Fn() -> Option<String>,
    pub today: NaiveDate,
    pub local_offset: FixedOffset,
}

fn positive<T: PartialEq + Default>(value: T, field: &'static str) -> Result<T, ConfigError> {
    if value == T::default() {
        Err(ConfigError::ZeroLimit(field))
    } else {
        Ok(value)
    }
}

impl Settings {
    pub fn resolve(args: &Args, file: &FileConfig, env: &Environment<'_>) -> Result<Self, ConfigError> {
        let username = args
            .username
            .clone()
            .or_else(|| file.username.clone())
            .map(|u| u.trim().trim_start_matches('@').to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUsername)?;
        validate_username(&username)?;

        let year = args.year.unwrap_or_else(|| env.today.year());
        if year < FIRST_YEAR {
            return Err(WindowError::InvalidYear(year).into());
        }
        let window = DateWindow::for_year(year, env.today)?;

        let (token, token_source) = resolve_token(
            args.token.as_deref(),
            env.var,
            file.token.as_deref(),
            env.gh_token,
        );

        let utc_offset = match args.utc_offset.as_deref().or(file.utc_offset.as_deref()) {
            Some(value) => parse_utc_offset(value)?,
            None => env.local_offset,
        };

        let defaults = SourceOptions::default();
        let sources = SourceOptions {
            api_url: (env.var)(API_URL_ENV).unwrap_or(defaults.api_url),
            graphql_url: (env.var)(GRAPHQL_URL_ENV).unwrap_or(defaults.graphql_url),
            page_cap: positive(args.page_cap.unwrap_or(defaults.page_cap), "--page-cap")?,
            repo_limit: positive(args.repo_limit.unwrap_or(defaults.repo_limit), "--repo-limit")?,
            concurrency: defaults.concurrency,
        };

        let log_filter = (env.var)(LOG_ENV)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| if args.verbose { "debug" } else { "info" }.to_string());

        Ok(Settings {
            username,
            window,
            token,
            token_source,
            api_mode: args.api.or(file.api).unwrap_or_default(),
            run_mode: RunMode::from_args(args),
            export_dir: args
                .out
                .clone()
                .or_else(|| file.export_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            utc_offset,
            top_n: positive(args.top.or(file.top).unwrap_or(DEFAULT_TOP_N), "--top")?,
            sources,
            log_filter,
            save_config: args.save_config,
        })
    }

    /// Config file contents to persist with `--save-config`. A token is only
    /// written when it was passed on the command line.
    pub fn to_file_config(&self, previous: &FileConfig) -> FileConfig {
        FileConfig {
            username: Some(self.username.clone()),
            token: match self.token_source {
                TokenSource::Cli => self.token.clone(),
                _ => previous.token.clone(),
            },
            api: Some(self.api_mode),
            export_dir: Some(self.export_dir.clone()),
            utc_offset: Some(crate::stats::format_offset(self.utc_offset)),
            top: Some(self.top_n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_var(_: &str) -> Option<String> {
        None
    }

    fn no_gh() -> Option<String> {
        None
    }

    fn env<'a>(var: &'a dyn Fn(&str) -> Option<String>) -> Environment<'a> {
        Environment {
            var,
            gh_token: &no_gh,
            today: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            local_offset: FixedOffset::east_opt(3600).unwrap(),
        }
    }

    fn args(username: &str) -> Args {
        Args {
            username: Some(username.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&args("octocat"), &FileConfig::default(), &env(&no_var)).unwrap();
        assert_eq!(settings.window.year, 2024);
        assert_eq!(settings.window.to, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert_eq!(settings.token, None);
        assert_eq!(settings.token_source, TokenSource::Anonymous);
        assert_eq!(settings.api_mode, ApiMode::Auto);
        assert_eq!(settings.run_mode, RunMode::Tui);
        assert_eq!(settings.export_dir, PathBuf::from("."));
        assert_eq!(settings.utc_offset.local_minus_utc(), 3600);
        assert_eq!(settings.top_n, DEFAULT_TOP_N);
        assert_eq!(settings.sources, SourceOptions::default());
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_username_from_file_when_no_flag() {
        let file = FileConfig {
            username: Some("@hubot".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(&Args::default(), &file, &env(&no_var)).unwrap();
        assert_eq!(settings.username, "hubot");
    }

    #[test]
    fn test_missing_username() {
        let err = Settings::resolve(&Args::default(), &FileConfig::default(), &env(&no_var)).unwrap_err();
        assert_eq!(err, ConfigError::MissingUsername);
    }

    #[test]
    fn test_flags_beat_file() {
        let file = FileConfig {
            username: Some("hubot".to_string()),
            api: Some(ApiMode::Rest),
            top: Some(8),
            utc_offset: Some("+05:00".to_string()),
            export_dir: Some(PathBuf::from("/tmp/cards")),
            ..Default::default()
        };
        let cli = Args {
            api: Some(ApiMode::GraphQl),
            top: Some(3),
            ..args("octocat")
        };
        let settings = Settings::resolve(&cli, &file, &env(&no_var)).unwrap();
        assert_eq!(settings.username, "octocat");
        assert_eq!(settings.api_mode, ApiMode::GraphQl);
        assert_eq!(settings.top_n, 3);
        assert_eq!(settings.utc_offset.local_minus_utc(), 5 * 3600);
        assert_eq!(settings.export_dir, PathBuf::from("/tmp/cards"));
    }

    #[test]
    fn test_env_overrides() {
        let var = |key: &str| match key {
            API_URL_ENV => Some("http://localhost:9000".to_string()),
            LOG_ENV => Some("ghwrapped=trace".to_string()),
            "GITHUB_TOKEN" => Some("env-token".to_string()),
            _ => None,
        };
        let file = FileConfig {
            token: Some("file-token".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(&args("octocat"), &file, &env(&var)).unwrap();
        assert_eq!(settings.sources.api_url, "http://localhost:9000");
        assert_eq!(settings.log_filter, "ghwrapped=trace");
        assert_eq!(settings.token.as_deref(), Some("env-token"));
        assert_eq!(settings.token_source, TokenSource::Env);
    }

    #[test]
    fn test_run_modes() {
        let summary = Args {
            summary: true,
            ..args("octocat")
        };
        let export = Args {
            export: Some(ExportFormat::Svg),
            ..args("octocat")
        };
        let resolve = |a: &Args| Settings::resolve(a, &FileConfig::default(), &env(&no_var)).unwrap().run_mode;
        assert_eq!(resolve(&summary), RunMode::Summary);
        assert_eq!(resolve(&export), RunMode::Export(ExportFormat::Svg));
    }

    #[test]
    fn test_year_validation() {
        let future = Args {
            year: Some(2025),
            ..args("octocat")
        };
        let ancient = Args {
            year: Some(1999),
            ..args("octocat")
        };
        assert!(matches!(
            Settings::resolve(&future, &FileConfig::default(), &env(&no_var)),
            Err(ConfigError::InvalidYear(WindowError::FutureYear { .. }))
        ));
        assert!(matches!(
            Settings::resolve(&ancient, &FileConfig::default(), &env(&no_var)),
            Err(ConfigError::InvalidYear(WindowError::InvalidYear(1999)))
        ));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let cli = Args {
            top: Some(0),
            ..args("octocat")
        };
        assert_eq!(
            Settings::resolve(&cli, &FileConfig::default(), &env(&no_var)).unwrap_err(),
            ConfigError::ZeroLimit("--top")
        );
    }

    #[test]
    fn test_validate_username() {
        for ok in ["octocat", "a", "mona-lisa", "A1-b2-C3"] {
            assert!(validate_username(ok).is_ok(), "{}", ok);
        }
        let too_long = "a".repeat(40);
        for bad in ["-octo", "octo-", "oc--to", "octo cat", "octo_cat", "", too_long.as_str()] {
            assert!(validate_username(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("+02:00").unwrap().local_minus_utc(), 7200);
        assert_eq!(parse_utc_offset("-0530").unwrap().local_minus_utc(), -(5 * 3600 + 1800));
        assert_eq!(parse_utc_offset("+9").unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        for bad in ["02:00", "+15:00", "+01:75", "soon"] {
            assert!(parse_utc_offset(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_config_manager_round_trip() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join(APP_DIR).join(CONFIG_FILE));
        assert_eq!(manager.load(), FileConfig::default());

        let config = FileConfig {
            username: Some("octocat".to_string()),
            api: Some(ApiMode::GraphQl),
            ..Default::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load(), config);

        let raw = fs::read_to_string(manager.config_path()).unwrap();
        assert!(raw.contains("\"graphql\""));
        assert!(!raw.contains("token"));
    }

    #[test]
    fn test_corrupt_config_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(ConfigManager::with_path(&path).load(), FileConfig::default());
    }

    #[test]
    fn test_to_file_config_keeps_non_cli_token_out() {
        let var = |key: &str| (key == "GITHUB_TOKEN").then(|| "env-token".to_string());
        let settings = Settings::resolve(&args("octocat"), &FileConfig::default(), &env(&var)).unwrap();
        let saved = settings.to_file_config(&FileConfig::default());
        assert_eq!(saved.token, None);
        assert_eq!(saved.utc_offset.as_deref(), Some("+01:00"));

        let cli = Args {
            token: Some("cli-token".to_string()),
            ..args("octocat")
        };
        let settings = Settings::resolve(&cli, &FileConfig::default(), &env(&no_var)).unwrap();
        assert_eq!(
            settings.to_file_config(&FileConfig::default()).token.as_deref(),
            Some("cli-token")
        );
    }
}

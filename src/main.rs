use ghwrapped::adapters::ReqwestHttpClient;
use ghwrapped::app::{App, AppCommand, SystemActions};
use ghwrapped::auth::gh_auth_token;
use ghwrapped::cli::{Args, VERSION};
use ghwrapped::cli_output::{
    icons, print_error_line, print_header, print_step_line, print_summary, print_troubleshoot,
    print_warning_line,
};
use ghwrapped::config::{ConfigManager, Environment, FileConfig, RunMode, Settings};
use ghwrapped::export::export_card;
use ghwrapped::logging::init_logging;
use ghwrapped::startup::{fetch_with_retry, RetryPolicy, TerminalTokenPrompt};
use ghwrapped::stats::{compute_stats, WrappedStats};
use ghwrapped::terminal::{setup_panic_hook, TerminalManager};
use ghwrapped::ui;

use chrono::Local;
use clap::Parser;
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;

/// Exit code for bad flags or config.
const EXIT_USAGE: i32 = 2;
const EXIT_FAILURE: i32 = 1;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // =========================================================
    // Settings: flags, environment, config file, defaults
    // =========================================================

    let config_manager = ConfigManager::new();
    let file_config = config_manager
        .as_ref()
        .map(|manager| manager.load())
        .unwrap_or_default();

    let now = Local::now();
    let var = |name: &str| std::env::var(name).ok();
    let env = Environment {
        var: &var,
        gh_token: &gh_auth_token,
        today: now.date_naive(),
        local_offset: *now.offset(),
    };

    let settings = match Settings::resolve(&args, &file_config, &env) {
        Ok(settings) => settings,
        Err(err) => {
            print_error_line(&err.to_string());
            std::process::exit(EXIT_USAGE);
        }
    };

    let log_path = init_logging(&settings.log_filter);
    setup_panic_hook();
    tracing::info!(
        login = %settings.username,
        year = settings.window.year,
        api = %settings.api_mode,
        token_source = %settings.token_source,
        "starting"
    );

    // JSON goes to stdout untouched
    let chatty = settings.run_mode != RunMode::Json;
    if chatty {
        print_header(&format!(
            "GHWRAPPED v{} · @{} · {}",
            VERSION, settings.username, settings.window.year
        ));
        print_step_line(
            icons::PENDING,
            &format!("Fetching activity ({} token)", settings.token_source),
        );
    }

    // =========================================================
    // Fetch - rate limits prompt for a token before the TUI starts
    // =========================================================

    let runtime = tokio::runtime::Runtime::new()?;
    let http = Arc::new(ReqwestHttpClient::new());
    let outcome = match runtime.block_on(fetch_with_retry(
        http,
        &settings,
        &mut TerminalTokenPrompt,
        RetryPolicy::default(),
    )) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(code = err.error_code(), "giving up: {}", err);
            print_error_line(&err.report());
            if let Some(path) = &log_path {
                print_troubleshoot(&[&format!("Details in {}", path.display())]);
            }
            std::process::exit(EXIT_FAILURE);
        }
    };
    if chatty {
        print_step_line(
            icons::SUCCESS,
            &format!(
                "Fetched {} repositories and {} commits via {}",
                outcome.data.repositories.len(),
                outcome.data.commits.len(),
                outcome.data.source
            ),
        );
    }

    if settings.save_config {
        save_config(config_manager.as_ref(), &settings, &file_config, chatty);
    }

    let stats = compute_stats(&outcome.data, settings.utc_offset, settings.top_n);

    match settings.run_mode {
        RunMode::Summary => print_summary(&stats),
        RunMode::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        RunMode::Export(format) => match export_card(&stats, format, &settings.export_dir) {
            Ok(paths) => {
                for path in paths {
                    print_step_line(icons::SUCCESS, &format!("Saved {}", path.display()));
                }
            }
            Err(err) => {
                tracing::error!("export failed: {}", err);
                print_error_line(&err.to_string());
                std::process::exit(EXIT_FAILURE);
            }
        },
        RunMode::Tui => runtime.block_on(run_tui(stats, settings.export_dir.clone()))?,
    }

    Ok(())
}

fn save_config(
    manager: Option<&ConfigManager>,
    settings: &Settings,
    previous: &FileConfig,
    chatty: bool,
) {
    let Some(manager) = manager else {
        tracing::warn!("no home directory, config not saved");
        return;
    };
    match manager.save(&settings.to_file_config(previous)) {
        Ok(()) if chatty => print_step_line(
            icons::SUCCESS,
            &format!("Saved settings to {}", manager.config_path().display()),
        ),
        Ok(()) => {}
        Err(err) => print_warning_line(&err.to_string()),
    }
}

async fn run_tui(stats: WrappedStats, export_dir: PathBuf) -> Result<()> {
    let mut app = App::new(stats, export_dir);
    let mut manager = TerminalManager::new()?;
    let mut events = EventStream::new();
    let mut actions = SystemActions;

    while !app.should_quit {
        if app.needs_redraw {
            manager.terminal().draw(|frame| ui::render(frame, &app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    let command = app.handle_key(key);
                    if command != AppCommand::None {
                        tracing::debug!(?command, "key command");
                    }
                    app.perform(command, &mut actions);
                }
                Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    manager.restore();
                    return Err(err.into());
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => app.quit(),
        }
    }

    manager.restore();
    tracing::info!("bye");
    Ok(())
}

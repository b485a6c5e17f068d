//! userdir-manager binary entry point.
//!
//! Loads settings, sets up file logging, initializes the terminal in raw
//! mode, runs the TUI event loop, and restores the terminal state on exit.
//!
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use userdir_manager::app::config::{Settings, config_file_write_path};
use userdir_manager::app::keymap::Keymap;
use userdir_manager::app::{self, AppState, Theme};
use userdir_manager::cli::Args;
use userdir_manager::{HttpUserClient, UserApi};

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Send `tracing` output to the log file; the terminal belongs to the UI.
fn init_logging(settings: &Settings) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)
        .with_context(|| format!("open log file {}", settings.log_file))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }
    Ok(())
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let args = Args::parse();
    let settings_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_file_write_path("userdir.conf"));
    let mut settings = Settings::load_or_init(&settings_path);
    settings.apply_overrides(&args);
    init_logging(&settings)?;
    info!(api_url = %settings.api_url, "starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build async runtime")?;

    let api: Arc<dyn UserApi> = Arc::new(HttpUserClient::new(&settings.api_url));
    let theme = Theme::load_or_init(&config_file_write_path("theme.conf").to_string_lossy());
    let keymap = Keymap::load_or_init(&config_file_write_path("keybinds.conf").to_string_lossy());
    let state = AppState::new(api, settings.api_url.clone(), theme, keymap);

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &runtime, state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        warn!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}

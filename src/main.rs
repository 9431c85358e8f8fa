mod app;
mod config;
mod entry;
mod form;
mod stats;
mod storage;
mod store;
mod tracker;
mod ui;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Focus};
use config::Config;
use storage::{FileStorage, KeyValueStore};
use tracker::Tracker;
use ui::Theme;

#[derive(Parser, Debug)]
#[command(name = "workouts")]
#[command(about = "Track workouts per user in the terminal")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "~/.config/workout-tracker/config.toml")]
    config: String,

    /// Directory for stored entries (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log file (default: `<data dir>/workouts.log`)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Default `EnvFilter` directive. Events are targeted by crate name, which is
/// the bin name (`workouts`), not the package name.
const DEFAULT_LOG_FILTER: &str = concat!(env!("CARGO_CRATE_NAME"), "=info");

/// `--log-file` if given, else `workouts.log` in the data directory
fn log_path(log_file: Option<PathBuf>, data_dir: &Path) -> PathBuf {
    log_file.unwrap_or_else(|| data_dir.join("workouts.log"))
}

/// The TUI owns the terminal, so logs always go to a file.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Runs `restore` when dropped, so an early `?` after raw mode is enabled
/// still hands the terminal back
struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> TerminalGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let mut config = Config::load(&cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }
    let data_dir = config.data_dir();
    init_logging(&log_path(cli.log_file, &data_dir))?;
    let theme = config.resolve_theme();

    // Load entries
    let storage = FileStorage::new(data_dir);
    tracing::info!("Using data directory {}", storage.dir().display());
    let tracker = Tracker::open(storage, &config.storage.key, config.view.items_per_page);

    // Setup terminal
    enable_raw_mode()?;
    let _guard = TerminalGuard::new(|| {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
            tracing::warn!("Failed to leave alternate screen: {}", e);
        }
    });
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(tracker, config);

    // Run main loop
    let result = run_app(&mut terminal, &mut app, &theme);
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    theme: &Theme,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, theme))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if !handle_key(app, key) {
                return Ok(());
            }
        }
    }
}

/// Dispatch a key press. Returns false when the app should quit.
fn handle_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match key.code {
        KeyCode::Tab => {
            app.focus_next();
            return true;
        }
        KeyCode::BackTab => {
            app.focus_previous();
            return true;
        }
        _ => {}
    }

    match app.focus() {
        Focus::Form => handle_form_key(app, key),
        Focus::Table if app.is_editing_search() => handle_search_key(app, key),
        Focus::Table => return handle_table_key(app, key),
        Focus::Users => return handle_users_key(app, key),
    }
    true
}

fn handle_form_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_form(),
        KeyCode::Esc => app.focus_next(),
        KeyCode::Up => {
            let form = app.form_mut();
            form.focus = form.focus.previous();
        }
        KeyCode::Down => {
            let form = app.form_mut();
            form.focus = form.focus.next();
        }
        KeyCode::Left if app.form().focus == form::FormField::WorkoutType => {
            app.form_mut().previous_type();
        }
        KeyCode::Right if app.form().focus == form::FormField::WorkoutType => {
            app.form_mut().next_type();
        }
        KeyCode::Backspace => app.form_mut().pop_char(),
        KeyCode::Char(c) => app.form_mut().push_char(c),
        _ => {}
    }
}

fn handle_search_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.stop_search(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_table_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Char('t') => app.cycle_type_filter(true),
        KeyCode::Char('T') => app.cycle_type_filter(false),
        KeyCode::Char('p') => app.cycle_page_size(),
        KeyCode::Left | KeyCode::Char('h') => app.change_page(-1),
        KeyCode::Right | KeyCode::Char('l') => app.change_page(1),
        KeyCode::Up | KeyCode::Char('k') => app.table_up(),
        KeyCode::Down | KeyCode::Char('j') => app.table_down(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        _ => {}
    }
    true
}

fn handle_users_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Up | KeyCode::Char('k') => app.users_up(),
        KeyCode::Down | KeyCode::Char('j') => app.users_down(),
        KeyCode::Enter => app.select_highlighted_user(),
        _ => {}
    }
    true
}

mod app;
mod cli;
mod docket;
mod domain;
mod input;
mod logging;
mod persistence;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::Parser;
use cli::{Cli, Commands};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use docket::Docket;
use domain::SystemClock;
use persistence::{ensure_dir, init_local_docket, log_file, resolve_docket_dir, FileStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How often the screen is redrawn without input, so due labels roll over at midnight
const REFRESH_INTERVAL: Duration = Duration::from_millis(1000);

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            logging::init_stderr()?;
            let dir = init_local_docket()?;
            println!("Initialized docket directory: {}", dir.display());
            println!();
            println!("Docket will now use this directory when run from here or below.");
            Ok(())
        }
        Some(Commands::Todo(command)) => {
            logging::init_stderr()?;
            let dir = prepare_dir(cli.dir)?;
            let mut docket = open_docket(&dir)?;
            cli::execute(command, &mut docket, &mut io::stdout().lock())
        }
        None => run_tui(cli.dir),
    }
}

fn prepare_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let dir = resolve_docket_dir(explicit)?;
    ensure_dir(&dir)?;
    Ok(dir)
}

fn open_docket(dir: &Path) -> Result<Docket<FileStore>> {
    Docket::open(FileStore::new(dir), SystemClock)
        .with_context(|| format!("Failed to load docket from {}", dir.display()))
}

fn run_tui(explicit_dir: Option<PathBuf>) -> Result<()> {
    let dir = prepare_dir(explicit_dir)?;
    logging::init_file(&log_file(&dir))?;
    tracing::info!(dir = %dir.display(), "starting docket");

    // Load before touching the terminal so a corrupt store is reported plainly
    let docket = open_docket(&dir)?;
    let mut app = AppState::new(docket);

    // Setup terminal; the guard undoes raw mode on every exit path from here on
    enable_raw_mode()?;
    let guard = RestoreGuard {
        restore: restore_terminal,
    };
    execute!(io::stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);
    drop(guard);

    if let Some(status) = &app.status {
        eprintln!("{}", status);
    }

    result
}

/// Runs `restore` when dropped
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!(error = %e, "failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        tracing::warn!(error = %e, "failed to leave alternate screen");
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState<FileStore>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(REFRESH_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handler::handle_key(app, key) {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fail_after_setup(restored: &Cell<u32>) -> Result<()> {
        let _guard = RestoreGuard {
            restore: || restored.set(restored.get() + 1),
        };
        anyhow::bail!("alternate screen unavailable")
    }

    #[test]
    fn test_restore_runs_when_setup_fails() {
        let restored = Cell::new(0);
        assert!(fail_after_setup(&restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_restore_runs_once_on_explicit_drop() {
        let restored = Cell::new(0);
        let guard = RestoreGuard {
            restore: || restored.set(restored.get() + 1),
        };
        drop(guard);
        assert_eq!(restored.get(), 1);
    }
}

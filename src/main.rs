// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Dreadtale.
//!
//! A terminal horror story game. This binary is its interface layer: the
//! screens, menus and setup wizards, and the timed sequences played when a
//! run ends.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** owns the terminal and the session, feeding it one
//!   event at a time and rendering after each.
//! * **Background Workers** run connection tests and one-shot timers, and
//!   report back through the event channel.
//! * An **Input Thread** translates terminal input into application events.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is restored even when the run fails. Communication between
//! the session and background workers is handled via `std::sync::mpsc`
//! channels.

mod actions;
mod components;
mod config;
mod model;
mod provider;
mod render;
mod session;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    fs::{self, File},
    io,
    path::Path,
    sync::{Arc, Mutex, mpsc},
    thread,
};
use tracing_subscriber::EnvFilter;

use crate::{
    actions::events::{AppEvent, process_events},
    config::ConfyStore,
    provider::HttpProviderFactory,
    session::{Services, Session},
    theme::ThemeRegistry,
};

const LOG_FILE: &str = "dreadtale.log";
const LOG_ENV: &str = "DREADTALE_LOG";

/// The entry point of the application.
///
/// Resolves the configuration location, starts logging, manages the terminal
/// lifecycle and returns an error if any part of the run fails.
fn main() -> Result<()> {
    let store = ConfyStore::new().context("Failed to locate configuration directory")?;
    init_logging(store.config_dir());
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let services = Services {
        store: Box::new(store),
        providers: Arc::new(HttpProviderFactory),
        themes: Arc::new(ThemeRegistry::new()),
    };

    let mut terminal = setup_terminal(&services.themes)?;
    let res = run(&mut terminal, &services);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        tracing::error!(error = %e, "application error");
    }
    res.context("Application error occurred")
}

/// Sends log output to a file next to the settings. The terminal belongs to
/// the interface, so without a writable directory logging stays off.
fn init_logging(dir: Option<&Path>) {
    let Some(dir) = dir else {
        return;
    };
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join(LOG_FILE)) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background colour from the current theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(themes: &ThemeRegistry) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin outline in the user's own colour
    util::term::apply_theme_background(&themes.current());

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it runs during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the background workers and enters the main event loop.
///
/// This function spawns:
/// * A command worker to run connection tests.
/// * An input thread to translate terminal events.
///
/// Timer threads are spawned later, on demand, by the event loop.
///
/// # Errors
///
/// Returns an error if the terminal size cannot be read or the event loop
/// fails.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, services: &Services) -> Result<()> {
    let (event_tx, event_rx) = mpsc::channel();
    let (command_tx, command_rx) = mpsc::channel();

    // Spawn a background worker to process slow commands.
    actions::commands::spawn_command_worker(
        Arc::clone(&services.providers),
        command_rx,
        event_tx.clone(),
    );

    // Spawn a thread to translate raw terminal events to application events.
    let tx_input = event_tx.clone();
    thread::spawn(move || {
        loop {
            let sent = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx_input.send(AppEvent::Key(key))
                }
                Ok(Event::Resize(width, height)) => tx_input.send(AppEvent::Resize(width, height)),
                Ok(_) => Ok(()),
                Err(e) => {
                    let _ = tx_input.send(AppEvent::Error(e.to_string()));
                    break;
                }
            };
            if sent.is_err() {
                break;
            }
        }
    });

    // The session leaves the loading screen on its first size event
    let (width, height) = crossterm::terminal::size().context("Failed to read terminal size")?;
    event_tx.send(AppEvent::Resize(width, height))?;

    // Application event loop, process events until the user quits
    process_events(terminal, Session::new(), services, event_rx, event_tx, command_tx)
}

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

//! Application event distribution and orchestration.
//!
//! Every input reaches the session through one channel of [`AppEvent`]s:
//! key presses and resizes from the input thread, timer firings from the
//! one-shot tick threads and connection results from the command worker.
//!
//! # Architecture
//!
//! 1. **Capture**: events arrive one at a time on the event channel.
//! 2. **Process**: [`Session::update`] consumes the session and the event and
//!    returns the next session plus the commands to carry out.
//! 3. **Execute**: timers are armed, slow work is handed to the command
//!    worker, and a quit request ends the loop.
//! 4. **Render**: the terminal is redrawn after every event.

use std::{
    io::Stdout,
    ops::ControlFlow,
    sync::mpsc::{Receiver, Sender},
    time::Duration,
};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    actions::commands::{AppCommand, schedule_tick},
    components::death::{FRAME_INTERVAL, GLITCH_INTERVAL},
    model::DebriefReport,
    render::draw,
    session::{Services, Session},
    util::term::apply_theme_background,
};

const SPINNER_INTERVAL: Duration = Duration::from_millis(120);
const FLAVOR_INTERVAL: Duration = Duration::from_secs(4);
const ELAPSED_INTERVAL: Duration = Duration::from_secs(1);

/// The timers a controller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TickKind {
    DeathFrame,
    DeathGlitch,
    ConnectionSpinner,
    FlavorRotate,
    Elapsed,
}

impl TickKind {
    pub(crate) fn interval(self) -> Duration {
        match self {
            TickKind::DeathFrame => FRAME_INTERVAL,
            TickKind::DeathGlitch => GLITCH_INTERVAL,
            TickKind::ConnectionSpinner => SPINNER_INTERVAL,
            TickKind::FlavorRotate => FLAVOR_INTERVAL,
            TickKind::Elapsed => ELAPSED_INTERVAL,
        }
    }
}

/// A timer firing, stamped with the session epoch it was armed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tick {
    pub(crate) kind: TickKind,
    pub(crate) epoch: u64,
}

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick(Tick),
    ConnectionTested {
        request: u64,
        result: Result<(), String>,
    },
    /// A run has finished; carries the report for the debrief. Sent by the
    /// narrative engine, which does not exist yet.
    #[cfg_attr(not(test), allow(dead_code))]
    RunEnded(Box<DebriefReport>),
    Error(String),
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until the session asks to quit or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut session: Session,
    services: &Services,
    event_rx: Receiver<AppEvent>,
    event_tx: Sender<AppEvent>,
    command_tx: Sender<AppCommand>,
) -> Result<()> {
    terminal.draw(|f| draw(f, &session, &services.themes))?;
    let mut theme_id = services.themes.current().id;

    while let Ok(event) = event_rx.recv() {
        let (next, commands) = session.update(event, services);
        session = next;

        for command in commands {
            if dispatch(command, &event_tx, &command_tx).is_break() {
                tracing::info!("quit requested");
                return Ok(());
            }
        }

        let theme = services.themes.current();
        if theme.id != theme_id {
            theme_id = theme.id;
            apply_theme_background(&theme);
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, &session, &services.themes))?;
    }

    Ok(())
}

/// Carries out one command. Breaks when the loop should end.
fn dispatch(
    command: AppCommand,
    event_tx: &Sender<AppEvent>,
    command_tx: &Sender<AppCommand>,
) -> ControlFlow<()> {
    match command {
        AppCommand::ScheduleTick(tick) => schedule_tick(tick, event_tx.clone()),
        AppCommand::TestConnection { .. } => {
            if let Err(e) = command_tx.send(command) {
                tracing::warn!("command worker is gone");
                // Answer the test ourselves so the wizard can offer a retry
                if let AppCommand::TestConnection { request, .. } = e.0 {
                    let _ = event_tx.send(AppEvent::ConnectionTested {
                        request,
                        result: Err("connection test worker stopped".to_string()),
                    });
                }
            }
        }
        AppCommand::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

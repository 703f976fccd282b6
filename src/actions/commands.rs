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

//! Follow-up work requested by the session.
//!
//! Timers are one-shot threads that post a single [`AppEvent::Tick`] back to
//! the event loop. Connection tests can block for seconds, so they run on a
//! dedicated worker thread which answers with
//! [`AppEvent::ConnectionTested`].

use std::{
    sync::{
        Arc,
        mpsc::{Receiver, Sender},
    },
    thread,
};

use anyhow::Result;

use crate::{
    actions::events::{AppEvent, Tick, TickKind},
    provider::ProviderFactory,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AppCommand {
    ScheduleTick(Tick),
    TestConnection {
        request: u64,
        provider_id: String,
        secret: String,
    },
    Quit,
}

impl AppCommand {
    /// Requests a timer of `kind`. The session stamps the epoch before the
    /// command leaves it.
    pub(crate) fn schedule(kind: TickKind) -> Self {
        AppCommand::ScheduleTick(Tick { kind, epoch: 0 })
    }
}

/// Arms a one-shot timer that posts `tick` after its interval.
pub(crate) fn schedule_tick(tick: Tick, event_tx: Sender<AppEvent>) {
    thread::spawn(move || {
        thread::sleep(tick.kind.interval());
        // The loop may already be gone when we wake up
        let _ = event_tx.send(AppEvent::Tick(tick));
    });
}

/// Spawns a background thread to process slow application commands.
///
/// # Arguments
///
/// * `factory` - Builds provider clients for connection tests.
/// * `command_rx` - The receiving end of the command channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_command_worker(
    factory: Arc<dyn ProviderFactory>,
    command_rx: Receiver<AppCommand>,
    event_tx: Sender<AppEvent>,
) {
    thread::spawn(move || {
        while let Ok(command) = command_rx.recv() {
            if let Err(e) = handle_command(factory.as_ref(), command, &event_tx) {
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
        tracing::debug!("command worker stopped");
    });
}

fn handle_command(
    factory: &dyn ProviderFactory,
    command: AppCommand,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    match command {
        AppCommand::TestConnection {
            request,
            provider_id,
            secret,
        } => {
            let result = factory
                .construct(&provider_id, &secret)
                .and_then(|client| client.test_connection())
                .map_err(|e| e.to_string());

            event_tx.send(AppEvent::ConnectionTested { request, result })?;
        }
        other => tracing::warn!(command = ?other, "command not handled by worker"),
    }

    Ok(())
}

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

//! Screen controllers.
//!
//! Each controller owns one screen's interaction state. Controllers are
//! plain values: handling an input consumes the old value and hands back a
//! [`Transition`] carrying the new value, an optional completion message for
//! the session, and any follow-up commands to schedule.
//!
//! Every controller lives in its own module split the same way: `mod.rs`
//! holds the state, `event.rs` maps key input onto it and `render.rs` draws
//! it.

pub(crate) mod death;
pub(crate) mod debrief;
pub(crate) mod game;
pub(crate) mod menu;
pub(crate) mod theme_selector;
pub(crate) mod wizard;

use crate::actions::commands::AppCommand;

/// The result of feeding one event to a controller.
#[derive(Debug)]
pub(crate) struct Transition<S, M> {
    pub(crate) state: S,
    pub(crate) message: Option<M>,
    pub(crate) commands: Vec<AppCommand>,
}

impl<S, M> Transition<S, M> {
    pub(crate) fn stay(state: S) -> Self {
        Self {
            state,
            message: None,
            commands: vec![],
        }
    }

    pub(crate) fn emit(state: S, message: M) -> Self {
        Self {
            state,
            message: Some(message),
            commands: vec![],
        }
    }

    pub(crate) fn with_commands(mut self, commands: impl IntoIterator<Item = AppCommand>) -> Self {
        self.commands.extend(commands);
        self
    }
}

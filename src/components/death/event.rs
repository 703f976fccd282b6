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

//! Input handling for the death sequence.
//!
//! Nothing gets through until the transition has finished.

use crossterm::event::{KeyCode, KeyEvent};

use crate::components::{
    Transition,
    death::{DeathChoice, DeathSequence},
};

impl DeathSequence {
    pub(crate) fn update(mut self, key: KeyEvent) -> Transition<Self, DeathChoice> {
        if !self.is_settled() {
            return Transition::stay(self);
        }

        let last = DeathChoice::ALL.len() - 1;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(last),
            KeyCode::Char('1') => return Transition::emit(self, DeathChoice::ViewReport),
            KeyCode::Char('2') => return Transition::emit(self, DeathChoice::ReturnToMenu),
            KeyCode::Enter => {
                if let Some(choice) = DeathChoice::ALL.get(self.selected).copied() {
                    return Transition::emit(self, choice);
                }
            }
            _ => {}
        }

        Transition::stay(self)
    }
}

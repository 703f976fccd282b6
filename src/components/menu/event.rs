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

//! Input handling for menus.
//!
//! While the exit confirmation is showing it captures every key; otherwise
//! keys move the selection, pick an entry directly by number, or activate
//! the current entry.

use crossterm::event::{KeyCode, KeyEvent};

use crate::components::{
    Transition,
    menu::{Menu, MenuAction, MenuMsg},
};

impl<A: MenuAction> Menu<A> {
    pub(crate) fn update(mut self, key: KeyEvent) -> Transition<Self, MenuMsg<A>> {
        self.notice = None;

        if self.confirming_exit {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Transition::emit(self, MenuMsg::Quit),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirming_exit = false;
                    Transition::stay(self)
                }
                _ => Transition::stay(self),
            };
        }

        let message = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.goto_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.goto_previous();
                None
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if self.goto_index(index) {
                    self.activate()
                } else {
                    None
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Esc => Some(MenuMsg::Back),
            _ => None,
        };

        match message {
            Some(message) => Transition::emit(self, message),
            None => Transition::stay(self),
        }
    }
}

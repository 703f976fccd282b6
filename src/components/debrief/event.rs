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

//! Input handling for the debrief browser.

use crossterm::event::{KeyCode, KeyEvent};

use crate::components::{
    Transition,
    debrief::{DebriefChoice, ReportBrowser, Section},
};

impl ReportBrowser {
    pub(crate) fn update(mut self, key: KeyEvent) -> Transition<Self, DebriefChoice> {
        match key.code {
            KeyCode::Tab => self.section = self.section.cycle_next(),
            KeyCode::BackTab => self.section = self.section.cycle_previous(),
            KeyCode::Right | KeyCode::Char('l') => self.section = self.section.next(),
            KeyCode::Left | KeyCode::Char('h') => self.section = self.section.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor_down(),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor_up(),
            KeyCode::PageDown => self.scroll_down(),
            KeyCode::PageUp => self.scroll_up(),
            KeyCode::Char('e') => self.expand_all(),
            KeyCode::Char('c') => self.collapse_all(),
            KeyCode::Enter | KeyCode::Char(' ') => match self.section {
                Section::Options => {
                    if let Some(choice) = self.selected_option() {
                        tracing::info!(choice = %choice.label(), "debrief option chosen");
                        return Transition::emit(self, choice);
                    }
                }
                Section::Rules | Section::Clues => {
                    let section = self.section;
                    let index = self.cursor(section);
                    self.toggle(section, index);
                }
                Section::Summary | Section::Decisions => {}
            },
            _ => {}
        }

        Transition::stay(self)
    }
}

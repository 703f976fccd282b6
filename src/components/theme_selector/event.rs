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

//! Input routing for the theme selector.
//!
//! Navigation is the menu's; only the completion messages are translated,
//! and a selection is applied to the registry before it is reported.

use crossterm::event::KeyEvent;

use crate::components::{
    Transition,
    menu::MenuMsg,
    theme_selector::{ThemeChoice, ThemeSelector, ThemeSelectorMsg},
};

impl ThemeSelector {
    pub(crate) fn update(self, key: KeyEvent) -> Transition<Self, ThemeSelectorMsg> {
        let Self { registry, menu } = self;
        let t = menu.update(key);
        let selector = Self { registry, menu: t.state };

        match t.message {
            Some(MenuMsg::Selected(ThemeChoice(index))) => {
                let Some(id) = selector.registry.all().get(index).map(|t| t.id) else {
                    return Transition::stay(selector);
                };

                if let Err(e) = selector.registry.set_current(id) {
                    tracing::warn!(error = %e, "theme selection rejected");
                    return Transition::stay(selector);
                }

                Transition::emit(selector, ThemeSelectorMsg::Applied(id.to_string()))
            }
            Some(MenuMsg::Back) | Some(MenuMsg::Quit) => {
                Transition::emit(selector, ThemeSelectorMsg::Cancelled)
            }
            None => Transition::stay(selector),
        }
    }
}

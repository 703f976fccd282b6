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

//! Theme selection.
//!
//! A menu over the registry's catalog. Choosing an entry switches the
//! registry's current palette right away, before the completion message is
//! handed to the session, so the new colours show even if nobody acts on
//! the message.

mod event;
mod render;

use std::sync::Arc;

use crate::{
    components::menu::{Menu, MenuAction, MenuItem},
    theme::ThemeRegistry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ThemeChoice(pub(crate) usize);

impl MenuAction for ThemeChoice {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ThemeSelectorMsg {
    Applied(String),
    Cancelled,
}

#[derive(Debug, Clone)]
pub(crate) struct ThemeSelector {
    registry: Arc<ThemeRegistry>,
    pub(crate) menu: Menu<ThemeChoice>,
}

impl ThemeSelector {
    pub(crate) fn new(registry: Arc<ThemeRegistry>) -> Self {
        let items = registry
            .all()
            .iter()
            .enumerate()
            .map(|(i, t)| MenuItem::new(t.name, t.description, ThemeChoice(i)))
            .collect();

        let mut menu = Menu::new("Theme", items);
        let current = registry.all().iter().position(|t| registry.is_current(t.id));
        if let Some(index) = current {
            menu.goto_index(index);
        }

        Self { registry, menu }
    }

    pub(crate) fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }
}

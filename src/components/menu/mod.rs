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

//! Selectable action menus.
//!
//! A [`Menu`] is an ordered list of actions, each of which may be disabled.
//! Navigation skips disabled entries and wraps around the list. Choosing an
//! exit action raises a confirmation prompt instead of leaving straight
//! away. The main menu and the settings menu are both instances of it.

mod event;
mod render;

/// An action a menu entry can carry.
pub(crate) trait MenuAction: Copy + Eq + std::fmt::Debug {
    /// Exit actions ask for confirmation before they are emitted.
    fn is_exit(self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuMsg<A> {
    Selected(A),
    Back,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MenuItem<A> {
    pub(crate) label: &'static str,
    pub(crate) description: &'static str,
    pub(crate) action: A,
    pub(crate) enabled: bool,
}

impl<A> MenuItem<A> {
    pub(crate) fn new(label: &'static str, description: &'static str, action: A) -> Self {
        Self {
            label,
            description,
            action,
            enabled: true,
        }
    }

    pub(crate) fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Menu<A> {
    pub(crate) title: &'static str,
    pub(crate) items: Vec<MenuItem<A>>,
    selected: usize,
    confirming_exit: bool,
    pub(crate) notice: Option<String>,
}

impl<A: MenuAction> Menu<A> {
    pub(crate) fn new(title: &'static str, items: Vec<MenuItem<A>>) -> Self {
        let selected = items.iter().position(|i| i.enabled).unwrap_or(0);
        Self {
            title,
            items,
            selected,
            confirming_exit: false,
            notice: None,
        }
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    pub(crate) fn selected_item(&self) -> Option<&MenuItem<A>> {
        self.items.get(self.selected)
    }

    pub(crate) fn is_confirming_exit(&self) -> bool {
        self.confirming_exit
    }

    pub(crate) fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    /// Moves to the next enabled entry, wrapping at most once around the
    /// list. With nothing enabled the selection stays put.
    fn goto_next(&mut self) {
        let len = self.items.len();
        for step in 1..=len {
            let i = (self.selected + step) % len;
            if self.items[i].enabled {
                self.selected = i;
                return;
            }
        }
    }

    fn goto_previous(&mut self) {
        let len = self.items.len();
        for step in 1..=len {
            let i = (self.selected + len - step) % len;
            if self.items[i].enabled {
                self.selected = i;
                return;
            }
        }
    }

    /// Direct selection; disabled or missing targets are ignored.
    pub(crate) fn goto_index(&mut self, index: usize) -> bool {
        match self.items.get(index) {
            Some(item) if item.enabled => {
                self.selected = index;
                true
            }
            _ => false,
        }
    }

    fn activate(&mut self) -> Option<MenuMsg<A>> {
        let item = self.items.get(self.selected).filter(|i| i.enabled)?;
        if item.action.is_exit() {
            self.confirming_exit = true;
            None
        } else {
            Some(MenuMsg::Selected(item.action))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MainAction {
    NewGame,
    Continue,
    Settings,
    Exit,
}

impl MenuAction for MainAction {
    fn is_exit(self) -> bool {
        self == MainAction::Exit
    }
}

pub(crate) fn main_menu(has_save_files: bool) -> Menu<MainAction> {
    Menu::new(
        "Main Menu",
        vec![
            MenuItem::new("New Game", "Begin a new story", MainAction::NewGame),
            MenuItem::new("Continue", "Resume a saved story", MainAction::Continue)
                .enabled(has_save_files),
            MenuItem::new("Settings", "Theme, provider and audio", MainAction::Settings),
            MenuItem::new("Exit", "Leave the game", MainAction::Exit),
        ],
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingsAction {
    Theme,
    ApiSetup,
    Audio,
    Back,
}

impl MenuAction for SettingsAction {}

pub(crate) fn settings_menu() -> Menu<SettingsAction> {
    Menu::new(
        "Settings",
        vec![
            MenuItem::new("Theme", "Change the colour palette", SettingsAction::Theme),
            MenuItem::new("API Setup", "Choose a story provider and key", SettingsAction::ApiSetup),
            MenuItem::new("Audio", "Sound and music", SettingsAction::Audio),
            MenuItem::new("Back", "Return to the main menu", SettingsAction::Back),
        ],
    )
}

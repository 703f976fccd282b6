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

//! Linear configuration wizards.
//!
//! Both setup flows share the same mechanics: an ordered list of steps,
//! forward motion only after the current step validates, backward motion
//! at any time (leaving the first step backwards cancels), and a closing
//! summary offering confirm or edit. The building blocks for that live
//! here; the concrete flows are [`api_setup`] and [`game_setup`].

pub(crate) mod api_setup;
pub(crate) mod game_setup;
mod render;

use crossterm::event::{Event, KeyEvent};
use tui_input::{Input, backend::crossterm::EventHandler};

pub(crate) use api_setup::{ApiSetup, ApiSetupWizard};
pub(crate) use game_setup::GameSetupWizard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WizardMsg<T> {
    Done(T),
    Cancelled,
}

/// Fixed ordering of a wizard's steps.
pub(crate) trait StepOrder: Copy + PartialEq + 'static {
    const ORDER: &'static [Self];

    fn ordinal(self) -> usize {
        Self::ORDER.iter().position(|s| *s == self).unwrap_or(0)
    }

    fn next(self) -> Option<Self> {
        Self::ORDER.get(self.ordinal() + 1).copied()
    }

    fn previous(self) -> Option<Self> {
        self.ordinal().checked_sub(1).and_then(|i| Self::ORDER.get(i).copied())
    }

    fn first() -> Self {
        Self::ORDER[0]
    }
}

/// Cursor over a small fixed set of options. Moves clamp at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Choice {
    selected: usize,
    len: usize,
}

impl Choice {
    pub(crate) fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub(crate) fn at(len: usize, selected: usize) -> Self {
        Self {
            selected: selected.min(len.saturating_sub(1)),
            len,
        }
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    pub(crate) fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(crate) fn down(&mut self) {
        if self.selected + 1 < self.len {
            self.selected += 1;
        }
    }

    /// Selects the option for a `1`-based digit key. Returns whether the
    /// digit named an option.
    pub(crate) fn pick_digit(&mut self, digit: char) -> bool {
        match digit.to_digit(10).map(|d| d as usize) {
            Some(d) if d >= 1 && d <= self.len => {
                self.selected = d - 1;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn select(&mut self, index: usize) {
        if index < self.len {
            self.selected = index;
        }
    }
}

/// Free text entry with an inline validation message.
#[derive(Debug, Clone, Default)]
pub(crate) struct TextField {
    pub(crate) input: Input,
    pub(crate) error: Option<String>,
    pub(crate) masked: bool,
}

impl TextField {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub(crate) fn value(&self) -> &str {
        self.input.value()
    }

    pub(crate) fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
        self.error = None;
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if self.input.handle_event(&Event::Key(key)).is_some() {
            self.error = None;
        }
    }

    /// Text as it should appear on screen.
    pub(crate) fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value().chars().count())
        } else {
            self.value().to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SummaryAction {
    Confirm,
    Edit,
}

impl SummaryAction {
    pub(crate) const ALL: [SummaryAction; 2] = [SummaryAction::Confirm, SummaryAction::Edit];

    pub(crate) fn label(self) -> &'static str {
        match self {
            SummaryAction::Confirm => "Confirm",
            SummaryAction::Edit => "Edit",
        }
    }

    pub(crate) fn from_choice(choice: Choice) -> Self {
        Self::ALL[choice.selected().min(Self::ALL.len() - 1)]
    }
}

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

//! New game setup wizard.
//!
//! Walks the player through the story theme, difficulty, length and the
//! adult content toggle, then shows a summary. Each step writes into the
//! draft [`GameConfig`]; the draft is only handed over when the summary is
//! confirmed.

mod event;
mod render;

use crate::{
    components::wizard::{Choice, StepOrder, TextField},
    model::{Difficulty, GameConfig, StoryLength},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameStep {
    Theme,
    Difficulty,
    Length,
    Adult,
    Summary,
}

impl StepOrder for GameStep {
    const ORDER: &'static [Self] = &[
        GameStep::Theme,
        GameStep::Difficulty,
        GameStep::Length,
        GameStep::Adult,
        GameStep::Summary,
    ];
}

impl GameStep {
    pub(crate) fn title(self) -> &'static str {
        match self {
            GameStep::Theme => "Story Theme",
            GameStep::Difficulty => "Difficulty",
            GameStep::Length => "Story Length",
            GameStep::Adult => "Adult Content",
            GameStep::Summary => "Summary",
        }
    }
}

pub(crate) const ADULT_OPTIONS: [&str; 2] = ["No", "Yes"];

#[derive(Debug, Clone)]
pub(crate) struct GameSetupWizard {
    pub(crate) step: GameStep,
    pub(crate) draft: GameConfig,
    pub(crate) theme_field: TextField,
    pub(crate) difficulty: Choice,
    pub(crate) length: Choice,
    pub(crate) adult: Choice,
    pub(crate) summary: Choice,
}

impl GameSetupWizard {
    pub(crate) fn new() -> Self {
        let draft = GameConfig::new();
        let mut wizard = Self {
            step: GameStep::first(),
            theme_field: TextField::new(),
            difficulty: Choice::new(Difficulty::ALL.len()),
            length: Choice::new(StoryLength::ALL.len()),
            adult: Choice::new(ADULT_OPTIONS.len()),
            summary: Choice::new(2),
            draft,
        };
        wizard.sync_cursors();
        wizard
    }

    /// Points every cursor at the value currently held by the draft.
    fn sync_cursors(&mut self) {
        self.difficulty.select(self.draft.difficulty().index());
        self.length.select(self.draft.length().index());
        self.adult.select(usize::from(self.draft.adult_content()));
    }

    /// Writes the current step's input into the draft. On failure the error
    /// is surfaced on the step and the wizard stays put.
    fn commit_step(&mut self) -> bool {
        let result = match self.step {
            GameStep::Theme => self.draft.set_theme(self.theme_field.value()),
            GameStep::Difficulty => self
                .draft
                .set_difficulty(Difficulty::ALL[self.difficulty.selected()]),
            GameStep::Length => self.draft.set_length(StoryLength::ALL[self.length.selected()]),
            GameStep::Adult => self.draft.set_adult_content(self.adult.selected() == 1),
            GameStep::Summary => Ok(()),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                if self.step == GameStep::Theme {
                    self.theme_field.error = Some(e.to_string());
                } else {
                    tracing::warn!(error = %e, step = ?self.step, "draft rejected step value");
                }
                false
            }
        }
    }

    fn advance(&mut self) {
        if self.commit_step() {
            if let Some(next) = self.step.next() {
                self.enter(next);
            }
        }
    }

    fn enter(&mut self, step: GameStep) {
        if step == GameStep::Theme {
            let current = self.draft.theme().to_string();
            self.theme_field.set_value(&current);
        }
        if step == GameStep::Summary {
            self.summary = Choice::new(2);
        }
        self.sync_cursors();
        self.step = step;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::components::wizard::WizardMsg;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(mut wizard: GameSetupWizard, text: &str) -> GameSetupWizard {
        for c in text.chars() {
            wizard = wizard.update(key(KeyCode::Char(c))).state;
        }
        wizard
    }

    fn press(wizard: GameSetupWizard, code: KeyCode) -> (GameSetupWizard, Option<WizardMsg<GameConfig>>) {
        let t = wizard.update(key(code));
        (t.state, t.message)
    }

    #[test]
    fn test_short_theme_rejected_then_cjk_theme_accepted() {
        let wizard = type_text(GameSetupWizard::new(), "ab");
        let (wizard, message) = press(wizard, KeyCode::Enter);
        assert_eq!(message, None);
        assert_eq!(wizard.step, GameStep::Theme);
        assert!(wizard.theme_field.error.is_some());

        let (wizard, _) = press(wizard, KeyCode::Backspace);
        let (wizard, _) = press(wizard, KeyCode::Backspace);
        let wizard = type_text(wizard, "廢棄醫院");
        let (wizard, _) = press(wizard, KeyCode::Enter);
        assert_eq!(wizard.step, GameStep::Difficulty);
        assert_eq!(wizard.draft.theme(), "廢棄醫院");
    }

    #[test]
    fn test_escape_on_first_step_cancels() {
        let (_, message) = press(GameSetupWizard::new(), KeyCode::Esc);
        assert_eq!(message, Some(WizardMsg::Cancelled));
    }

    #[test]
    fn test_back_needs_no_validation() {
        let wizard = type_text(GameSetupWizard::new(), "Lighthouse");
        let (wizard, _) = press(wizard, KeyCode::Enter);
        let (wizard, _) = press(wizard, KeyCode::Char('3'));
        assert_eq!(wizard.step, GameStep::Length);

        let (wizard, message) = press(wizard, KeyCode::Esc);
        assert_eq!(message, None);
        assert_eq!(wizard.step, GameStep::Difficulty);
        assert_eq!(wizard.difficulty.selected(), 2);

        let (wizard, _) = press(wizard, KeyCode::Esc);
        assert_eq!(wizard.step, GameStep::Theme);
        assert_eq!(wizard.theme_field.value(), "Lighthouse");
    }

    #[test]
    fn test_full_run_with_shortcuts_and_arrows() {
        let wizard = type_text(GameSetupWizard::new(), "Night train");
        let (wizard, _) = press(wizard, KeyCode::Enter);
        let (wizard, _) = press(wizard, KeyCode::Down);
        let (wizard, _) = press(wizard, KeyCode::Enter);
        let (wizard, _) = press(wizard, KeyCode::Char('3'));
        let (wizard, _) = press(wizard, KeyCode::Char('2'));
        assert_eq!(wizard.step, GameStep::Summary);

        let (_, message) = press(wizard, KeyCode::Enter);
        let Some(WizardMsg::Done(config)) = message else {
            panic!("expected a finished configuration");
        };
        assert_eq!(config.theme(), "Night train");
        assert_eq!(config.difficulty(), Difficulty::Hard);
        assert_eq!(config.length(), StoryLength::Long);
        assert!(config.adult_content());
        assert!(!config.is_frozen());
    }

    #[test]
    fn test_edit_restores_every_cursor_and_reproduces_summary() {
        let wizard = type_text(GameSetupWizard::new(), "Deep sea station");
        let (wizard, _) = press(wizard, KeyCode::Enter);
        let (wizard, _) = press(wizard, KeyCode::Char('3'));
        let (wizard, _) = press(wizard, KeyCode::Char('1'));
        let (wizard, _) = press(wizard, KeyCode::Char('2'));
        let before = wizard.draft.clone();

        let (wizard, _) = press(wizard, KeyCode::Down);
        let (wizard, message) = press(wizard, KeyCode::Enter);
        assert_eq!(message, None);
        assert_eq!(wizard.step, GameStep::Theme);
        assert_eq!(wizard.theme_field.value(), "Deep sea station");
        assert_eq!(wizard.difficulty.selected(), 2);
        assert_eq!(wizard.length.selected(), 0);
        assert_eq!(wizard.adult.selected(), 1);

        let mut wizard = wizard;
        for _ in 0..4 {
            wizard = wizard.update(key(KeyCode::Enter)).state;
        }
        assert_eq!(wizard.step, GameStep::Summary);
        assert_eq!(wizard.draft, before);

        let (_, message) = press(wizard, KeyCode::Enter);
        assert_eq!(message, Some(WizardMsg::Done(before)));
    }

    #[test]
    fn test_last_entered_value_wins() {
        let wizard = type_text(GameSetupWizard::new(), "Old mill");
        let (wizard, _) = press(wizard, KeyCode::Enter);
        let (wizard, _) = press(wizard, KeyCode::Char('3'));
        let (wizard, _) = press(wizard, KeyCode::Esc);
        let (wizard, _) = press(wizard, KeyCode::Char('1'));
        let (wizard, _) = press(wizard, KeyCode::Char('1'));
        let (wizard, _) = press(wizard, KeyCode::Char('1'));
        assert_eq!(wizard.step, GameStep::Summary);
        assert_eq!(wizard.draft.difficulty(), Difficulty::Easy);
        assert_eq!(wizard.draft.length(), StoryLength::Short);
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let wizard = type_text(GameSetupWizard::new(), "Old mill");
        let (wizard, _) = press(wizard, KeyCode::Enter);
        let (wizard, _) = press(wizard, KeyCode::Char('7'));
        assert_eq!(wizard.step, GameStep::Difficulty);
        assert_eq!(wizard.difficulty.selected(), 0);
    }
}

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

//! Input handling for the game setup wizard.

use crossterm::event::{KeyCode, KeyEvent};

use crate::{
    components::{
        Transition,
        wizard::{
            StepOrder, SummaryAction, WizardMsg,
            game_setup::{GameSetupWizard, GameStep},
        },
    },
    model::GameConfig,
};

impl GameSetupWizard {
    pub(crate) fn update(mut self, key: KeyEvent) -> Transition<Self, WizardMsg<GameConfig>> {
        if key.code == KeyCode::Esc {
            return match self.step.previous() {
                Some(previous) => {
                    self.enter(previous);
                    Transition::stay(self)
                }
                None => Transition::emit(self, WizardMsg::Cancelled),
            };
        }

        match self.step {
            GameStep::Theme => match key.code {
                KeyCode::Enter => self.advance(),
                _ => self.theme_field.handle_key(key),
            },

            GameStep::Difficulty | GameStep::Length | GameStep::Adult => {
                let choice = match self.step {
                    GameStep::Difficulty => &mut self.difficulty,
                    GameStep::Length => &mut self.length,
                    _ => &mut self.adult,
                };

                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => choice.up(),
                    KeyCode::Down | KeyCode::Char('j') => choice.down(),
                    KeyCode::Char(c) if c.is_ascii_digit() => {
                        if choice.pick_digit(c) {
                            self.advance();
                        }
                    }
                    KeyCode::Enter => self.advance(),
                    _ => {}
                }
            }

            GameStep::Summary => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.summary.up(),
                KeyCode::Down | KeyCode::Char('j') => self.summary.down(),
                KeyCode::Char('e') => self.enter(GameStep::first()),
                KeyCode::Char('y') => return self.confirm(),
                KeyCode::Enter => match SummaryAction::from_choice(self.summary) {
                    SummaryAction::Confirm => return self.confirm(),
                    SummaryAction::Edit => self.enter(GameStep::first()),
                },
                _ => {}
            },
        }

        Transition::stay(self)
    }

    fn confirm(self) -> Transition<Self, WizardMsg<GameConfig>> {
        let draft = self.draft.clone();
        Transition::emit(self, WizardMsg::Done(draft))
    }
}

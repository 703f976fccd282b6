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

//! Input handling for the provider setup wizard.

use crossterm::event::{KeyCode, KeyEvent};

use crate::components::{
    Transition,
    wizard::{
        StepOrder, SummaryAction, WizardMsg,
        api_setup::{ApiSetup, ApiSetupWizard, ApiStep, TestState},
    },
};

impl ApiSetupWizard {
    pub(crate) fn update(mut self, key: KeyEvent) -> Transition<Self, WizardMsg<ApiSetup>> {
        if key.code == KeyCode::Esc {
            // The test step is transient, so stepping back from the summary
            // lands on the key entry.
            return match self.step {
                ApiStep::Provider => Transition::emit(self, WizardMsg::Cancelled),
                ApiStep::Test | ApiStep::Summary => {
                    self.back_to(ApiStep::ApiKey);
                    Transition::stay(self)
                }
                step => {
                    if let Some(previous) = step.previous() {
                        self.back_to(previous);
                    }
                    Transition::stay(self)
                }
            };
        }

        match self.step {
            ApiStep::Provider => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.provider.up(),
                KeyCode::Down | KeyCode::Char('j') => self.provider.down(),
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if self.provider.pick_digit(c) {
                        self.step = ApiStep::ApiKey;
                    }
                }
                KeyCode::Enter if self.selected_provider().is_some() => {
                    self.step = ApiStep::ApiKey;
                }
                _ => {}
            },

            ApiStep::ApiKey => match key.code {
                KeyCode::Enter => {
                    if self.validate_key() {
                        let commands = self.start_test();
                        return Transition::stay(self).with_commands(commands);
                    }
                }
                _ => self.key_field.handle_key(key),
            },

            ApiStep::Test => {
                if key.code == KeyCode::Enter && matches!(self.test, TestState::Failed { .. }) {
                    let commands = self.start_test();
                    return Transition::stay(self).with_commands(commands);
                }
            }

            ApiStep::Summary => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.summary.up(),
                KeyCode::Down | KeyCode::Char('j') => self.summary.down(),
                KeyCode::Char('e') => self.back_to(ApiStep::first()),
                KeyCode::Char('y') => return self.confirm(),
                KeyCode::Enter => match SummaryAction::from_choice(self.summary) {
                    SummaryAction::Confirm => return self.confirm(),
                    SummaryAction::Edit => self.back_to(ApiStep::first()),
                },
                _ => {}
            },
        }

        Transition::stay(self)
    }

    fn confirm(self) -> Transition<Self, WizardMsg<ApiSetup>> {
        match self.result() {
            Some(setup) => Transition::emit(self, WizardMsg::Done(setup)),
            None => Transition::stay(self),
        }
    }
}

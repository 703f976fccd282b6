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

//! Input handling for the game screen.
//!
//! Keys go to whichever phase is showing. The playing placeholder takes no
//! input of its own.

use crossterm::event::KeyEvent;

use crate::components::{
    Transition,
    death::DeathChoice,
    debrief::DebriefChoice,
    game::{GameMsg, GamePhase, GameScreen},
};

impl GameScreen {
    pub(crate) fn update(mut self, key: KeyEvent) -> Transition<Self, GameMsg> {
        let phase = std::mem::replace(&mut self.phase, GamePhase::Playing(Default::default()));

        match phase {
            GamePhase::Playing(play) => {
                self.phase = GamePhase::Playing(play);
                Transition::stay(self)
            }
            GamePhase::Dying(death) => {
                let t = death.update(key);
                match t.message {
                    Some(DeathChoice::ViewReport) => {
                        self.show_debrief(t.state.report);
                        Transition::stay(self)
                    }
                    Some(DeathChoice::ReturnToMenu) => {
                        self.phase = GamePhase::Dying(t.state);
                        Transition::emit(self, GameMsg::ReturnToMenu)
                    }
                    None => {
                        self.phase = GamePhase::Dying(t.state);
                        Transition::stay(self)
                    }
                }
            }
            GamePhase::Debrief(browser) => {
                let t = browser.update(key);
                match t.message {
                    Some(DebriefChoice::Rollback(checkpoint)) => {
                        let commands = self.resume(checkpoint.chapter);
                        Transition::stay(self).with_commands(commands)
                    }
                    Some(DebriefChoice::NewGame) => {
                        self.phase = GamePhase::Debrief(t.state);
                        Transition::emit(self, GameMsg::NewGame)
                    }
                    Some(DebriefChoice::ReturnToMenu) => {
                        self.phase = GamePhase::Debrief(t.state);
                        Transition::emit(self, GameMsg::ReturnToMenu)
                    }
                    None => {
                        self.phase = GamePhase::Debrief(t.state);
                        Transition::stay(self)
                    }
                }
            }
        }
    }
}

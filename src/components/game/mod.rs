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

//! The game screen.
//!
//! Hosts a run from start to finish: the playing placeholder, the death
//! sequence once the run ends, and the debrief browser after that. While
//! playing, an elapsed counter and a rotating line of flavour text are kept
//! alive by self re-arming timers.

mod event;
mod render;

use std::collections::HashSet;

use crate::{
    actions::{commands::AppCommand, events::TickKind},
    components::{death::DeathSequence, debrief::ReportBrowser},
    model::{DebriefReport, GameConfig},
};

pub(crate) const FLAVOR_TEXT: [&str; 6] = [
    "The corridor is longer than it was a moment ago.",
    "Somewhere above, a door closes softly.",
    "The lights flicker in a rhythm that almost sounds like breathing.",
    "You are sure the painting was facing the other way.",
    "A radio plays static in an empty room.",
    "Your footsteps echo one beat too late.",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PlayState {
    pub(crate) chapter: u32,
    pub(crate) elapsed_secs: u64,
    pub(crate) flavor_index: usize,
}

impl PlayState {
    fn at_chapter(chapter: u32) -> Self {
        Self {
            chapter,
            elapsed_secs: 0,
            flavor_index: 0,
        }
    }

    pub(crate) fn flavor(&self) -> &'static str {
        FLAVOR_TEXT[self.flavor_index % FLAVOR_TEXT.len()]
    }
}

#[derive(Debug, Clone)]
pub(crate) enum GamePhase {
    Playing(PlayState),
    Dying(DeathSequence),
    Debrief(ReportBrowser),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameMsg {
    NewGame,
    ReturnToMenu,
}

#[derive(Debug, Clone)]
pub(crate) struct GameScreen {
    pub(crate) config: GameConfig,
    pub(crate) phase: GamePhase,
    /// Timers in flight; a kind is never armed twice.
    armed: HashSet<TickKind>,
    terminal_height: u16,
}

impl GameScreen {
    /// Starts a run at chapter one and returns the timers it needs.
    pub(crate) fn start(config: GameConfig, terminal_height: u16) -> (Self, Vec<AppCommand>) {
        let mut screen = Self {
            config,
            phase: GamePhase::Playing(PlayState::at_chapter(1)),
            armed: HashSet::new(),
            terminal_height,
        };
        let commands = screen.arm_playing();
        (screen, commands)
    }

    fn arm(&mut self, kind: TickKind) -> Option<AppCommand> {
        self.armed.insert(kind).then(|| AppCommand::schedule(kind))
    }

    fn arm_playing(&mut self) -> Vec<AppCommand> {
        [TickKind::Elapsed, TickKind::FlavorRotate]
            .into_iter()
            .filter_map(|kind| self.arm(kind))
            .collect()
    }

    pub(crate) fn set_terminal_height(&mut self, height: u16) {
        self.terminal_height = height;
        if let GamePhase::Debrief(browser) = &mut self.phase {
            browser.set_terminal_height(height);
        }
    }

    /// Handles a timer firing. Kinds the current phase has no use for are
    /// dropped without re-arming.
    pub(crate) fn tick(mut self, kind: TickKind) -> (Self, Vec<AppCommand>) {
        self.armed.remove(&kind);

        let wanted: Vec<TickKind> = match &mut self.phase {
            GamePhase::Playing(play) => match kind {
                TickKind::Elapsed => {
                    play.elapsed_secs += 1;
                    vec![kind]
                }
                TickKind::FlavorRotate => {
                    play.flavor_index = (play.flavor_index + 1) % FLAVOR_TEXT.len();
                    vec![kind]
                }
                _ => vec![],
            },
            GamePhase::Dying(death) => death.tick(kind),
            GamePhase::Debrief(_) => vec![],
        };

        let commands = wanted.into_iter().filter_map(|k| self.arm(k)).collect();
        (self, commands)
    }

    /// Ends the run in progress and starts the death sequence.
    pub(crate) fn run_ended(mut self, report: DebriefReport) -> (Self, Vec<AppCommand>) {
        if !matches!(self.phase, GamePhase::Playing(_)) {
            tracing::warn!("run ended while no run was in progress, ignoring");
            return (self, vec![]);
        }

        tracing::info!(death = ?report.death.kind, chapter = report.death.chapter, "run ended");
        self.phase = GamePhase::Dying(DeathSequence::new(report));
        let commands = self.arm(TickKind::DeathFrame).into_iter().collect();
        (self, commands)
    }

    fn show_debrief(&mut self, report: DebriefReport) {
        self.phase = GamePhase::Debrief(ReportBrowser::new(report, self.terminal_height));
    }

    /// Resumes play from a checkpoint's chapter.
    fn resume(&mut self, chapter: u32) -> Vec<AppCommand> {
        tracing::info!(chapter, "rolling back to checkpoint");
        self.phase = GamePhase::Playing(PlayState::at_chapter(chapter));
        self.arm_playing()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::{
        components::death::TRANSITION_FRAMES,
        model::{DeathType, Difficulty, debrief::fixtures},
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn scheduled(commands: &[AppCommand]) -> Vec<TickKind> {
        commands
            .iter()
            .filter_map(|c| match c {
                AppCommand::ScheduleTick(tick) => Some(tick.kind),
                _ => None,
            })
            .collect()
    }

    fn started() -> GameScreen {
        let mut config = GameConfig::new();
        config.set_theme("abandoned hospital").unwrap();
        config.freeze();
        GameScreen::start(config, 40).0
    }

    fn dead(kind: DeathType, difficulty: Difficulty, checkpoints: usize) -> GameScreen {
        let (mut screen, _) = started().run_ended(fixtures::report(difficulty, kind, checkpoints));
        for _ in 0..TRANSITION_FRAMES {
            screen = screen.tick(TickKind::DeathFrame).0;
        }
        screen
    }

    #[test]
    fn test_start_arms_playing_timers_once() {
        let mut config = GameConfig::new();
        config.freeze();
        let (screen, commands) = GameScreen::start(config, 40);
        let kinds = scheduled(&commands);
        assert_eq!(kinds.len(), 2);
        assert!(kinds.contains(&TickKind::Elapsed));
        assert!(kinds.contains(&TickKind::FlavorRotate));

        let (screen, commands) = screen.tick(TickKind::Elapsed);
        assert_eq!(scheduled(&commands), vec![TickKind::Elapsed]);
        let GamePhase::Playing(play) = screen.phase else {
            panic!("expected playing");
        };
        assert_eq!(play.elapsed_secs, 1);
    }

    #[test]
    fn test_flavor_rotates_and_wraps() {
        let mut screen = started();
        for _ in 0..FLAVOR_TEXT.len() {
            screen = screen.tick(TickKind::FlavorRotate).0;
        }
        let GamePhase::Playing(play) = screen.phase else {
            panic!("expected playing");
        };
        assert_eq!(play.flavor_index, 0);
    }

    #[test]
    fn test_unwanted_ticks_are_dropped() {
        let (screen, commands) = started().tick(TickKind::ConnectionSpinner);
        assert!(commands.is_empty());

        let (screen, _) = screen.run_ended(fixtures::report(Difficulty::Easy, DeathType::Exhaustion, 0));
        let (_, commands) = screen.tick(TickKind::Elapsed);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_run_end_starts_death_sequence() {
        let (screen, commands) =
            started().run_ended(fixtures::report(Difficulty::Easy, DeathType::Exhaustion, 0));
        assert!(matches!(screen.phase, GamePhase::Dying(_)));
        assert_eq!(scheduled(&commands), vec![TickKind::DeathFrame]);

        // A second report while dying changes nothing
        let (screen, commands) =
            screen.run_ended(fixtures::report(Difficulty::Hell, DeathType::SanityCollapse, 0));
        assert!(commands.is_empty());
        let GamePhase::Dying(death) = screen.phase else {
            panic!("expected dying");
        };
        assert_eq!(death.report.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_view_report_opens_debrief() {
        let screen = dead(DeathType::RuleViolation, Difficulty::Hard, 2);
        let t = screen.update(key(KeyCode::Enter));
        assert_eq!(t.message, None);
        assert!(matches!(t.state.phase, GamePhase::Debrief(_)));
    }

    #[test]
    fn test_death_return_to_menu() {
        let screen = dead(DeathType::RuleViolation, Difficulty::Hard, 0);
        let t = screen.update(key(KeyCode::Char('2')));
        assert_eq!(t.message, Some(GameMsg::ReturnToMenu));
    }

    #[test]
    fn test_rollback_resumes_latest_checkpoint() {
        let screen = dead(DeathType::Exhaustion, Difficulty::Easy, 3);
        let screen = screen.update(key(KeyCode::Enter)).state;

        // Options section, first entry is the rollback
        let screen = screen.update(key(KeyCode::BackTab)).state;
        let t = screen.update(key(KeyCode::Enter));
        assert_eq!(t.message, None);

        // The playing timers from before the death are still in flight
        assert!(t.commands.is_empty());
        let (screen, commands) = t.state.tick(TickKind::Elapsed);
        assert_eq!(scheduled(&commands), vec![TickKind::Elapsed]);

        let GamePhase::Playing(play) = screen.phase else {
            panic!("expected playing");
        };
        assert_eq!(play.chapter, 3);
        assert_eq!(play.elapsed_secs, 1);
    }

    #[test]
    fn test_rollback_rearms_timers_that_ran_out() {
        let mut screen = dead(DeathType::Exhaustion, Difficulty::Easy, 1);
        screen = screen.tick(TickKind::Elapsed).0;
        screen = screen.tick(TickKind::FlavorRotate).0;

        let screen = screen.update(key(KeyCode::Enter)).state;
        let screen = screen.update(key(KeyCode::BackTab)).state;
        let t = screen.update(key(KeyCode::Enter));
        let kinds = scheduled(&t.commands);
        assert_eq!(kinds.len(), 2);
        assert!(kinds.contains(&TickKind::Elapsed));
        assert!(kinds.contains(&TickKind::FlavorRotate));
    }

    #[test]
    fn test_debrief_new_game() {
        let screen = dead(DeathType::Exhaustion, Difficulty::Hell, 3);
        let screen = screen.update(key(KeyCode::Enter)).state;
        let screen = screen.update(key(KeyCode::BackTab)).state;
        let t = screen.update(key(KeyCode::Enter));
        assert_eq!(t.message, Some(GameMsg::NewGame));
    }
}

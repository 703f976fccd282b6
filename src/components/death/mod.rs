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

//! Death sequence.
//!
//! A short frame-counted transition played when a run ends, followed by a
//! settled screen offering the debrief or a return to the menu. Input is
//! swallowed until the transition has played out. A sanity collapse
//! settles into a heightened variant that keeps a faster timer running to
//! jitter and corrupt the text on screen.

mod event;
mod render;

use std::time::Duration;

use crate::{
    actions::events::TickKind,
    model::{DeathType, DebriefReport},
};

pub(crate) const TRANSITION_FRAMES: u32 = 30;
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(100);
pub(crate) const GLITCH_INTERVAL: Duration = Duration::from_millis(150);
pub(crate) const MAX_JITTER: i8 = 2;

const EARLY_TEXT: &str = "Something is wrong...";
const MIDDLE_TEXT: &str = "The world is slipping away...";
const LATE_TEXT: &str = "Darkness.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeathPhase {
    Transition,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeathVariant {
    Normal,
    Heightened,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeathChoice {
    ViewReport,
    ReturnToMenu,
}

impl DeathChoice {
    pub(crate) const ALL: [DeathChoice; 2] = [DeathChoice::ViewReport, DeathChoice::ReturnToMenu];

    pub(crate) fn label(self) -> &'static str {
        match self {
            DeathChoice::ViewReport => "View debrief",
            DeathChoice::ReturnToMenu => "Return to menu",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DeathSequence {
    pub(crate) report: DebriefReport,
    pub(crate) phase: DeathPhase,
    pub(crate) frame: u32,
    pub(crate) selected: usize,
    /// Horizontal offset applied by the renderer in the heightened variant.
    pub(crate) jitter: i8,
    /// Bumped on every glitch tick so the renderer re-rolls its corruption.
    pub(crate) glitch_seed: u64,
}

impl DeathSequence {
    /// Creates the sequence; the caller arms the first [`TickKind::DeathFrame`].
    pub(crate) fn new(report: DebriefReport) -> Self {
        Self {
            report,
            phase: DeathPhase::Transition,
            frame: 0,
            selected: 0,
            jitter: 0,
            glitch_seed: 0,
        }
    }

    pub(crate) fn variant(&self) -> DeathVariant {
        match self.report.death.kind {
            DeathType::SanityCollapse => DeathVariant::Heightened,
            DeathType::Exhaustion | DeathType::RuleViolation => DeathVariant::Normal,
        }
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.phase == DeathPhase::Settled
    }

    /// Text shown during the transition, by which third of it we are in.
    pub(crate) fn transition_text(&self) -> &'static str {
        let window = TRANSITION_FRAMES / 3;
        if self.frame < window {
            EARLY_TEXT
        } else if self.frame < window * 2 {
            MIDDLE_TEXT
        } else {
            LATE_TEXT
        }
    }

    /// Advances one transition frame and returns whether another frame tick
    /// is wanted.
    pub(crate) fn advance_frame(&mut self) -> bool {
        if self.phase != DeathPhase::Transition {
            return false;
        }

        self.frame += 1;
        if self.frame >= TRANSITION_FRAMES {
            self.phase = DeathPhase::Settled;
            tracing::debug!(variant = ?self.variant(), "death sequence settled");
            return false;
        }
        true
    }

    /// Re-rolls the jitter for the heightened variant and returns whether
    /// another glitch tick is wanted.
    pub(crate) fn glitch(&mut self) -> bool {
        if !self.is_settled() || self.variant() != DeathVariant::Heightened {
            return false;
        }

        self.jitter = rand::random_range(-MAX_JITTER..=MAX_JITTER);
        self.glitch_seed = self.glitch_seed.wrapping_add(1);
        true
    }

    /// Handles a timer firing, returning the ticks to arm next.
    pub(crate) fn tick(&mut self, kind: TickKind) -> Vec<TickKind> {
        match kind {
            TickKind::DeathFrame => {
                if self.advance_frame() {
                    vec![TickKind::DeathFrame]
                } else if self.is_settled() && self.variant() == DeathVariant::Heightened {
                    vec![TickKind::DeathGlitch]
                } else {
                    vec![]
                }
            }
            TickKind::DeathGlitch => {
                if self.glitch() {
                    vec![TickKind::DeathGlitch]
                } else {
                    vec![]
                }
            }
            _ => vec![],
        }
    }
}

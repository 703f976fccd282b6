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

//! Debrief report data.
//!
//! The report is assembled while a run is played and handed over, read-only,
//! to the report browser when the run ends.

use serde::{Deserialize, Serialize};

use crate::model::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum DeathType {
    /// Health ran out.
    Exhaustion,
    RuleViolation,
    SanityCollapse,
}

impl DeathType {
    pub(crate) fn label(self) -> &'static str {
        match self {
            DeathType::Exhaustion => "Body gave out",
            DeathType::RuleViolation => "Broke a rule",
            DeathType::SanityCollapse => "Mind shattered",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Resources {
    pub(crate) health: i32,
    pub(crate) sanity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DeathInfo {
    pub(crate) kind: DeathType,
    pub(crate) chapter: u32,
    pub(crate) description: String,
    pub(crate) resources: Resources,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RuleReveal {
    pub(crate) rule: String,
    pub(crate) clues_found: Vec<String>,
    pub(crate) clues_missed: Vec<String>,
    pub(crate) explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ClueRecord {
    pub(crate) content: String,
    pub(crate) chapter: u32,
    pub(crate) discovered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DecisionPoint {
    pub(crate) chapter: u32,
    pub(crate) choices: Vec<String>,
    pub(crate) selected: usize,
    pub(crate) significant: bool,
    pub(crate) consequence: Option<String>,
    pub(crate) hallucination: bool,
}

impl DecisionPoint {
    /// The selected choice text, if the recorded index is in range.
    pub(crate) fn selected_choice(&self) -> Option<&str> {
        self.choices.get(self.selected).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Checkpoint {
    pub(crate) chapter: u32,
    pub(crate) resources: Resources,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DebriefReport {
    pub(crate) difficulty: Difficulty,
    pub(crate) death: DeathInfo,
    pub(crate) rules: Vec<RuleReveal>,
    pub(crate) clues: Vec<ClueRecord>,
    pub(crate) decisions: Vec<DecisionPoint>,
    pub(crate) checkpoints: Vec<Checkpoint>,
}

impl DebriefReport {
    pub(crate) fn missed_clues(&self) -> Vec<&ClueRecord> {
        self.clues.iter().filter(|c| !c.discovered).collect()
    }

    pub(crate) fn discovered_clue_count(&self) -> usize {
        self.clues.iter().filter(|c| c.discovered).count()
    }

    pub(crate) fn can_rollback(&self) -> bool {
        self.difficulty.allows_rollback() && !self.checkpoints.is_empty()
    }

    /// The most advanced checkpoint, used as the rollback target.
    pub(crate) fn latest_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.iter().max_by_key(|c| c.chapter)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn report(difficulty: Difficulty, kind: DeathType, checkpoints: usize) -> DebriefReport {
        DebriefReport {
            difficulty,
            death: DeathInfo {
                kind,
                chapter: 3,
                description: "The lights went out on the third floor.".to_string(),
                resources: Resources { health: 0, sanity: 12 },
            },
            rules: vec![
                RuleReveal {
                    rule: "Never answer the night nurse".to_string(),
                    clues_found: vec!["Scratched note in room 302".to_string()],
                    clues_missed: vec!["Tape recording in the basement".to_string()],
                    explanation: Some("The nurse only exists when spoken to.".to_string()),
                },
                RuleReveal {
                    rule: "Count the stairs".to_string(),
                    clues_found: vec![],
                    clues_missed: vec!["Number painted on the landing".to_string()],
                    explanation: None,
                },
            ],
            clues: vec![
                ClueRecord { content: "Scratched note".to_string(), chapter: 1, discovered: true },
                ClueRecord { content: "Tape recording".to_string(), chapter: 2, discovered: false },
                ClueRecord { content: "Painted number".to_string(), chapter: 2, discovered: false },
            ],
            decisions: vec![DecisionPoint {
                chapter: 2,
                choices: vec!["Answer".to_string(), "Stay silent".to_string()],
                selected: 0,
                significant: true,
                consequence: Some("The nurse turned around.".to_string()),
                hallucination: false,
            }],
            checkpoints: (0..checkpoints)
                .map(|i| Checkpoint {
                    chapter: i as u32 + 1,
                    resources: Resources { health: 80, sanity: 70 },
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollback_needs_permission_and_checkpoint() {
        assert!(!fixtures::report(Difficulty::Easy, DeathType::Exhaustion, 0).can_rollback());
        assert!(fixtures::report(Difficulty::Easy, DeathType::Exhaustion, 1).can_rollback());
        assert!(!fixtures::report(Difficulty::Hell, DeathType::Exhaustion, 2).can_rollback());
    }

    #[test]
    fn test_latest_checkpoint_is_highest_chapter() {
        let report = fixtures::report(Difficulty::Hard, DeathType::RuleViolation, 3);
        assert_eq!(report.latest_checkpoint().map(|c| c.chapter), Some(3));
    }

    #[test]
    fn test_missed_clues_only_undiscovered() {
        let report = fixtures::report(Difficulty::Hard, DeathType::RuleViolation, 0);
        assert_eq!(report.missed_clues().len(), 2);
        assert_eq!(report.discovered_clue_count(), 1);
    }

    #[test]
    fn test_selected_choice_is_bounds_checked() {
        let mut decision = fixtures::report(Difficulty::Easy, DeathType::Exhaustion, 0).decisions[0].clone();
        assert_eq!(decision.selected_choice(), Some("Answer"));
        decision.selected = 9;
        assert_eq!(decision.selected_choice(), None);
    }
}

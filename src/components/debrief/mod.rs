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

//! Post-run debrief browser.
//!
//! Five sections in a fixed order: summary, the rules that were triggered,
//! the clues that were missed, the key decisions, and the options for what
//! to do next. Each section keeps its own item cursor. Rules and clues can
//! be expanded one at a time or all at once, and the whole view scrolls
//! within bounds computed from an estimate of its rendered height.

mod event;
mod render;

use std::collections::HashMap;

use crate::model::{Checkpoint, DebriefReport};

pub(crate) const SCROLL_STEP: u16 = 5;

/// Rows taken by the frame around the scrolled content.
const CHROME_ROWS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Section {
    Summary,
    Rules,
    Clues,
    Decisions,
    Options,
}

impl Section {
    pub(crate) const ALL: [Section; 5] = [
        Section::Summary,
        Section::Rules,
        Section::Clues,
        Section::Decisions,
        Section::Options,
    ];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Section::Summary => "Summary",
            Section::Rules => "Triggered Rules",
            Section::Clues => "Missed Clues",
            Section::Decisions => "Key Decisions",
            Section::Options => "What Next",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// The following section, stopping at the last.
    pub(crate) fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// The preceding section, stopping at the first.
    pub(crate) fn previous(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    pub(crate) fn cycle_next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub(crate) fn cycle_previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DebriefChoice {
    Rollback(Checkpoint),
    NewGame,
    ReturnToMenu,
}

impl DebriefChoice {
    pub(crate) fn label(&self) -> String {
        match self {
            DebriefChoice::Rollback(checkpoint) => {
                format!("Roll back to chapter {}", checkpoint.chapter)
            }
            DebriefChoice::NewGame => "New game".to_string(),
            DebriefChoice::ReturnToMenu => "Return to menu".to_string(),
        }
    }
}

fn compute_options(report: &DebriefReport) -> Vec<DebriefChoice> {
    let mut options = Vec::with_capacity(3);
    if report.can_rollback() {
        if let Some(checkpoint) = report.latest_checkpoint() {
            options.push(DebriefChoice::Rollback(*checkpoint));
        }
    }
    options.push(DebriefChoice::NewGame);
    options.push(DebriefChoice::ReturnToMenu);
    options
}

#[derive(Debug, Clone)]
pub(crate) struct ReportBrowser {
    pub(crate) report: DebriefReport,
    pub(crate) options: Vec<DebriefChoice>,
    pub(crate) section: Section,
    cursors: HashMap<Section, usize>,
    expanded: HashMap<Section, HashMap<usize, bool>>,
    pub(crate) scroll: u16,
    viewport_height: u16,
}

impl ReportBrowser {
    pub(crate) fn new(report: DebriefReport, terminal_height: u16) -> Self {
        let mut browser = Self {
            options: vec![],
            report,
            section: Section::Summary,
            cursors: HashMap::new(),
            expanded: HashMap::new(),
            scroll: 0,
            viewport_height: terminal_height.saturating_sub(CHROME_ROWS),
        };
        browser.options = compute_options(&browser.report);
        browser
    }

    /// Swaps in new report data, recomputing the options and dropping
    /// per-item state that referred to the old data. Called by the narrative
    /// engine once it can revise a report.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn set_report(&mut self, report: DebriefReport) {
        self.options = compute_options(&report);
        self.report = report;
        self.cursors.clear();
        self.expanded.clear();
        self.scroll = 0;
    }

    pub(crate) fn set_terminal_height(&mut self, height: u16) {
        self.viewport_height = height.saturating_sub(CHROME_ROWS);
        self.clamp_scroll();
    }

    pub(crate) fn item_count(&self, section: Section) -> usize {
        match section {
            Section::Summary => 0,
            Section::Rules => self.report.rules.len(),
            Section::Clues => self.report.missed_clues().len(),
            Section::Decisions => self.report.decisions.len(),
            Section::Options => self.options.len(),
        }
    }

    pub(crate) fn cursor(&self, section: Section) -> usize {
        self.cursors.get(&section).copied().unwrap_or(0)
    }

    pub(crate) fn is_expanded(&self, section: Section, index: usize) -> bool {
        self.expanded
            .get(&section)
            .and_then(|items| items.get(&index))
            .copied()
            .unwrap_or(false)
    }

    fn expandable(section: Section) -> bool {
        matches!(section, Section::Rules | Section::Clues)
    }

    pub(crate) fn toggle(&mut self, section: Section, index: usize) {
        if !Self::expandable(section) || index >= self.item_count(section) {
            return;
        }
        let state = self.expanded.entry(section).or_default().entry(index).or_insert(false);
        *state = !*state;
        self.clamp_scroll();
    }

    fn set_all_expanded(&mut self, section: Section, expanded: bool) {
        if !Self::expandable(section) {
            return;
        }
        let count = self.item_count(section);
        let items = self.expanded.entry(section).or_default();
        for index in 0..count {
            items.insert(index, expanded);
        }
        self.clamp_scroll();
    }

    pub(crate) fn expand_all(&mut self) {
        self.set_all_expanded(self.section, true);
    }

    pub(crate) fn collapse_all(&mut self) {
        self.set_all_expanded(self.section, false);
    }

    fn move_cursor_down(&mut self) {
        let count = self.item_count(self.section);
        if count == 0 {
            return;
        }
        let cursor = self.cursors.entry(self.section).or_insert(0);
        *cursor = (*cursor + 1).min(count - 1);
    }

    /// Moves the cursor up. On the first option the focus returns to the
    /// preceding section instead.
    fn move_cursor_up(&mut self) {
        let cursor = self.cursor(self.section);
        if cursor == 0 {
            if self.section == Section::Options {
                self.section = self.section.previous();
            }
            return;
        }
        self.cursors.insert(self.section, cursor - 1);
    }

    pub(crate) fn selected_option(&self) -> Option<DebriefChoice> {
        self.options.get(self.cursor(Section::Options)).copied()
    }

    /// Estimated number of rows the full report takes when rendered.
    pub(crate) fn content_height(&self) -> u16 {
        let mut rows: usize = 0;

        // Section heading plus a blank line after each section
        rows += Section::ALL.len() * 2;

        // Summary: cause, chapter, resources, clue tally
        rows += 4;

        for (i, rule) in self.report.rules.iter().enumerate() {
            rows += 1;
            if self.is_expanded(Section::Rules, i) {
                rows += 2 + rule.clues_found.len() + rule.clues_missed.len();
                rows += usize::from(rule.explanation.is_some());
            }
        }

        for i in 0..self.item_count(Section::Clues) {
            rows += 1;
            if self.is_expanded(Section::Clues, i) {
                rows += 1;
            }
        }

        for decision in &self.report.decisions {
            rows += 1 + decision.choices.len();
            rows += usize::from(decision.consequence.is_some());
        }

        rows += self.options.len();

        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    pub(crate) fn max_scroll(&self) -> u16 {
        self.content_height().saturating_sub(self.viewport_height)
    }

    pub(crate) fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(SCROLL_STEP).min(self.max_scroll());
    }

    pub(crate) fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::model::{DeathType, Difficulty, debrief::fixtures};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn browser(difficulty: Difficulty, checkpoints: usize) -> ReportBrowser {
        ReportBrowser::new(fixtures::report(difficulty, DeathType::RuleViolation, checkpoints), 24)
    }

    fn press(browser: ReportBrowser, code: KeyCode) -> ReportBrowser {
        browser.update(key(code)).state
    }

    #[test]
    fn test_no_checkpoints_means_two_options() {
        let b = browser(Difficulty::Easy, 0);
        assert_eq!(b.options, vec![DebriefChoice::NewGame, DebriefChoice::ReturnToMenu]);
    }

    #[test]
    fn test_rollback_offered_first_when_allowed() {
        let b = browser(Difficulty::Hard, 2);
        assert_eq!(b.options.len(), 3);
        assert!(matches!(b.options[0], DebriefChoice::Rollback(c) if c.chapter == 2));

        let b = browser(Difficulty::Hell, 2);
        assert_eq!(b.options, vec![DebriefChoice::NewGame, DebriefChoice::ReturnToMenu]);
    }

    #[test]
    fn test_set_report_recomputes_options() {
        let mut b = browser(Difficulty::Easy, 0);
        b.toggle(Section::Rules, 0);
        b.set_report(fixtures::report(Difficulty::Easy, DeathType::Exhaustion, 1));
        assert_eq!(b.options.len(), 3);
        assert!(!b.is_expanded(Section::Rules, 0));
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut b = browser(Difficulty::Easy, 0);
        for section in [Section::Rules, Section::Clues] {
            for index in 0..b.item_count(section) {
                let before = b.is_expanded(section, index);
                b.toggle(section, index);
                assert_ne!(b.is_expanded(section, index), before);
                b.toggle(section, index);
                assert_eq!(b.is_expanded(section, index), before);
            }
        }
    }

    #[test]
    fn test_items_toggle_independently() {
        let b = browser(Difficulty::Easy, 0);
        let b = press(b, KeyCode::Tab);
        assert_eq!(b.section, Section::Rules);
        let b = press(b, KeyCode::Enter);
        assert!(b.is_expanded(Section::Rules, 0));
        assert!(!b.is_expanded(Section::Rules, 1));
    }

    #[test]
    fn test_expand_all_only_touches_focused_section() {
        let b = press(browser(Difficulty::Easy, 0), KeyCode::Tab);
        let b = press(b, KeyCode::Char('e'));
        assert!(b.is_expanded(Section::Rules, 0));
        assert!(b.is_expanded(Section::Rules, 1));
        assert!(!b.is_expanded(Section::Clues, 0));

        let b = press(b, KeyCode::Right);
        let b = press(b, KeyCode::Char('e'));
        let b = press(b, KeyCode::Char('c'));
        assert!(!b.is_expanded(Section::Clues, 0));
        assert!(b.is_expanded(Section::Rules, 1));
    }

    #[test]
    fn test_section_cycle_wraps_and_arrows_clamp() {
        let mut b = browser(Difficulty::Easy, 0);
        for expected in [Section::Rules, Section::Clues, Section::Decisions, Section::Options, Section::Summary] {
            b = press(b, KeyCode::Tab);
            assert_eq!(b.section, expected);
        }
        let b = press(b, KeyCode::BackTab);
        assert_eq!(b.section, Section::Options);
        let b = press(b, KeyCode::Right);
        assert_eq!(b.section, Section::Options);

        let b = press(press(b, KeyCode::Tab), KeyCode::Left);
        assert_eq!(b.section, Section::Summary);
    }

    #[test]
    fn test_up_on_first_option_returns_to_previous_section() {
        let b = press(browser(Difficulty::Easy, 1), KeyCode::BackTab);
        assert_eq!(b.section, Section::Options);
        let b = press(b, KeyCode::Down);
        let b = press(b, KeyCode::Up);
        assert_eq!(b.section, Section::Options);
        assert_eq!(b.cursor(Section::Options), 0);

        let b = press(b, KeyCode::Up);
        assert_eq!(b.section, Section::Decisions);
    }

    #[test]
    fn test_option_selection_emits_choice() {
        let b = press(browser(Difficulty::Easy, 0), KeyCode::BackTab);
        let b = press(b, KeyCode::Down);
        let b = press(b, KeyCode::Down);
        let t = b.update(key(KeyCode::Enter));
        assert_eq!(t.message, Some(DebriefChoice::ReturnToMenu));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut b = browser(Difficulty::Easy, 1);
        b.set_terminal_height(10);
        let max = b.max_scroll();
        assert!(max > 0);

        for _ in 0..50 {
            b = press(b, KeyCode::PageDown);
        }
        assert_eq!(b.scroll, max);

        for _ in 0..50 {
            b = press(b, KeyCode::PageUp);
        }
        assert_eq!(b.scroll, 0);
    }

    #[test]
    fn test_collapse_reclamps_scroll() {
        let mut b = press(browser(Difficulty::Easy, 1), KeyCode::Tab);
        b.set_terminal_height(10);
        b = press(b, KeyCode::Char('e'));
        for _ in 0..50 {
            b = press(b, KeyCode::PageDown);
        }
        let expanded_max = b.scroll;

        b = press(b, KeyCode::Char('c'));
        assert!(b.scroll <= b.max_scroll());
        assert!(b.scroll < expanded_max);
    }

    #[test]
    fn test_tall_terminal_cannot_scroll() {
        let mut b = browser(Difficulty::Easy, 0);
        b.set_terminal_height(200);
        let b = press(b, KeyCode::PageDown);
        assert_eq!(b.scroll, 0);
    }
}

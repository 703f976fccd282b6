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

//! UI rendering logic for the debrief browser.
//!
//! The whole report is laid out as one list of lines and scrolled as a
//! block. The focused section's heading and cursor item are highlighted.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::{
    components::debrief::{ReportBrowser, Section},
    render::draw_hints,
    theme::Theme,
};

impl ReportBrowser {
    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let panel = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Debrief ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(2));

        let mut lines = vec![];
        for section in Section::ALL {
            lines.push(self.heading(section, theme));
            match section {
                Section::Summary => self.summary_lines(theme, &mut lines),
                Section::Rules => self.rule_lines(theme, &mut lines),
                Section::Clues => self.clue_lines(theme, &mut lines),
                Section::Decisions => self.decision_lines(theme, &mut lines),
                Section::Options => self.option_lines(theme, &mut lines),
            }
            lines.push(Line::from(""));
        }

        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            panel,
        );

        draw_hints(
            f,
            area,
            theme,
            "Tab section  ↑/↓ item  Enter toggle/select  e/c expand/collapse all  PgUp/PgDn scroll",
        );
    }

    fn heading(&self, section: Section, theme: &Theme) -> Line<'static> {
        let style = if section == self.section {
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.muted_colour).add_modifier(Modifier::BOLD)
        };
        Line::from(Span::styled(section.title().to_uppercase(), style))
    }

    fn item_style(&self, section: Section, index: usize, theme: &Theme) -> Style {
        if section == self.section && index == self.cursor(section) {
            Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg)
        } else {
            Style::default().fg(theme.text_colour)
        }
    }

    fn marker(&self, section: Section, index: usize) -> &'static str {
        if self.is_expanded(section, index) { "▾ " } else { "▸ " }
    }

    fn summary_lines(&self, theme: &Theme, lines: &mut Vec<Line<'static>>) {
        let death = &self.report.death;
        let muted = Style::default().fg(theme.muted_colour);
        let text = Style::default().fg(theme.text_colour);

        lines.push(Line::from(vec![
            Span::styled("Cause       ", muted),
            Span::styled(death.kind.label(), Style::default().fg(theme.danger_colour)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Chapter     ", muted),
            Span::styled(format!("{} ({})", death.chapter, self.report.difficulty.label()), text),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Resources   ", muted),
            Span::styled(
                format!("health {}  sanity {}", death.resources.health, death.resources.sanity),
                text,
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Clues       ", muted),
            Span::styled(
                format!(
                    "{} of {} found",
                    self.report.discovered_clue_count(),
                    self.report.clues.len()
                ),
                text,
            ),
        ]));
    }

    fn rule_lines(&self, theme: &Theme, lines: &mut Vec<Line<'static>>) {
        let muted = Style::default().fg(theme.muted_colour);

        for (i, rule) in self.report.rules.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(self.marker(Section::Rules, i), Style::default().fg(theme.accent_colour)),
                Span::styled(rule.rule.clone(), self.item_style(Section::Rules, i, theme)),
            ]));

            if !self.is_expanded(Section::Rules, i) {
                continue;
            }

            lines.push(Line::from(Span::styled("    Found:", muted)));
            for clue in &rule.clues_found {
                lines.push(Line::from(Span::styled(
                    format!("      ✓ {}", clue),
                    Style::default().fg(theme.text_colour),
                )));
            }
            lines.push(Line::from(Span::styled("    Missed:", muted)));
            for clue in &rule.clues_missed {
                lines.push(Line::from(Span::styled(
                    format!("      ✗ {}", clue),
                    Style::default().fg(theme.danger_colour),
                )));
            }
            if let Some(explanation) = &rule.explanation {
                lines.push(Line::from(Span::styled(
                    format!("    {}", explanation),
                    muted.add_modifier(Modifier::ITALIC),
                )));
            }
        }
    }

    fn clue_lines(&self, theme: &Theme, lines: &mut Vec<Line<'static>>) {
        for (i, clue) in self.report.missed_clues().into_iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(self.marker(Section::Clues, i), Style::default().fg(theme.accent_colour)),
                Span::styled(clue.content.clone(), self.item_style(Section::Clues, i, theme)),
            ]));
            if self.is_expanded(Section::Clues, i) {
                lines.push(Line::from(Span::styled(
                    format!("    Available in chapter {}", clue.chapter),
                    Style::default().fg(theme.muted_colour),
                )));
            }
        }
    }

    fn decision_lines(&self, theme: &Theme, lines: &mut Vec<Line<'static>>) {
        for (i, decision) in self.report.decisions.iter().enumerate() {
            let mut title = format!(
                "Chapter {}: {}",
                decision.chapter,
                decision.selected_choice().unwrap_or("no choice recorded")
            );
            if decision.significant {
                title.push_str("  (turning point)");
            }
            if decision.hallucination {
                title.push_str("  (not what it seemed)");
            }
            lines.push(Line::from(Span::styled(title, self.item_style(Section::Decisions, i, theme))));

            for (c, choice) in decision.choices.iter().enumerate() {
                let (marker, style) = if c == decision.selected {
                    ("  ● ", Style::default().fg(theme.accent_colour))
                } else {
                    ("  ○ ", Style::default().fg(theme.muted_colour))
                };
                lines.push(Line::from(Span::styled(format!("{}{}", marker, choice), style)));
            }

            if let Some(consequence) = &decision.consequence {
                lines.push(Line::from(Span::styled(
                    format!("    → {}", consequence),
                    Style::default().fg(theme.text_colour).add_modifier(Modifier::ITALIC),
                )));
            }
        }
    }

    fn option_lines(&self, theme: &Theme, lines: &mut Vec<Line<'static>>) {
        for (i, option) in self.options.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                format!(" {}. {} ", i + 1, option.label()),
                self.item_style(Section::Options, i, theme),
            )));
        }
    }
}

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

//! UI rendering logic for the death sequence.
//!
//! The heightened variant shifts the panel by the controller's jitter and
//! corrupts part of the text each time it is drawn.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    components::death::{DeathChoice, DeathSequence, DeathVariant, TRANSITION_FRAMES},
    render::{centered_rect, draw_hints},
    theme::Theme,
};

const GLITCH_GLYPHS: [char; 12] = ['█', '▓', '▒', '░', '¿', '§', 'Ж', 'ψ', '☠', '∆', '#', '%'];
const NARRATIVE_GLITCH_FRACTION: f64 = 0.15;
const TITLE_GLITCH_FRACTION: f64 = 0.3;
const TITLE_GLITCH_CHANCE: f64 = 0.3;

/// Replaces up to `fraction` of the non-space characters with noise glyphs.
pub(crate) fn corrupt(text: &str, fraction: f64) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let candidates: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| i)
        .collect();

    let count = (candidates.len() as f64 * fraction.clamp(0.0, 1.0)) as usize;
    for _ in 0..count {
        let target = candidates[rand::random_range(0..candidates.len())];
        chars[target] = GLITCH_GLYPHS[rand::random_range(0..GLITCH_GLYPHS.len())];
    }

    chars.into_iter().collect()
}

impl DeathSequence {
    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        if self.is_settled() {
            self.draw_settled(f, area, theme);
        } else {
            self.draw_transition(f, area, theme);
        }
    }

    fn draw_transition(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let progress = self.frame as f64 / TRANSITION_FRAMES as f64;
        let style = if progress < 0.5 {
            Style::default().fg(theme.text_colour)
        } else {
            Style::default().fg(theme.danger_colour).add_modifier(Modifier::DIM)
        };

        let line_area = centered_rect(area, 40, 1);
        f.render_widget(
            Paragraph::new(self.transition_text())
                .alignment(Alignment::Center)
                .style(style),
            line_area,
        );
    }

    fn draw_settled(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let heightened = self.variant() == DeathVariant::Heightened && self.glitch_seed > 0;

        let mut panel = centered_rect(area, 60, 16);
        if heightened {
            let shifted = panel.x as i32 + self.jitter as i32;
            let max_x = area.right().saturating_sub(panel.width) as i32;
            panel.x = shifted.clamp(area.x as i32, max_x.max(area.x as i32)) as u16;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(5),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(panel);

        let death = &self.report.death;

        let mut title = format!("☠  {}  ☠", death.kind.label().to_uppercase());
        if heightened && rand::random_bool(TITLE_GLITCH_CHANCE) {
            title = corrupt(&title, TITLE_GLITCH_FRACTION);
        }
        f.render_widget(
            Paragraph::new(title).alignment(Alignment::Center).style(
                Style::default().fg(theme.danger_colour).add_modifier(Modifier::BOLD),
            ),
            chunks[0],
        );

        let narrative = if heightened {
            corrupt(&death.description, NARRATIVE_GLITCH_FRACTION)
        } else {
            death.description.clone()
        };
        f.render_widget(
            Paragraph::new(narrative)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(theme.text_colour)),
            chunks[1],
        );

        let stats = format!(
            "Chapter {}   Health {}   Sanity {}",
            death.chapter, death.resources.health, death.resources.sanity
        );
        f.render_widget(
            Paragraph::new(stats)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted_colour)),
            chunks[2],
        );

        let options: Vec<Line> = DeathChoice::ALL
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let style = if i == self.selected {
                    Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg)
                } else {
                    Style::default().fg(theme.text_colour)
                };
                Line::from(Span::styled(format!(" {}. {} ", i + 1, choice.label()), style))
            })
            .collect();
        f.render_widget(Paragraph::new(options).alignment(Alignment::Center), chunks[3]);

        draw_hints(f, area, theme, "↑/↓ choose  Enter select");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_keeps_spaces_and_bounds_changes() {
        let text = "the lights went out on the third floor";
        let non_space = text.chars().filter(|c| !c.is_whitespace()).count();
        for _ in 0..50 {
            let out = corrupt(text, NARRATIVE_GLITCH_FRACTION);
            assert_eq!(out.chars().count(), text.chars().count());

            let changed = out.chars().zip(text.chars()).filter(|(a, b)| a != b).count();
            assert!(changed <= (non_space as f64 * NARRATIVE_GLITCH_FRACTION) as usize);

            for (a, b) in out.chars().zip(text.chars()) {
                if b == ' ' {
                    assert_eq!(a, ' ');
                }
            }
        }
    }

    #[test]
    fn test_corrupt_empty_text() {
        assert_eq!(corrupt("", 0.5), "");
        assert_eq!(corrupt("   ", 0.5), "   ");
    }
}

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

//! UI rendering logic for the game screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::{
    components::game::{GamePhase, GameScreen, PlayState},
    render::{centered_rect, draw_hints},
    theme::Theme,
    util::format::format_elapsed,
};

impl GameScreen {
    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        match &self.phase {
            GamePhase::Playing(play) => self.draw_playing(f, area, theme, play),
            GamePhase::Dying(death) => death.draw(f, area, theme),
            GamePhase::Debrief(browser) => browser.draw(f, area, theme),
        }
    }

    fn draw_playing(&self, f: &mut Frame, area: Rect, theme: &Theme, play: &PlayState) {
        let panel = centered_rect(area, 70, 14);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Chapter {} ", play.chapter))
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(format!(" {} ", format_elapsed(play.elapsed_secs))).right_aligned())
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::new(2, 2, 1, 1));

        let inner = block.inner(panel);
        f.render_widget(block, panel);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let muted = Style::default().fg(theme.muted_colour);
        let text = Style::default().fg(theme.text_colour);
        let adult = if self.config.adult_content() { "Yes" } else { "No" };

        let details = vec![
            Line::from(vec![Span::styled("Theme       ", muted), Span::styled(self.config.theme().to_string(), text)]),
            Line::from(vec![Span::styled("Difficulty  ", muted), Span::styled(self.config.difficulty().label(), text)]),
            Line::from(vec![Span::styled("Length      ", muted), Span::styled(self.config.length().label(), text)]),
            Line::from(vec![Span::styled("Adult       ", muted), Span::styled(adult, text)]),
        ];
        f.render_widget(Paragraph::new(details), chunks[0]);

        f.render_widget(
            Paragraph::new(play.flavor())
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(theme.accent_colour).add_modifier(Modifier::ITALIC)),
            chunks[2],
        );

        draw_hints(f, area, theme, "The story engine is not connected yet  Esc menu  Ctrl+C quit");
    }
}

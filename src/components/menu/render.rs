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

//! UI rendering logic for menus.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
};

use crate::{
    components::menu::{Menu, MenuAction},
    render::{centered_rect, draw_hints},
    theme::Theme,
};

impl<A: MenuAction> Menu<A> {
    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let panel = centered_rect(area, 50, (self.items.len() as u16) + 9);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::uniform(1));

        let inner = block.inner(panel);
        f.render_widget(block, panel);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.items.len() as u16),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if item.enabled {
                    Style::default().fg(theme.text_colour)
                } else {
                    Style::default().fg(theme.muted_colour).add_modifier(Modifier::DIM)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(theme.muted_colour)),
                    Span::styled(item.label, style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg))
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(self.selected()));
        f.render_stateful_widget(list, chunks[0], &mut state);

        if let Some(item) = self.selected_item() {
            f.render_widget(
                Paragraph::new(item.description).style(Style::default().fg(theme.muted_colour)),
                chunks[2],
            );
        }

        if let Some(notice) = &self.notice {
            f.render_widget(
                Paragraph::new(notice.as_str()).style(Style::default().fg(theme.accent_colour)),
                chunks[3],
            );
        }

        draw_hints(f, area, theme, "↑/↓ move  1-9 pick  Enter select  Esc back");

        if self.is_confirming_exit() {
            self.draw_confirmation(f, area, theme);
        }
    }

    fn draw_confirmation(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(area, 36, 5);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Leave? ")
            .border_style(Style::default().fg(theme.danger_colour));

        let text = vec![
            Line::from("Really exit the game?"),
            Line::from(Span::styled("[y] yes   [n] no", Style::default().fg(theme.accent_colour))),
        ];

        f.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(block),
            popup,
        );
    }
}

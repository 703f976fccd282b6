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

//! Drawing helpers shared by the wizards.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::{
    components::wizard::{Choice, SummaryAction, TextField},
    render::centered_rect,
    theme::Theme,
};

/// Draws the framed panel for a step and returns the area inside it.
pub(super) fn draw_frame(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    wizard: &str,
    step: &str,
    position: (usize, usize),
) -> Rect {
    let panel = centered_rect(area, 64, 18);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", wizard))
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::new(2, 2, 1, 1));

    let inner = block.inner(panel);
    f.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let header = Line::from(vec![
        Span::styled(
            step.to_string(),
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  step {} of {}", position.0 + 1, position.1),
            Style::default().fg(theme.muted_colour),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    chunks[1]
}

pub(super) fn draw_text_field(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    prompt: &str,
    field: &TextField,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(prompt).wrap(Wrap { trim: true }).style(Style::default().fg(theme.text_colour)),
        chunks[0],
    );

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent_colour));
    let input_area = input_block.inner(chunks[1]);
    f.render_widget(
        Paragraph::new(field.display()).block(input_block).style(Style::default().fg(theme.text_colour)),
        chunks[1],
    );

    let cursor_x = input_area.x + (field.input.visual_cursor() as u16).min(input_area.width.saturating_sub(1));
    f.set_cursor_position((cursor_x, input_area.y));

    if let Some(error) = &field.error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(theme.danger_colour)),
            chunks[2],
        );
    }
}

pub(super) fn draw_choice(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    options: &[(&str, &str)],
    choice: &Choice,
) {
    let lines: Vec<Line> = options
        .iter()
        .enumerate()
        .map(|(i, (label, description))| {
            let selected = i == choice.selected();
            let marker = if selected { "> " } else { "  " };
            let label_style = if selected {
                Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg)
            } else {
                Style::default().fg(theme.text_colour)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent_colour)),
                Span::styled(format!("{}. {}", i + 1, label), label_style),
                Span::styled(format!("  {}", description), Style::default().fg(theme.muted_colour)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

pub(super) fn draw_summary(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    rows: &[(&str, String)],
    actions: &Choice,
) {
    let mut lines: Vec<Line> = rows
        .iter()
        .map(|(name, value)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", name), Style::default().fg(theme.muted_colour)),
                Span::styled(value.clone(), Style::default().fg(theme.text_colour)),
            ])
        })
        .collect();

    lines.push(Line::from(""));

    let buttons: Vec<Span> = SummaryAction::ALL
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let style = if i == actions.selected() {
                Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg)
            } else {
                Style::default().fg(theme.text_colour)
            };
            Span::styled(format!(" [{}] ", action.label()), style)
        })
        .collect();
    lines.push(Line::from(buttons));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

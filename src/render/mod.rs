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

//! User interface rendering logic.
//!
//! Translates the [`Session`] into widgets. Each screen controller draws
//! itself; this module fills the background, picks the controller to draw
//! and owns the screens that have no controller: loading and the terminal
//! size warning.
//!
//! # Rendering Pipeline
//!
//! The entry point is [`draw`], called by the event loop after every event.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
};

use crate::{
    session::{MIN_HEIGHT, MIN_WIDTH, Screen, Session},
    theme::{Theme, ThemeRegistry},
};

/// Renders the session to the terminal frame using the current theme.
pub(crate) fn draw(f: &mut Frame, session: &Session, themes: &ThemeRegistry) {
    let area = f.area();
    let theme = themes.current();

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_colour).fg(theme.text_colour)),
        area,
    );

    // Before the first resize arrives the size is unknown, not too small
    if session.width > 0 && !session.fits() {
        draw_size_warning(f, area, &theme, session);
        return;
    }

    match &session.screen {
        Screen::Loading => draw_loading(f, area, &theme),
        Screen::ApiSetup(wizard) => wizard.draw(f, area, &theme),
        Screen::MainMenu(menu) => menu.draw(f, area, &theme),
        Screen::Settings(menu) => menu.draw(f, area, &theme),
        Screen::ThemeSelector(selector) => selector.draw(f, area, &theme),
        Screen::GameSetup(wizard) => wizard.draw(f, area, &theme),
        Screen::Game(game) => game.draw(f, area, &theme),
    }
}

/// A `width` by `height` rectangle centred in `area`, shrunk to fit.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draws a line of key hints along the bottom of `area`.
pub(crate) fn draw_hints(f: &mut Frame, area: Rect, theme: &Theme, hints: &str) {
    if area.height == 0 {
        return;
    }
    let line = Rect {
        y: area.bottom() - 1,
        height: 1,
        ..area
    };
    f.render_widget(
        Paragraph::new(hints)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted_colour)),
        line,
    );
}

fn draw_loading(f: &mut Frame, area: Rect, theme: &Theme) {
    f.render_widget(
        Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted_colour)),
        centered_rect(area, 20, 1),
    );
}

fn draw_size_warning(f: &mut Frame, area: Rect, theme: &Theme, session: &Session) {
    let lines = vec![
        Line::styled(
            "Terminal too small",
            Style::default().fg(theme.danger_colour).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Need at least {}x{}", MIN_WIDTH, MIN_HEIGHT)),
        Line::from(format!("Currently {}x{}", session.width, session.height)),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(theme.text_colour)),
        centered_rect(area, 40, 4),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 30);
        assert_eq!(centered_rect(area, 50, 10), Rect::new(25, 10, 50, 10));

        let small = Rect::new(5, 5, 20, 4);
        let rect = centered_rect(small, 50, 10);
        assert_eq!(rect, small);
    }
}

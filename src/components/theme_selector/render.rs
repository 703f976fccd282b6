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

//! UI rendering logic for the theme selector.
//!
//! The menu is drawn as usual, followed by a swatch strip previewing the
//! highlighted palette.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{components::theme_selector::ThemeSelector, render::centered_rect, theme::Theme};

impl ThemeSelector {
    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        self.menu.draw(f, area, theme);

        let Some(preview) = self
            .menu
            .selected_item()
            .and_then(|item| self.registry().all().get(item.action.0))
        else {
            return;
        };

        let swatches = [
            preview.background_colour,
            preview.text_colour,
            preview.accent_colour,
            preview.border_colour,
            preview.danger_colour,
            preview.highlight_bg,
        ];

        let mut spans = vec![Span::raw(" Preview ")];
        spans.extend(
            swatches
                .iter()
                .map(|c| Span::styled("    ", Style::default().bg(*c))),
        );

        let strip = centered_rect(area, 50, 1);
        let below = Rect {
            y: strip.y + (self.menu.items.len() as u16) / 2 + 6,
            ..strip
        };
        if below.bottom() < area.bottom() {
            f.render_widget(Paragraph::new(Line::from(spans)), below);
        }
    }
}

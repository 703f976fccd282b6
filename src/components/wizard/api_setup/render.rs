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

//! UI rendering logic for the provider setup wizard.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    components::wizard::{
        StepOrder,
        api_setup::{ApiSetupWizard, ApiStep, TestState},
        render::{draw_choice, draw_frame, draw_summary, draw_text_field},
    },
    render::draw_hints,
    theme::Theme,
};

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

impl ApiSetupWizard {
    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let body = draw_frame(
            f,
            area,
            theme,
            "Story Provider",
            self.step.title(),
            (self.step.ordinal(), ApiStep::ORDER.len()),
        );

        let provider_name = self.selected_provider().map(|p| p.name).unwrap_or("-");

        match self.step {
            ApiStep::Provider => {
                let options: Vec<(&str, &str)> =
                    self.providers.iter().map(|p| (p.name, p.description)).collect();
                draw_choice(f, body, theme, &options, &self.provider);
            }
            ApiStep::ApiKey => {
                let prompt = format!("Paste your {} API key. It is stored encrypted.", provider_name);
                draw_text_field(f, body, theme, &prompt, &self.key_field);
            }
            ApiStep::Test => self.draw_test(f, body, theme, provider_name),
            ApiStep::Summary => {
                let rows = [
                    ("Provider", provider_name.to_string()),
                    ("API key", self.key_field.display()),
                    ("Connection", "OK".to_string()),
                ];
                draw_summary(f, body, theme, &rows, &self.summary);
            }
        }

        let hints = match (self.step, &self.test) {
            (ApiStep::Test, TestState::Failed { .. }) => "Enter retry  Esc change key",
            (ApiStep::Test, _) => "Esc abandon test",
            (ApiStep::ApiKey, _) => "Enter test  Esc back",
            (ApiStep::Summary, _) => "↑/↓ choose  Enter select  e edit  Esc back",
            (ApiStep::Provider, _) => "↑/↓ choose  Enter next  Esc cancel",
        };
        draw_hints(f, area, theme, hints);
    }

    fn draw_test(&self, f: &mut Frame, area: Rect, theme: &Theme, provider_name: &str) {
        let lines = match &self.test {
            TestState::Pending { frames, .. } => vec![Line::from(vec![
                Span::styled(
                    SPINNER[*frames as usize % SPINNER.len()],
                    Style::default().fg(theme.accent_colour),
                ),
                Span::raw(format!(" Contacting {}...", provider_name)),
            ])],
            TestState::Failed { category, detail } => vec![
                Line::from(Span::styled(
                    category.message(),
                    Style::default().fg(theme.danger_colour).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(detail.as_str(), Style::default().fg(theme.muted_colour))),
            ],
            TestState::Idle => vec![Line::from("Waiting to test.")],
        };

        f.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(theme.text_colour))
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

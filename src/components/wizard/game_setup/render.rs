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

//! UI rendering logic for the game setup wizard.

use ratatui::{Frame, layout::Rect};

use crate::{
    components::wizard::{
        StepOrder,
        game_setup::{ADULT_OPTIONS, GameSetupWizard, GameStep},
        render::{draw_choice, draw_frame, draw_summary, draw_text_field},
    },
    model::{Difficulty, StoryLength},
    render::draw_hints,
    theme::Theme,
};

impl GameSetupWizard {
    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let body = draw_frame(
            f,
            area,
            theme,
            "New Game",
            self.step.title(),
            (self.step.ordinal(), GameStep::ORDER.len()),
        );

        match self.step {
            GameStep::Theme => draw_text_field(
                f,
                body,
                theme,
                "Where does the story take place? (3-100 characters)",
                &self.theme_field,
            ),
            GameStep::Difficulty => {
                let options: Vec<(&str, &str)> = Difficulty::ALL
                    .iter()
                    .map(|d| (d.label(), d.description()))
                    .collect();
                draw_choice(f, body, theme, &options, &self.difficulty);
            }
            GameStep::Length => {
                let options: Vec<(&str, &str)> = StoryLength::ALL
                    .iter()
                    .map(|l| (l.label(), l.description()))
                    .collect();
                draw_choice(f, body, theme, &options, &self.length);
            }
            GameStep::Adult => {
                let options = [
                    (ADULT_OPTIONS[0], "Keep descriptions restrained"),
                    (ADULT_OPTIONS[1], "Allow graphic horror"),
                ];
                draw_choice(f, body, theme, &options, &self.adult);
            }
            GameStep::Summary => {
                let rows = [
                    ("Theme", self.draft.theme().to_string()),
                    ("Difficulty", self.draft.difficulty().label().to_string()),
                    ("Length", self.draft.length().label().to_string()),
                    (
                        "Adult content",
                        ADULT_OPTIONS[usize::from(self.draft.adult_content())].to_string(),
                    ),
                ];
                draw_summary(f, body, theme, &rows, &self.summary);
            }
        }

        let hints = match self.step {
            GameStep::Theme => "Enter next  Esc cancel",
            GameStep::Summary => "↑/↓ choose  Enter select  e edit  Esc back",
            _ => "↑/↓ choose  1-3 pick  Enter next  Esc back",
        };
        draw_hints(f, area, theme, hints);
    }
}

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

//! Visual styling and the theme registry.
//!
//! This module defines the application's color palettes and the registry
//! that tracks which palette is currently active. The registry is created
//! once at process start and shared by reference; the rendering side only
//! reads from it while selection changes arrive through the event loop.

use std::sync::{PoisonError, RwLock};

use ratatui::style::Color;
use thiserror::Error;

pub(crate) const DEFAULT_THEME_ID: &str = "midnight";

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ThemeError {
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Theme {
    pub(crate) id: &'static str,
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,

    pub(crate) background_colour: Color,
    pub(crate) text_colour: Color,
    pub(crate) muted_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) danger_colour: Color,
    pub(crate) highlight_bg: Color,
    pub(crate) highlight_fg: Color,
}

impl Theme {
    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// This is primarily used to set the terminal emulator's background color
    /// via escape sequences. Only `Rgb` colors have a hex form.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}

const BUILTIN_THEMES: [Theme; 5] = [
    Theme {
        id: "midnight",
        name: "Midnight",
        description: "Deep violet dark, the default",
        background_colour: Color::Rgb(20, 14, 28),
        text_colour: Color::Rgb(220, 216, 228),
        muted_colour: Color::Rgb(128, 120, 140),
        accent_colour: Color::Rgb(250, 189, 47),
        border_colour: Color::Rgb(90, 80, 104),
        danger_colour: Color::Rgb(214, 48, 49),
        highlight_bg: Color::Rgb(60, 40, 90),
        highlight_fg: Color::Rgb(255, 255, 255),
    },
    Theme {
        id: "crimson",
        name: "Crimson",
        description: "Blood red on black",
        background_colour: Color::Rgb(12, 4, 4),
        text_colour: Color::Rgb(230, 210, 210),
        muted_colour: Color::Rgb(130, 90, 90),
        accent_colour: Color::Rgb(220, 20, 60),
        border_colour: Color::Rgb(110, 30, 30),
        danger_colour: Color::Rgb(255, 60, 60),
        highlight_bg: Color::Rgb(90, 10, 20),
        highlight_fg: Color::Rgb(255, 240, 240),
    },
    Theme {
        id: "phosphor",
        name: "Phosphor",
        description: "Green monochrome terminal",
        background_colour: Color::Rgb(4, 14, 6),
        text_colour: Color::Rgb(120, 255, 140),
        muted_colour: Color::Rgb(50, 130, 60),
        accent_colour: Color::Rgb(180, 255, 190),
        border_colour: Color::Rgb(30, 90, 40),
        danger_colour: Color::Rgb(255, 200, 60),
        highlight_bg: Color::Rgb(20, 70, 30),
        highlight_fg: Color::Rgb(220, 255, 225),
    },
    Theme {
        id: "ashen",
        name: "Ashen",
        description: "Muted greys, low contrast",
        background_colour: Color::Rgb(30, 30, 32),
        text_colour: Color::Rgb(200, 200, 196),
        muted_colour: Color::Rgb(120, 120, 118),
        accent_colour: Color::Rgb(170, 180, 190),
        border_colour: Color::Rgb(80, 80, 84),
        danger_colour: Color::Rgb(190, 90, 80),
        highlight_bg: Color::Rgb(70, 70, 76),
        highlight_fg: Color::Rgb(240, 240, 240),
    },
    Theme {
        id: "parchment",
        name: "Parchment",
        description: "Light sepia for bright rooms",
        background_colour: Color::Rgb(238, 226, 200),
        text_colour: Color::Rgb(50, 40, 30),
        muted_colour: Color::Rgb(120, 104, 84),
        accent_colour: Color::Rgb(140, 40, 30),
        border_colour: Color::Rgb(160, 140, 110),
        danger_colour: Color::Rgb(170, 20, 20),
        highlight_bg: Color::Rgb(200, 180, 140),
        highlight_fg: Color::Rgb(20, 14, 8),
    },
];

/// Fixed catalog of palettes plus a pointer to the active one.
///
/// The current entry always refers into the catalog, so [`current`] never
/// fails.
///
/// [`current`]: ThemeRegistry::current
#[derive(Debug)]
pub(crate) struct ThemeRegistry {
    themes: &'static [Theme],
    current: RwLock<usize>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry {
    pub(crate) fn new() -> Self {
        Self {
            themes: &BUILTIN_THEMES,
            current: RwLock::new(0),
        }
    }

    pub(crate) fn current(&self) -> Theme {
        let index = *self.current.read().unwrap_or_else(PoisonError::into_inner);
        self.themes[index.min(self.themes.len() - 1)]
    }

    pub(crate) fn get(&self, id: &str) -> Option<Theme> {
        self.themes.iter().find(|t| t.id == id).copied()
    }

    pub(crate) fn all(&self) -> &[Theme] {
        self.themes
    }

    pub(crate) fn set_current(&self, id: &str) -> Result<(), ThemeError> {
        let index = self
            .themes
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ThemeError::UnknownTheme(id.to_string()))?;

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = index;
        tracing::debug!(theme = id, "active theme changed");
        Ok(())
    }

    pub(crate) fn is_current(&self, id: &str) -> bool {
        self.current().id == id
    }
}

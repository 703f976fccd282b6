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

//! Terminal background control.
//!
//! Uses OSC (Operating System Command) escape sequences. Most modern
//! terminals (XTerm, iTerm2, Alacritty, Kitty) honour them; the rest ignore
//! them.

use std::io::{self, Write};

use crate::theme::Theme;

/// Sets the terminal background colour using an OSC 11 escape sequence.
///
/// # Arguments
///
/// * `hex_color` - The colour as a hex string (e.g., `"#1e1e1e"`).
pub(crate) fn set_terminal_bg(hex_color: &str) {
    write_sequence(&format!("\x1b]11;{}\x07", hex_color));
}

/// Matches the terminal background to `theme`, so no border of the user's
/// own colour shows around the drawn area. Palettes without an exact hex
/// background fall back to the user's colour.
pub(crate) fn apply_theme_background(theme: &Theme) {
    match Theme::to_hex(theme.background_colour) {
        Some(hex) => set_terminal_bg(&hex),
        None => reset_terminal_bg(),
    }
}

/// Resets the terminal background to the user's own colour (OSC 111).
pub(crate) fn reset_terminal_bg() {
    write_sequence("\x1b]111\x07");
}

fn write_sequence(sequence: &str) {
    let mut stdout = io::stdout();
    if let Err(e) = stdout.write_all(sequence.as_bytes()).and_then(|_| stdout.flush()) {
        tracing::debug!(error = %e, "failed to write terminal sequence");
    }
}

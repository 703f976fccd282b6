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

//! Draft game configuration.
//!
//! A [`GameConfig`] is built step by step by the game setup wizard and handed
//! to the session when the wizard completes. Once gameplay begins the
//! configuration is frozen and every setter fails from then on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const THEME_MIN_CHARS: usize = 3;
pub(crate) const THEME_MAX_CHARS: usize = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("configuration is frozen and can no longer be changed")]
    Frozen,

    #[error("theme must be at least {THEME_MIN_CHARS} characters")]
    ThemeTooShort,

    #[error("theme must be at most {THEME_MAX_CHARS} characters")]
    ThemeTooLong,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Difficulty {
    #[default]
    Easy,
    Hard,
    Hell,
}

impl Difficulty {
    pub(crate) const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Hard, Difficulty::Hell];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
            Difficulty::Hell => "Hell",
        }
    }

    pub(crate) fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Clear hints, checkpoints available",
            Difficulty::Hard => "Subtle hints, checkpoints available",
            Difficulty::Hell => "No hints, no second chances",
        }
    }

    /// Whether a run at this difficulty may be rolled back to a checkpoint.
    pub(crate) fn allows_rollback(self) -> bool {
        matches!(self, Difficulty::Easy | Difficulty::Hard)
    }

    pub(crate) fn index(self) -> usize {
        Self::ALL.iter().position(|d| *d == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum StoryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl StoryLength {
    pub(crate) const ALL: [StoryLength; 3] =
        [StoryLength::Short, StoryLength::Medium, StoryLength::Long];

    pub(crate) fn label(self) -> &'static str {
        match self {
            StoryLength::Short => "Short",
            StoryLength::Medium => "Medium",
            StoryLength::Long => "Long",
        }
    }

    pub(crate) fn description(self) -> &'static str {
        match self {
            StoryLength::Short => "3-5 chapters",
            StoryLength::Medium => "6-10 chapters",
            StoryLength::Long => "11-15 chapters",
        }
    }

    pub(crate) fn index(self) -> usize {
        Self::ALL.iter().position(|l| *l == self).unwrap_or(0)
    }
}

/// Checks a theme against the length constraint, counting characters rather
/// than bytes so that multi-byte scripts are measured the way they are read.
pub(crate) fn validate_theme(theme: &str) -> Result<(), ConfigError> {
    let count = theme.trim().chars().count();
    if count < THEME_MIN_CHARS {
        Err(ConfigError::ThemeTooShort)
    } else if count > THEME_MAX_CHARS {
        Err(ConfigError::ThemeTooLong)
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct GameConfig {
    theme: String,
    difficulty: Difficulty,
    length: StoryLength,
    adult_content: bool,
    frozen: bool,
}

impl GameConfig {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn theme(&self) -> &str {
        &self.theme
    }

    pub(crate) fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub(crate) fn length(&self) -> StoryLength {
        self.length
    }

    pub(crate) fn adult_content(&self) -> bool {
        self.adult_content
    }

    pub(crate) fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn set_theme(&mut self, theme: &str) -> Result<(), ConfigError> {
        self.ensure_mutable()?;
        validate_theme(theme)?;
        self.theme = theme.trim().to_string();
        Ok(())
    }

    pub(crate) fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), ConfigError> {
        self.ensure_mutable()?;
        self.difficulty = difficulty;
        Ok(())
    }

    pub(crate) fn set_length(&mut self, length: StoryLength) -> Result<(), ConfigError> {
        self.ensure_mutable()?;
        self.length = length;
        Ok(())
    }

    pub(crate) fn set_adult_content(&mut self, enabled: bool) -> Result<(), ConfigError> {
        self.ensure_mutable()?;
        self.adult_content = enabled;
        Ok(())
    }

    /// One-way transition; calling it again is harmless.
    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }

    fn ensure_mutable(&self) -> Result<(), ConfigError> {
        if self.is_frozen() {
            Err(ConfigError::Frozen)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_length_counts_characters() {
        assert_eq!(validate_theme("ab"), Err(ConfigError::ThemeTooShort));
        assert_eq!(validate_theme("abc"), Ok(()));
        assert_eq!(validate_theme("廢棄醫院"), Ok(()));
        assert_eq!(validate_theme("  ab  "), Err(ConfigError::ThemeTooShort));
        assert_eq!(validate_theme(&"x".repeat(101)), Err(ConfigError::ThemeTooLong));
        assert_eq!(validate_theme(&"鬼".repeat(100)), Ok(()));
    }

    #[test]
    fn test_frozen_config_rejects_every_setter() {
        let mut config = GameConfig::new();
        config.set_theme("Abandoned hospital").unwrap();
        config.set_difficulty(Difficulty::Hell).unwrap();
        config.freeze();

        assert_eq!(config.set_theme("Other place"), Err(ConfigError::Frozen));
        assert_eq!(config.set_difficulty(Difficulty::Easy), Err(ConfigError::Frozen));
        assert_eq!(config.set_length(StoryLength::Long), Err(ConfigError::Frozen));
        assert_eq!(config.set_adult_content(true), Err(ConfigError::Frozen));

        assert_eq!(config.theme(), "Abandoned hospital");
        assert_eq!(config.difficulty(), Difficulty::Hell);
        assert!(config.is_frozen());
    }

    #[test]
    fn test_invalid_theme_leaves_previous_value() {
        let mut config = GameConfig::new();
        config.set_theme("Lighthouse").unwrap();
        assert!(config.set_theme("no").is_err());
        assert_eq!(config.theme(), "Lighthouse");
    }

    #[test]
    fn test_rollback_permission() {
        assert!(Difficulty::Easy.allows_rollback());
        assert!(Difficulty::Hard.allows_rollback());
        assert!(!Difficulty::Hell.allows_rollback());
    }
}

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

//! Domain models and core data structures.
//!
//! This module defines the plain data the controllers operate on: the draft
//! game configuration built by the setup wizard, and the debrief report
//! consumed by the report browser once a run has ended.

pub(crate) mod debrief;
pub(crate) mod game_config;

pub(crate) use debrief::{Checkpoint, DeathType, DebriefReport};
pub(crate) use game_config::{Difficulty, GameConfig, StoryLength};

#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use play::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod game;
mod generator;
mod play;
mod reveal;
mod types;

/// Dimensions and mine count of a game, plus an optional first move that is guaranteed safe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(height, width)`
    pub size: Coord2,
    pub mines: CellCount,
    #[serde(default)]
    pub initial_play: Option<Coord2>,
}

impl GameConfig {
    pub const BEGINNER: Self = Self::new_unchecked((9, 9), 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked((16, 16), 40);
    pub const EXPERT: Self = Self::new_unchecked((16, 30), 99);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            initial_play: None,
        }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(size, mines).validated()
    }

    pub fn with_initial_play(self, initial_play: Coord2) -> Result<Self> {
        Self {
            initial_play: Some(initial_play),
            ..self
        }
        .validated()
    }

    /// Checks the size, the mine count, and the initial play against each other.
    pub fn validated(self) -> Result<Self> {
        let (height, width) = self.size;
        if height == 0 || width == 0 {
            return Err(GameError::InvalidSize);
        }
        if let Some(coords) = self.initial_play {
            if !in_bounds(coords, self.size) {
                return Err(GameError::OutOfBounds);
            }
        }
        if self.mines > self.available_cells() {
            log::warn!(
                "Rejected config, requested {} mines but only {} cells are available",
                self.mines,
                self.available_cells()
            );
            return Err(GameError::TooManyMines);
        }
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Cells that may hold a mine, the initial play excluded.
    pub const fn available_cells(&self) -> CellCount {
        let total = self.total_cells();
        if self.initial_play.is_some() {
            total.saturating_sub(1)
        } else {
            total
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::BEGINNER
    }
}

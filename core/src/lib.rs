#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use board::*;
pub use error::*;
pub use generator::*;
pub use model::*;
pub use observation::*;
pub use side::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod model;
mod observation;
mod side;
mod tile;
mod types;

/// Tile value that wins the game with the default configuration.
pub const MAX_PIECE: Value = 2048;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub winning_value: Value,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, winning_value: Value) -> Self {
        Self {
            size,
            winning_value,
        }
    }

    /// Clamps `size` to at least 1 and rounds `winning_value` up to a power of two that a merge
    /// can produce.
    pub fn new(size: Coord, winning_value: Value) -> Self {
        let clamped_size = size.max(1);
        let clamped_value = winning_value
            .clamp(2 * Tile::MIN_VALUE, Tile::MAX_VALUE)
            .next_power_of_two();
        if clamped_size != size || clamped_value != winning_value {
            log::warn!(
                "Adjusted game config, requested size {} and winning value {}, using {} and {}",
                size,
                winning_value,
                clamped_size,
                clamped_value
            );
        }
        Self::new_unchecked(clamped_size, clamped_value)
    }

    pub const fn total_cells(&self) -> u16 {
        let size = self.size as u16;
        size * size
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(4, MAX_PIECE)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A merge performed during a tilt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Merge {
    /// Physical coordinates of the merged tile.
    pub coords: Coord2,
    /// Value of the merged tile.
    pub value: Value,
}

/// What a single tilt did to the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TiltOutcome {
    pub moved: bool,
    pub score_gained: Score,
    pub merges: SmallVec<[Merge; 8]>,
}

impl TiltOutcome {
    /// Whether the tilt changed the board at all
    pub const fn has_update(&self) -> bool {
        self.moved
    }
}

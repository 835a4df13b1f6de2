use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// A numbered tile, its value is always a power of two of at least 2.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Tile(Value);

impl Tile {
    pub const MIN_VALUE: Value = 2;

    /// Tiles of this value no longer merge, doubling it would overflow [`Value`].
    pub const MAX_VALUE: Value = 1 << (Value::BITS - 1);

    pub fn new(value: Value) -> Result<Self> {
        if Self::is_valid_value(value) {
            Ok(Self(value))
        } else {
            Err(GameError::InvalidTileValue)
        }
    }

    pub const fn is_valid_value(value: Value) -> bool {
        value >= Self::MIN_VALUE && value.is_power_of_two()
    }

    pub const fn value(self) -> Value {
        self.0
    }

    pub const fn can_merge_with(self, other: Tile) -> bool {
        self.0 == other.0 && self.0 < Self::MAX_VALUE
    }

    /// The tile produced by merging two tiles of this value.
    pub(crate) const fn doubled(self) -> Self {
        Self(self.0 << 1)
    }
}

impl TryFrom<Value> for Tile {
    type Error = GameError;

    fn try_from(value: Value) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Tile> for Value {
    fn from(tile: Tile) -> Self {
        tile.0
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

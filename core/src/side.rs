use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Direction toward which a board is tilted.
///
/// Each side doubles as a viewing perspective: in the logical frame of a side, tilting toward it
/// always moves tiles toward increasing `y`. `North` is the identity perspective.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    pub const fn opposite(self) -> Self {
        use Side::*;
        match self {
            North => South,
            East => West,
            South => North,
            West => East,
        }
    }

    /// Maps logical coordinates seen from this side to physical board coordinates.
    ///
    /// `coords` must be within `[0, size)`.
    pub const fn to_physical(self, (x, y): Coord2, size: Coord) -> Coord2 {
        let last = size - 1;
        use Side::*;
        match self {
            North => (x, y),
            East => (y, last - x),
            South => (last - x, last - y),
            West => (last - y, x),
        }
    }

    pub const fn as_str(self) -> &'static str {
        use Side::*;
        match self {
            North => "north",
            East => "east",
            South => "south",
            West => "west",
        }
    }
}

impl Default for Side {
    fn default() -> Self {
        Self::North
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseSideError;

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of north, east, south, west")
    }
}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        use Side::*;
        match s {
            _ if s.eq_ignore_ascii_case("north") || s.eq_ignore_ascii_case("n") => Ok(North),
            _ if s.eq_ignore_ascii_case("east") || s.eq_ignore_ascii_case("e") => Ok(East),
            _ if s.eq_ignore_ascii_case("south") || s.eq_ignore_ascii_case("s") => Ok(South),
            _ if s.eq_ignore_ascii_case("west") || s.eq_ignore_ascii_case("w") => Ok(West),
            _ => Err(ParseSideError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn north_is_identity() {
        for x in 0..4 {
            for y in 0..4 {
                assert_eq!(Side::North.to_physical((x, y), 4), (x, y));
            }
        }
    }

    #[test]
    fn logical_up_points_toward_side() {
        // one logical step "up" from the center of a 3x3 board
        let size = 3;
        assert_eq!(Side::North.to_physical((1, 2), size), (1, 2));
        assert_eq!(Side::East.to_physical((1, 2), size), (2, 1));
        assert_eq!(Side::South.to_physical((1, 2), size), (1, 0));
        assert_eq!(Side::West.to_physical((1, 2), size), (0, 1));
    }

    #[test]
    fn every_side_is_a_bijection() {
        let size = 5;
        for side in Side::ALL {
            let mut seen = [[false; 5]; 5];
            for x in 0..size {
                for y in 0..size {
                    let (px, py) = side.to_physical((x, y), size);
                    assert!(px < size && py < size);
                    assert!(!seen[px as usize][py as usize], "{side} maps twice to ({px}, {py})");
                    seen[px as usize][py as usize] = true;
                }
            }
        }
    }

    #[test]
    fn parses_names_and_initials() {
        assert_eq!("North".parse(), Ok(Side::North));
        assert_eq!("e".parse(), Ok(Side::East));
        assert_eq!("SOUTH".parse(), Ok(Side::South));
        assert_eq!("w".parse(), Ok(Side::West));
        assert_eq!("up".parse::<Side>(), Err(ParseSideError));
    }

    #[test]
    fn opposite_is_an_involution() {
        for side in Side::ALL {
            assert_ne!(side.opposite(), side);
            assert_eq!(side.opposite().opposite(), side);
        }
    }
}

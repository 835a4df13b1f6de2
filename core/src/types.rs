/// Single coordinate axis used for the board size and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(x, y)`, `(0, 0)` being the lower-left corner.
pub type Coord2 = (Coord, Coord);

/// Numeric value carried by a tile.
pub type Value = u32;

/// Accumulated score of a game.
pub type Score = u32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

use crate::*;
pub use random::*;

mod random;

/// Source of the tiles that appear after each move.
pub trait TileGenerator {
    /// Picks one of the `empty` physical cells and the tile to place there, `None` if it declines
    /// or there is no empty cell.
    fn generate(&mut self, empty: &[Coord2]) -> Option<(Coord2, Tile)>;
}

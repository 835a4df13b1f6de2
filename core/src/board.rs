use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of optional tiles.
///
/// Storage is always physical, indexed by `(x, y)` with `(0, 0)` at the lower-left corner.
/// Operations that need a rotated frame take the viewing [`Side`] as an argument instead of
/// keeping it as state, so a board is never observed through a leftover perspective.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Array2<Option<Tile>>", into = "Array2<Option<Tile>>")]
pub struct Board {
    grid: Array2<Option<Tile>>,
}

impl Board {
    pub fn new(size: Coord) -> Self {
        let size = size.max(1);
        Self {
            grid: Array2::default((size, size).to_nd_index()),
        }
    }

    /// Builds a board from raw values indexed by `[x, y]`, `0` meaning an empty cell.
    pub fn from_values(values: &Array2<Value>) -> Result<Self> {
        let mut grid = Array2::default(values.dim());
        for (index, &value) in values.indexed_iter() {
            if value != 0 {
                grid[index] = Some(Tile::new(value)?);
            }
        }
        Self::from_grid(grid)
    }

    /// Wraps `grid` after checking it is square, not empty, and fits [`Coord`].
    pub fn from_grid(grid: Array2<Option<Tile>>) -> Result<Self> {
        let (dim_x, dim_y) = grid.dim();
        if dim_x != dim_y || dim_x == 0 || dim_x > Coord::MAX.into() {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { grid })
    }

    pub fn size(&self) -> Coord {
        // bounded to `Coord` on construction
        self.grid.nrows() as Coord
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Physical coordinates of the logical `coords` seen from `side`.
    pub fn physical(&self, side: Side, coords: Coord2) -> Coord2 {
        side.to_physical(coords, self.size())
    }

    /// Tile at the logical `coords` seen from `side`.
    pub fn tile(&self, side: Side, coords: Coord2) -> Option<Tile> {
        self[self.physical(side, coords)]
    }

    pub fn add_tile(&mut self, coords: Coord2, tile: Tile) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.grid[coords.to_nd_index()];
        if cell.is_some() {
            return Err(GameError::CellOccupied);
        }
        *cell = Some(tile);
        Ok(())
    }

    /// Relocates the tile at logical `from` to logical `to`, both seen from `side`.
    ///
    /// A tile already at `to` is merged with the moving one, the merged tile is returned. Moving
    /// out of an empty cell does nothing, moving onto a tile it cannot merge with is refused.
    pub(crate) fn move_tile(&mut self, side: Side, from: Coord2, to: Coord2) -> Result<Option<Tile>> {
        let from = self.physical(side, from);
        let to = self.physical(side, to);
        if from == to {
            return Ok(None);
        }

        let Some(tile) = self[from] else {
            return Ok(None);
        };
        let merged = match self[to] {
            Some(existing) if !tile.can_merge_with(existing) => {
                return Err(GameError::InvalidMerge);
            }
            Some(existing) => Some(existing.doubled()),
            None => None,
        };

        self.grid[from.to_nd_index()] = None;
        self.grid[to.to_nd_index()] = Some(merged.unwrap_or(tile));
        Ok(merged)
    }

    pub fn clear(&mut self) {
        self.grid.fill(None);
    }

    /// Occupied cells with their physical coordinates.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.grid
            .indexed_iter()
            .filter_map(|((x, y), cell)| cell.map(|tile| ((x as Coord, y as Coord), tile)))
    }

    /// Physical coordinates of every empty cell.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.grid
            .indexed_iter()
            .filter(|(_, cell)| cell.is_none())
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }

    /// Values indexed by `[x, y]`, `0` meaning an empty cell.
    pub fn to_values(&self) -> Array2<Value> {
        self.grid.map(|cell| cell.map_or(0, Tile::value))
    }
}

impl TryFrom<Array2<Option<Tile>>> for Board {
    type Error = GameError;

    fn try_from(grid: Array2<Option<Tile>>) -> Result<Self> {
        Self::from_grid(grid)
    }
}

impl From<Board> for Array2<Option<Tile>> {
    fn from(board: Board) -> Self {
        board.grid
    }
}

impl Index<Coord2> for Board {
    type Output = Option<Tile>;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.grid[coords.to_nd_index()]
    }
}

use alloc::vec::Vec;
use core::fmt;
use core::num::Saturating;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The state of a game: the board, the score, and the tile value that wins it.
///
/// Coordinates are `(x, y)`, `x` being the column and `y` the row, `(0, 0)` is the lower-left
/// corner of the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ModelFields")]
pub struct Model {
    board: Board,
    score: Saturating<Score>,
    winning_value: Value,
}

/// Unchecked field layout of [`Model`], only used while deserializing.
#[derive(Deserialize)]
struct ModelFields {
    board: Board,
    score: Saturating<Score>,
    winning_value: Value,
}

impl TryFrom<ModelFields> for Model {
    type Error = GameError;

    fn try_from(fields: ModelFields) -> Result<Self> {
        Self::from_parts(fields.board, fields.score.0, fields.winning_value)
    }
}

/// Bookkeeping for one tilt, dropped when the tilt returns.
struct TiltScope {
    side: Side,
    /// Physical cells holding a tile produced by a merge during this tilt.
    merged: HashSet<Coord2>,
    outcome: TiltOutcome,
}

impl TiltScope {
    fn new(side: Side) -> Self {
        Self {
            side,
            merged: HashSet::new(),
            outcome: TiltOutcome::default(),
        }
    }
}

impl Model {
    /// An empty board of `size` with score 0.
    pub fn new(size: Coord) -> Self {
        Self::with_config(GameConfig::new(size, MAX_PIECE))
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            board: Board::new(config.size),
            score: Saturating(0),
            winning_value: config.winning_value,
        }
    }

    /// A game whose tiles are given by `values`, indexed by `[x, y]` with `0` for empty cells.
    pub fn from_values(values: &Array2<Value>, score: Score) -> Result<Self> {
        Self::from_parts(Board::from_values(values)?, score, MAX_PIECE)
    }

    /// Assembles a game from an existing board, `winning_value` must be a valid tile value.
    pub fn from_parts(board: Board, score: Score, winning_value: Value) -> Result<Self> {
        if !Tile::is_valid_value(winning_value) {
            return Err(GameError::InvalidTileValue);
        }
        Ok(Self {
            board,
            score: Saturating(score),
            winning_value,
        })
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.winning_value)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    pub fn score(&self) -> Score {
        self.score.0
    }

    pub fn winning_value(&self) -> Value {
        self.winning_value
    }

    /// Tile at `coords`, `None` when the cell is empty.
    pub fn tile(&self, coords: Coord2) -> Result<Option<Tile>> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.board[coords])
    }

    pub fn add_tile(&mut self, coords: Coord2, tile: Tile) -> Result<()> {
        self.board.add_tile(coords, tile)
    }

    /// Empties the board and resets the score.
    pub fn clear(&mut self) {
        log::debug!("Clearing board, final score: {}", self.score());
        self.score = Saturating(0);
        self.board.clear();
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.board.empty_cells()
    }

    /// Places a tile picked by `generator` in one of the empty cells.
    pub fn spawn_tile(&mut self, generator: &mut impl TileGenerator) -> Option<Coord2> {
        let mut empty = Vec::with_capacity(self.config().total_cells().into());
        empty.extend(self.empty_cells());
        if empty.is_empty() {
            log::warn!("Board is full, no tile spawned");
            return None;
        }

        let (coords, tile) = generator.generate(&empty)?;
        match self.board.add_tile(coords, tile) {
            Ok(()) => {
                log::debug!("Spawned {} at {:?}", tile, coords);
                Some(coords)
            }
            Err(err) => {
                log::warn!("Generator picked unusable cell {:?}: {}", coords, err);
                None
            }
        }
    }

    pub fn state(&self) -> GameState {
        if self.max_tile_exists() {
            GameState::Won
        } else if !self.at_least_one_move_exists() {
            GameState::Lost
        } else {
            GameState::InProgress
        }
    }

    /// Whether the game is over: the winning tile is on the board or no move is left.
    pub fn game_over(&self) -> bool {
        self.max_tile_exists() || !self.at_least_one_move_exists()
    }

    pub fn empty_space_exists(&self) -> bool {
        self.board.empty_cells().next().is_some()
    }

    pub fn max_tile_exists(&self) -> bool {
        self.board
            .iter_tiles()
            .any(|(_, tile)| tile.value() == self.winning_value)
    }

    /// Whether a cell is empty or two edge-adjacent tiles share a value.
    pub fn at_least_one_move_exists(&self) -> bool {
        if self.empty_space_exists() {
            return true;
        }

        // checking the right and upper neighbour of every tile covers each adjacent pair once
        let size = self.size();
        self.board.iter_tiles().any(|((x, y), tile)| {
            (x + 1 < size && self.board[(x + 1, y)] == Some(tile))
                || (y + 1 < size && self.board[(x, y + 1)] == Some(tile))
        })
    }

    /// Whether tilting toward `side` would change the board.
    pub fn can_tilt(&self, side: Side) -> bool {
        self.clone().tilt(side).has_update()
    }

    /// Slides every tile toward `side` as far as possible, merging equal tiles at most once each.
    pub fn tilt(&mut self, side: Side) -> TiltOutcome {
        let mut scope = TiltScope::new(side);
        let size = self.size();

        // the row at the destination edge cannot move, rows nearer to it settle first
        for y in (0..size - 1).rev() {
            for x in 0..size {
                self.move_tile_up(&mut scope, (x, y));
            }
        }

        log::debug!(
            "Tilted {}, merges: {}, score gained: {}",
            side,
            scope.outcome.merges.len(),
            scope.outcome.score_gained
        );
        scope.outcome
    }

    /// Tilts the single logical column `x` seen from `side`.
    pub fn tilt_column(&mut self, side: Side, x: Coord) -> Result<TiltOutcome> {
        self.board.validate_coords((x, 0))?;

        let mut scope = TiltScope::new(side);
        for y in (0..self.size() - 1).rev() {
            self.move_tile_up(&mut scope, (x, y));
        }
        Ok(scope.outcome)
    }

    /// Moves the tile at logical `(x, y)` as far up as it can go, merging it with the first tile
    /// in its way when both have the same value and the other one did not merge yet.
    fn move_tile_up(&mut self, scope: &mut TiltScope, (x, y): Coord2) {
        let side = scope.side;
        let Some(tile) = self.board.tile(side, (x, y)) else {
            return;
        };

        let mut target = y;
        for row in y + 1..self.size() {
            match self.board.tile(side, (x, row)) {
                None => target = row,
                Some(other) => {
                    let physical = self.board.physical(side, (x, row));
                    if !scope.merged.contains(&physical) && tile.can_merge_with(other) {
                        target = row;
                    }
                    break;
                }
            }
        }

        if target == y {
            return;
        }

        let merged = match self.board.move_tile(side, (x, y), (x, target)) {
            Ok(Some(merged)) => merged,
            Ok(None) => {
                scope.outcome.moved = true;
                log::trace!("Moved {} from {:?} to {:?} seen from {}", tile, (x, y), (x, target), side);
                return;
            }
            Err(err) => {
                log::warn!("Skipped move of {} to {:?} seen from {}: {}", tile, (x, target), side, err);
                return;
            }
        };

        scope.outcome.moved = true;
        let coords = self.board.physical(side, (x, target));
        scope.merged.insert(coords);
        self.score += Saturating(merged.value());
        scope.outcome.score_gained = scope.outcome.score_gained.saturating_add(merged.value());
        scope.outcome.merges.push(Merge {
            coords,
            value: merged.value(),
        });
        log::trace!("Merged {} into {} at {:?}", tile, merged, coords);
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::with_config(GameConfig::default())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "[")?;
        let size = self.size();
        for y in (0..size).rev() {
            for x in 0..size {
                match self.board[(x, y)] {
                    Some(tile) => write!(f, "|{:>4}", tile.value())?,
                    None => f.write_str("|    ")?,
                }
            }
            writeln!(f, "|")?;
        }
        let over = if self.game_over() { "over" } else { "not over" };
        writeln!(f, "] {} (game is {}) ", self.score(), over)
    }
}

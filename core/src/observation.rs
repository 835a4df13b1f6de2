use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Plain snapshot of a game, meant for serialization and for handing the board to other layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub size: Coord,
    /// Tile values indexed by `[x, y]`, `0` meaning an empty cell.
    pub values: Array2<Value>,
    pub score: Score,
    pub winning_value: Value,
    pub state: GameState,
}

impl Observation {
    pub fn new(
        config: GameConfig,
        values: Array2<Value>,
        score: Score,
        state: GameState,
    ) -> Result<Self> {
        let obs = Self {
            size: config.size,
            values,
            score,
            winning_value: config.winning_value,
            state,
        };
        obs.validate()?;
        Ok(obs)
    }

    pub fn from_model(model: &Model) -> Self {
        let config = model.config();
        Self {
            size: config.size,
            values: model.board().to_values(),
            score: model.score(),
            winning_value: config.winning_value,
            state: model.state(),
        }
    }

    /// Checks the shape and values, and that `state` is the one the board actually is in.
    pub fn validate(&self) -> Result<()> {
        self.rebuild().map(|_| ())
    }

    fn rebuild(&self) -> Result<Model> {
        let expected = (self.size as usize, self.size as usize);
        if self.values.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }

        let model = Model::from_parts(
            Board::from_values(&self.values)?,
            self.score,
            self.winning_value,
        )?;
        if model.state() != self.state {
            return Err(GameError::StateMismatch);
        }
        Ok(model)
    }
}

impl TryFrom<Observation> for Model {
    type Error = GameError;

    fn try_from(obs: Observation) -> Result<Self> {
        obs.rebuild()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use ndarray::array;

    #[test]
    fn from_model_maps_values_and_state() {
        let mut model = Model::from_values(&array![[2, 0], [0, 4]], 16).unwrap();
        model.tilt(Side::North);

        let obs = Observation::from_model(&model);

        assert_eq!(obs.size, 2);
        assert_eq!(obs.values, array![[0, 2], [0, 4]]);
        assert_eq!(obs.score, 16);
        assert_eq!(obs.winning_value, MAX_PIECE);
        assert_eq!(obs.state, GameState::InProgress);
    }

    #[test]
    fn serde_round_trip_rebuilds_model() {
        let model = Model::from_values(&array![[2, 4], [8, 0]], 36).unwrap();

        let json = serde_json::to_string(&Observation::from_model(&model)).unwrap();
        let obs: Observation = serde_json::from_str(&json).unwrap();

        assert_eq!(Model::try_from(obs), Ok(model));
    }

    #[test]
    fn round_trip_keeps_custom_winning_value() {
        let mut game = Model::with_config(GameConfig::new(2, 16));
        game.add_tile((0, 0), Tile::new(8).unwrap()).unwrap();
        game.add_tile((0, 1), Tile::new(8).unwrap()).unwrap();
        game.tilt(Side::North);
        assert_eq!(game.state(), GameState::Won);

        let json = serde_json::to_string(&Observation::from_model(&game)).unwrap();
        let obs: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(obs.winning_value, 16);
        assert_eq!(obs.state, GameState::Won);

        let back = Model::try_from(obs).unwrap();
        assert_eq!(back.state(), GameState::Won);
        assert_eq!(back.config(), game.config());
        assert_eq!(back, game);
    }

    #[test]
    fn validate_rejects_state_that_board_does_not_have() {
        let model = Model::from_values(&array![[2, 0], [0, 0]], 0).unwrap();
        let mut obs = Observation::from_model(&model);
        assert_eq!(obs.validate(), Ok(()));

        obs.state = GameState::Lost;
        assert_eq!(obs.validate(), Err(GameError::StateMismatch));
        assert_eq!(Model::try_from(obs), Err(GameError::StateMismatch));
    }

    #[test]
    fn validate_rejects_shape_mismatch() {
        let obs = Observation {
            size: 3,
            values: Array2::zeros([2, 2]),
            score: 0,
            winning_value: MAX_PIECE,
            state: GameState::InProgress,
        };

        assert_eq!(obs.validate(), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn new_rejects_invalid_values() {
        let config = GameConfig::new(2, MAX_PIECE);
        let result = Observation::new(config, array![[2, 5], [0, 0]], 0, GameState::InProgress);
        assert_eq!(result, Err(GameError::InvalidTileValue));

        let mut obs = Observation::from_model(&Model::new(2));
        obs.winning_value = 100;
        assert_eq!(obs.validate(), Err(GameError::InvalidTileValue));
    }
}

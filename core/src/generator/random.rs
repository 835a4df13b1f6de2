use rand::prelude::*;

use super::*;

/// Default chance of spawning a 4 instead of a 2.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Generation strategy picking a uniformly random empty cell, placing a 2 most of the time and a 4
/// otherwise. Deterministic for a given seed.
#[derive(Clone, Debug)]
pub struct RandomTileGenerator {
    rng: SmallRng,
    four_probability: f64,
}

impl RandomTileGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            four_probability: DEFAULT_FOUR_PROBABILITY,
        }
    }

    pub fn with_four_probability(mut self, probability: f64) -> Self {
        let clamped = if probability.is_nan() {
            DEFAULT_FOUR_PROBABILITY
        } else {
            probability.clamp(0.0, 1.0)
        };
        if clamped != probability {
            log::warn!(
                "Probability of a 4 out of range, requested {} but using {}",
                probability,
                clamped
            );
        }
        self.four_probability = clamped;
        self
    }

    pub fn four_probability(&self) -> f64 {
        self.four_probability
    }
}

impl TileGenerator for RandomTileGenerator {
    fn generate(&mut self, empty: &[Coord2]) -> Option<(Coord2, Tile)> {
        if empty.is_empty() {
            return None;
        }

        let coords = empty[self.rng.random_range(0..empty.len())];
        let tile = if self.rng.random_bool(self.four_probability) {
            Tile::new(4)
        } else {
            Tile::new(2)
        };
        tile.ok().map(|tile| (coords, tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn spawn_sequence(seed: u64, count: usize) -> Vec<Option<Coord2>> {
        let mut model = Model::new(4);
        let mut generator = RandomTileGenerator::new(seed);
        (0..count).map(|_| model.spawn_tile(&mut generator)).collect()
    }

    #[test]
    fn same_seed_spawns_same_tiles() {
        assert_eq!(spawn_sequence(7, 10), spawn_sequence(7, 10));
    }

    #[test]
    fn spawns_only_twos_and_fours_into_empty_cells() {
        let mut model = Model::new(4);
        let mut generator = RandomTileGenerator::new(42);

        for _ in 0..16 {
            let coords = model.spawn_tile(&mut generator).unwrap();
            let value = model.tile(coords).unwrap().unwrap().value();
            assert!(value == 2 || value == 4);
        }

        assert!(!model.empty_space_exists());
        assert_eq!(model.spawn_tile(&mut generator), None);
    }

    #[test]
    fn four_probability_is_clamped() {
        let always_four = RandomTileGenerator::new(1).with_four_probability(3.0);
        assert_eq!(always_four.four_probability(), 1.0);

        let mut model = Model::new(2);
        let mut generator = always_four;
        let coords = model.spawn_tile(&mut generator).unwrap();
        assert_eq!(model.tile(coords).unwrap().map(Tile::value), Some(4));

        let never_four = RandomTileGenerator::new(1).with_four_probability(-1.0);
        assert_eq!(never_four.four_probability(), 0.0);
    }
}

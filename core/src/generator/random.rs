use super::*;

/// Purely random placement: draws a cell, redraws when it already holds a mine.
///
/// There is no safe zone around the first click, any cell may end up mined.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: BoardConfig) -> MineLayout {
        use rand::prelude::*;

        let dimension = config.dimension;
        let total_cells = config.total_cells();

        // optimize for full boards
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Board already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return MineLayout {
                mine_mask: Array2::from_elem((dimension, dimension).to_nd_index(), true),
                mine_count: total_cells,
            };
        }

        let mut mine_mask: Array2<bool> = Array2::default((dimension, dimension).to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed = 0;
        let mut draws = 0u32;

        while mines_placed < config.mines {
            let coords = (
                rng.random_range(0..dimension),
                rng.random_range(0..dimension),
            );
            draws += 1;
            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} with seed {} after {} draws",
            mines_placed,
            dimension,
            dimension,
            self.seed,
            draws
        );

        MineLayout {
            mine_mask,
            mine_count: mines_placed,
        }
    }
}

/// Seed derived from the wall clock, for boards where reproducibility does not matter.
pub fn time_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

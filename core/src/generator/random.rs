use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniform placement: every subset of `mines` cells is equally likely.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let total_cells = usize::from(config.total_cells());
        let mut mines = usize::from(config.mines);
        if mines > total_cells {
            log::warn!(
                "Board already full, requested {} mines but only {} cells fit",
                mines,
                total_cells
            );
            mines = total_cells;
        }

        let mut mine_mask: Array2<bool> = Array2::default((config.dim, config.dim).to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let cells = mine_mask
                .as_slice_mut()
                .expect("freshly allocated array is in standard layout");
            for place in index::sample(&mut rng, total_cells, mines) {
                cells[place] = true;
            }
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        log::debug!(
            "Laid {} mines on a {}x{} board (seed {})",
            layout.mine_count(),
            config.dim,
            config.dim,
            self.seed
        );
        layout
    }
}

use alloc::vec::Vec;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::*;

/// Uniform mine placement that keeps the first reveal safe according to a
/// [`FirstMovePolicy`].
///
/// The generator owns its RNG, so successive games drawn from one generator
/// differ while the whole sequence stays reproducible from the seed.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator<R = SmallRng> {
    rng: R,
    policy: FirstMovePolicy,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, policy: FirstMovePolicy) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed), policy)
    }
}

impl<R: Rng> RandomLayoutGenerator<R> {
    pub fn from_rng(rng: R, policy: FirstMovePolicy) -> Self {
        Self { rng, policy }
    }

    pub fn policy(&self) -> FirstMovePolicy {
        self.policy
    }

    fn effective_policy(&self, config: GameConfig, safe_zone: CellCount) -> FirstMovePolicy {
        use FirstMovePolicy::*;

        match self.policy {
            SafeNeighborhood if config.mines + safe_zone > config.total_cells() => {
                log::warn!(
                    "Cannot keep first move neighborhood clear with {} mines, fallback to safe cell",
                    config.mines
                );
                SafeCell
            }
            policy => policy,
        }
    }
}

impl<R: Rng> LayoutGenerator for RandomLayoutGenerator<R> {
    fn generate(&mut self, config: GameConfig, start: Coord2) -> MineLayout {
        let mut excluded: Array2<bool> = Array2::default(config.size.to_nd_index());
        let neighborhood: Vec<Coord2> = excluded.iter_neighbors(start).collect();
        let safe_zone = 1 + neighborhood.len() as CellCount;

        excluded[start.to_nd_index()] = true;
        if self.effective_policy(config, safe_zone) == FirstMovePolicy::SafeNeighborhood {
            for &coords in &neighborhood {
                excluded[coords.to_nd_index()] = true;
            }
        }

        let mut candidates: Vec<Coord2> = excluded
            .indexed_iter()
            .filter(|&(_, &is_excluded)| !is_excluded)
            .map(|((x, y), _)| (x as Coord, y as Coord))
            .collect();

        let wanted = usize::from(config.mines);
        if wanted > candidates.len() {
            log::warn!(
                "Minefield already full, requested {} mines but only {} cells are allowed",
                wanted,
                candidates.len()
            );
        }
        let placed = wanted.min(candidates.len());

        // partial Fisher-Yates: the first `placed` candidates become mines
        for i in 0..placed {
            let j = self.rng.random_range(i..candidates.len());
            candidates.swap(i, j);
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for &coords in &candidates[..placed] {
            mine_mask[coords.to_nd_index()] = true;
        }
        log::debug!("Placed {} mines, first move at {:?}", placed, start);

        MineLayout::from_mine_mask(mine_mask)
    }
}

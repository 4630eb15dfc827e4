use serde::{Deserialize, Serialize};

use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Source of mine layouts, consulted once per game on the first reveal.
///
/// `start` is the cell the player opened first. Implementations are expected
/// to return a layout of exactly `config.size`.
pub trait LayoutGenerator {
    fn generate(&mut self, config: GameConfig, start: Coord2) -> MineLayout;
}

impl<G: LayoutGenerator + ?Sized> LayoutGenerator for &mut G {
    fn generate(&mut self, config: GameConfig, start: Coord2) -> MineLayout {
        (**self).generate(config, start)
    }
}

/// Which cells the first reveal keeps free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstMovePolicy {
    /// Only the opened cell is guaranteed safe.
    SafeCell,
    /// The opened cell and its neighbors are safe, so the first reveal always floods.
    SafeNeighborhood,
}

impl Default for FirstMovePolicy {
    fn default() -> Self {
        Self::SafeCell
    }
}

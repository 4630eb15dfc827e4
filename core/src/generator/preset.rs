use ndarray::Array2;

use crate::*;

/// Hands out a fixed layout, for replays and deterministic boards.
///
/// The layout is not adjusted for the first move: a preset with a mine under
/// the first reveal loses immediately. A preset of the wrong size is cropped
/// or padded to fit the requested board.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetLayoutGenerator {
    layout: MineLayout,
}

impl PresetLayoutGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(Self::new)
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

impl LayoutGenerator for PresetLayoutGenerator {
    fn generate(&mut self, config: GameConfig, start: Coord2) -> MineLayout {
        if self.layout.contains_mine(start) {
            log::warn!("Preset layout has a mine under the first move at {:?}", start);
        }

        if self.layout.size() == config.size {
            return self.layout.clone();
        }

        log::warn!(
            "Preset layout size {:?} does not match board size {:?}, fitting it",
            self.layout.size(),
            config.size
        );
        let (x_end, y_end) = config.size;
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for x in 0..x_end {
            for y in 0..y_end {
                if self.layout.validate_coords((x, y)).is_ok() {
                    mine_mask[(x, y).to_nd_index()] = self.layout.contains_mine((x, y));
                }
            }
        }
        MineLayout::from_mine_mask(mine_mask)
    }
}

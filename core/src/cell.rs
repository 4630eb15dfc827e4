use serde::{Deserialize, Serialize};

/// Full engine-side state of one grid position.
///
/// `adjacent_mines` is filled in once, when the layout is placed on the first
/// reveal, and never changes afterwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    /// Hidden and unflagged, the only state a reveal acts on.
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}

/// What a renderer is allowed to know about a cell.
///
/// Mine identity only leaks once the game is over: `Mine` and `Misflagged`
/// appear after a loss, `TriggeredMine` marks the cell that ended it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    TriggeredMine,
    Misflagged,
}

impl CellView {
    /// Whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::Misflagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

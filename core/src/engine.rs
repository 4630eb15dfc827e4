use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Active (first reveal places the mines)
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No mines placed yet
    NotStarted,
    Active,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Serializable read model handed to renderers and external stores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub mine_count: CellCount,
    pub flagged_count: CellCount,
    pub remaining_flags: CellCount,
    pub revealed_count: CellCount,
    pub elapsed_secs: u32,
    pub triggered_mine: Option<Coord2>,
    pub cells: Array2<CellView>,
}

/// A minesweeper game from the empty board to a win or a loss.
///
/// Mines are placed lazily by `G` on the first reveal. Every operation
/// silently ignores gestures that are not valid in the current state and
/// reports what happened through its outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Minesweeper<G = RandomLayoutGenerator> {
    config: GameConfig,
    generator: G,
    board: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
    phase: GamePhase,
    timer: Timer,
    triggered_mine: Option<Coord2>,
}

impl<G: LayoutGenerator> Minesweeper<G> {
    pub fn new(config: GameConfig, generator: G) -> Self {
        let config = GameConfig::new(config.size, config.mines);
        Self {
            config,
            generator,
            board: Array2::default(config.size.to_nd_index()),
            mine_count: config.mines,
            revealed_count: 0,
            flagged_count: 0,
            phase: GamePhase::default(),
            timer: Timer::default(),
            triggered_mine: None,
        }
    }

    /// Discards the current board and starts over with `config`, keeping the generator.
    pub fn new_game(&mut self, config: GameConfig) {
        let config = GameConfig::new(config.size, config.mines);
        log::debug!("New game: {:?}", config);
        self.config = config;
        self.board = Array2::default(config.size.to_nd_index());
        self.mine_count = config.mines;
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.phase = GamePhase::default();
        self.timer.reset();
        self.triggered_mine = None;
    }

    pub fn reset(&mut self) {
        self.new_game(self.config);
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.size.0
    }

    pub fn height(&self) -> Coord {
        self.config.size.1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.config.total_cells() - self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn remaining_flags(&self) -> CellCount {
        self.mine_count.saturating_sub(self.flagged_count)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Raw engine state at `coords`, mine identity included.
    ///
    /// Meant for the engine's own bookkeeping and tests. Renderers must go
    /// through [`Self::view_at`], which hides mines until they are visible.
    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.config
            .contains(coords)
            .then(|| self.board[coords.to_nd_index()])
    }

    /// Every cell with its raw state, see [`Self::cell_at`].
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.board
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    /// What a renderer should draw at `coords`.
    pub fn view_at(&self, coords: Coord2) -> Option<CellView> {
        let cell = self.cell_at(coords)?;
        let lost = self.phase == GamePhase::Lost;

        Some(match cell {
            _ if lost && self.triggered_mine == Some(coords) => CellView::TriggeredMine,
            Cell {
                is_mine: true,
                is_flagged: true,
                ..
            } => CellView::Flagged,
            Cell { is_mine: true, .. } if lost => CellView::Mine,
            Cell {
                is_flagged: true, ..
            } if lost => CellView::Misflagged,
            Cell {
                is_flagged: true, ..
            } => CellView::Flagged,
            Cell {
                is_revealed: true,
                is_mine: false,
                adjacent_mines,
                ..
            } => CellView::Revealed(adjacent_mines),
            _ => CellView::Hidden,
        })
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let cells = Array2::from_shape_fn(self.board.dim(), |(x, y)| {
            self.view_at((x as Coord, y as Coord))
                .unwrap_or_default()
        });

        BoardSnapshot {
            config: self.config,
            phase: self.phase,
            mine_count: self.mine_count,
            flagged_count: self.flagged_count,
            remaining_flags: self.remaining_flags(),
            revealed_count: self.revealed_count,
            elapsed_secs: self.elapsed_secs(),
            triggered_mine: self.triggered_mine,
            cells,
        }
    }

    /// Advances the game clock by one second while the game is active.
    pub fn tick(&mut self) -> bool {
        self.phase == GamePhase::Active && self.timer.tick()
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        use MarkOutcome::*;

        if !self.config.contains(coords) || self.phase != GamePhase::Active {
            return NoChange;
        }

        let remaining_flags = self.remaining_flags();
        let cell = &mut self.board[coords.to_nd_index()];
        let outcome = match (cell.is_revealed, cell.is_flagged) {
            (true, _) => NoChange,
            (false, true) => {
                cell.is_flagged = false;
                self.flagged_count -= 1;
                Changed
            }
            (false, false) if remaining_flags == 0 => NoChange,
            (false, false) => {
                cell.is_flagged = true;
                self.flagged_count += 1;
                Changed
            }
        };

        if outcome.has_update() {
            log::debug!(
                "Flag toggled at {:?}, {} flags remaining",
                coords,
                self.remaining_flags()
            );
        }
        outcome
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.config.contains(coords)
            || self.phase.is_finished()
            || !self.board[coords.to_nd_index()].is_hidden()
        {
            return RevealOutcome::NoChange;
        }

        if self.phase.is_initial() {
            self.place_mines(coords);
        }

        self.reveal_single_cell(coords)
    }

    /// Reveals the hidden neighbors of a number whose flags are all placed,
    /// or acts as [`Self::reveal`] on any other cell.
    pub fn chord_reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(cell) = self.cell_at(coords) else {
            return RevealOutcome::NoChange;
        };

        if !cell.is_revealed {
            return self.reveal(coords);
        }

        if self.phase != GamePhase::Active
            || cell.is_mine
            || cell.adjacent_mines == 0
            || cell.adjacent_mines != self.count_flagged_neighbors(coords)
        {
            return RevealOutcome::NoChange;
        }

        let neighbors: Vec<Coord2> = self.board.iter_neighbors(coords).collect();
        neighbors
            .into_iter()
            .fold(RevealOutcome::NoChange, |outcome, pos| {
                if self.phase.is_finished() {
                    outcome
                } else {
                    outcome | self.reveal_single_cell(pos)
                }
            })
    }

    fn place_mines(&mut self, start: Coord2) {
        let layout = self.generator.generate(self.config, start);
        debug_assert_eq!(layout.size(), self.config.size);

        for ((x, y), cell) in self.board.indexed_iter_mut() {
            let coords = (x as Coord, y as Coord);
            cell.is_mine = layout.contains_mine(coords);
            cell.adjacent_mines = if cell.is_mine {
                0
            } else {
                layout.adjacent_mine_count(coords)
            };
        }

        if layout.mine_count() != self.config.mines {
            log::warn!(
                "Layout has {} mines, configured {}",
                layout.mine_count(),
                self.config.mines
            );
        }
        self.mine_count = layout.mine_count();
        self.phase = GamePhase::Active;
        self.timer.start();
        log::debug!("Game started at {:?} with {} mines", start, self.mine_count);
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = &mut self.board[coords.to_nd_index()];
        if !cell.is_hidden() {
            return RevealOutcome::NoChange;
        }

        cell.is_revealed = true;
        let Cell {
            is_mine,
            adjacent_mines,
            ..
        } = *cell;
        self.revealed_count += 1;

        if is_mine {
            log::debug!("Reveal cell at {:?} hit a mine", coords);
            self.end_game(false, Some(coords));
            return RevealOutcome::HitMine;
        }

        log::debug!("Reveal cell at {:?}, mine count: {}", coords, adjacent_mines);

        if adjacent_mines == 0 {
            self.flood_from(coords);
        }

        if self.revealed_count == self.safe_cell_count() {
            self.end_game(true, None);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Opens the region connected to a zero cell that was just revealed.
    fn flood_from(&mut self, origin: Coord2) {
        let mut to_visit = VecDeque::from([origin]);

        while let Some(coords) = to_visit.pop_front() {
            for pos in self.board.iter_neighbors(coords) {
                let neighbor = &mut self.board[pos.to_nd_index()];
                if !neighbor.is_hidden() || neighbor.is_mine {
                    continue;
                }

                neighbor.is_revealed = true;
                self.revealed_count += 1;
                log::trace!(
                    "Flood opened cell at {:?}, mine count: {}",
                    pos,
                    neighbor.adjacent_mines
                );

                if neighbor.adjacent_mines == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    fn end_game(&mut self, won: bool, triggered_mine: Option<Coord2>) {
        if self.phase.is_finished() {
            return;
        }

        self.timer.stop();
        self.triggered_mine = triggered_mine;

        if won {
            self.phase = GamePhase::Won;
            for cell in self.board.iter_mut().filter(|cell| cell.is_mine) {
                if !cell.is_flagged {
                    cell.is_flagged = true;
                    self.flagged_count += 1;
                }
            }
        } else {
            self.phase = GamePhase::Lost;
            for cell in self.board.iter_mut().filter(|cell| cell.is_mine) {
                cell.is_revealed = true;
            }
        }

        log::debug!(
            "Game ended: {:?} after {}s",
            self.phase,
            self.timer.elapsed_secs()
        );
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.board
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos.to_nd_index()].is_flagged)
            .count() as u8
    }
}

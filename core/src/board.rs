use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Board generated, nothing revealed yet
    Ready,
    /// At least one safe cell revealed
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Square minesweeper board and everything that happens on it, from generation to the end of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    /// `None` for boards built from a fixed layout
    seed: Option<u64>,
    grid: Array2<Cell>,
    flags_remaining: isize,
    revealed_count: CellCount,
    state: GameState,
}

impl Board {
    /// New board for `difficulty`, mines placed from a wall-clock seed.
    pub fn initialize(difficulty: Difficulty) -> Self {
        Self::initialize_with_seed(difficulty, time_seed())
    }

    pub fn initialize_with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::generated(difficulty.config(), seed)
    }

    /// New board with a custom size and mine count.
    pub fn with_config(config: BoardConfig, seed: u64) -> Result<Self> {
        let config = BoardConfig::new(config.dimension, config.mines)?;
        Ok(Self::generated(config, seed))
    }

    /// New board over an existing mine layout, neighbor counts are computed here.
    pub fn from_layout(layout: MineLayout) -> Self {
        let config = layout.config();
        let dimension = config.dimension;
        let grid = Array2::from_shape_fn((dimension, dimension).to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell::hidden(layout[coords], layout.adjacent_mine_count(coords))
        });

        log::debug!(
            "New {}x{} board with {} mines",
            dimension,
            dimension,
            config.mines
        );

        Self {
            config,
            seed: None,
            grid,
            flags_remaining: config.mines as isize,
            revealed_count: 0,
            state: Default::default(),
        }
    }

    fn generated(config: BoardConfig, seed: u64) -> Self {
        let layout = RandomMineGenerator::new(seed).generate(config);
        Self {
            seed: Some(seed),
            ..Self::from_layout(layout)
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn dimension(&self) -> Coord {
        self.config.dimension
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    /// Mines minus placed flags, negative when the player over-flags.
    pub fn flags_remaining(&self) -> isize {
        self.flags_remaining
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Whether a mine was revealed.
    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::Lost)
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Whether moves still make sense, false after a loss and after a win.
    pub fn continue_playing(&self) -> bool {
        !self.state.is_finished()
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.grid[coords.to_nd_index()])
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.grid
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        // the grid is empty after a reset even though the configured dimension is kept
        if in_bounds(coords, self.grid.nrows() as Coord) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Left click. Revealing a zero cell opens its whole connected zero region and the numbered border around it.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self.grid[coords.to_nd_index()];

        if cell.revealed || self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        Ok(if cell.is_mine {
            self.detonate(coords)
        } else {
            self.open_safe(coords)
        })
    }

    /// Right click, only ever places a flag.
    pub fn flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.grid[coords.to_nd_index()];

        if self.state.is_finished() || cell.revealed || cell.flagged {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = true;
        self.flags_remaining -= 1;
        log::debug!("Flagged cell at {:?}", coords);
        Ok(MarkOutcome::Changed)
    }

    pub fn unflag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.grid[coords.to_nd_index()];

        if self.state.is_finished() || !cell.flagged {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = false;
        self.flags_remaining += 1;
        log::debug!("Unflagged cell at {:?}", coords);
        Ok(MarkOutcome::Changed)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        if self.cell(coords)?.flagged {
            self.unflag(coords)
        } else {
            self.flag(coords)
        }
    }

    /// Whether every safe cell has been revealed.
    pub fn check_win(&self) -> bool {
        self.grid.iter().all(|cell| cell.is_mine || cell.revealed)
    }

    /// Drops the grid and the end-of-game state.
    ///
    /// Size, mine count and flag counter are kept, every coordinate is out of bounds until [`Board::restart`].
    pub fn reset(&mut self) {
        self.grid = Array2::default((0, 0));
        self.revealed_count = 0;
        self.state = GameState::Ready;
        log::debug!("Board reset");
    }

    /// Fresh board with the same size and mine count.
    pub fn restart(&mut self, seed: u64) {
        self.reset();
        *self = Self::generated(self.config, seed);
    }

    pub fn restart_random(&mut self) {
        self.restart(time_seed());
    }

    /// Text form of the board, see the [`Display`](fmt::Display) impl.
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    fn detonate(&mut self, coords: Coord2) -> RevealOutcome {
        self.uncover(coords);
        self.state = GameState::Lost;
        log::debug!("Hit mine at {:?}", coords);
        self.reveal_mines();
        RevealOutcome::HitMine
    }

    fn open_safe(&mut self, coords: Coord2) -> RevealOutcome {
        let count = self.uncover(coords);
        log::debug!("Revealed cell at {:?}, mine count: {}", coords, count);

        if count == 0 {
            let mut to_visit: VecDeque<_> = self.hidden_neighbors(coords).collect();
            log::trace!(
                "Starting flood-fill from {:?}, initial neighbors: {:?}",
                coords,
                to_visit
            );

            while let Some(visit_coords) = to_visit.pop_front() {
                // queued more than once through different zero neighbors
                if self.grid[visit_coords.to_nd_index()].revealed {
                    continue;
                }
                debug_assert!(!self.grid[visit_coords.to_nd_index()].is_mine);

                let visit_count = self.uncover(visit_coords);
                log::trace!(
                    "Flood revealed cell at {:?}, mine count: {}",
                    visit_coords,
                    visit_count
                );

                if visit_count == 0 {
                    to_visit.extend(self.hidden_neighbors(visit_coords));
                }
            }
        }

        debug_assert_eq!(
            self.check_win(),
            self.revealed_count == self.config.safe_cells()
        );
        if self.check_win() {
            self.state = GameState::Won;
            log::debug!("Game won after {} reveals", self.revealed_count);
            RevealOutcome::Won
        } else {
            self.state = GameState::Active;
            RevealOutcome::Revealed
        }
    }

    /// Marks a cell revealed, handing its flag back if it had one. Returns the adjacent mine count.
    fn uncover(&mut self, coords: Coord2) -> u8 {
        let cell = &mut self.grid[coords.to_nd_index()];
        cell.revealed = true;
        if cell.flagged {
            cell.flagged = false;
            self.flags_remaining += 1;
        }
        if !cell.is_mine {
            self.revealed_count += 1;
        }
        cell.adjacent_mine_count
    }

    fn reveal_mines(&mut self) {
        for cell in self.grid.iter_mut().filter(|cell| cell.is_mine) {
            cell.revealed = true;
        }
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        NeighborIter::new(coords, self.grid.nrows() as Coord)
            .filter(|&pos| self.grid[pos.to_nd_index()].is_unrevealed())
    }
}

/// One row per line, cells separated by a space: `*` unrevealed, `x` mine, digit for the adjacent mine count.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.rows() {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn board(dimension: Coord, mines: &[Coord2]) -> Board {
        Board::from_layout(MineLayout::from_mine_coords(dimension, mines).unwrap())
    }

    fn revealed_mines(board: &Board) -> Vec<Coord2> {
        board
            .iter_cells()
            .filter(|(_, cell)| cell.is_mine && cell.revealed)
            .map(|(coords, _)| coords)
            .collect()
    }

    #[test]
    fn initialize_sets_up_a_fresh_game() {
        for difficulty in Difficulty::ALL {
            let board = Board::initialize(difficulty);

            assert_eq!(board.dimension(), difficulty.dimension());
            let side = difficulty.dimension() as usize;
            assert_eq!(board.grid.dim(), (side, side));
            assert_eq!(
                board.iter_cells().filter(|(_, cell)| cell.is_mine).count(),
                difficulty.mines() as usize
            );
            assert_eq!(board.flags_remaining(), difficulty.mines() as isize);
            assert_eq!(board.state(), GameState::Ready);
            assert!(!board.is_over());
            assert!(!board.is_won());
            assert!(board.continue_playing());
            assert!(board.iter_cells().all(|(_, cell)| !cell.revealed && !cell.flagged));
        }
    }

    #[test]
    fn same_seed_builds_same_board() {
        let a = Board::initialize_with_seed(Difficulty::Hard, 1234);
        let b = Board::initialize_with_seed(Difficulty::Hard, 1234);
        assert_eq!(a, b);
        assert_eq!(a.seed(), Some(1234));
    }

    #[test]
    fn adjacent_counts_match_recount() {
        let board = Board::initialize_with_seed(Difficulty::Medium, 99);
        let dimension = board.dimension();

        for ((row, col), cell) in board.iter_cells() {
            let mut expected = 0;
            for dr in -1..=1 {
                for dc in -1..=1 {
                    if (dr, dc) == (0, 0) {
                        continue;
                    }
                    let (r, c) = (row + dr, col + dc);
                    if in_bounds((r, c), dimension) && board.cell((r, c)).unwrap().is_mine {
                        expected += 1;
                    }
                }
            }
            assert_eq!(cell.adjacent_mine_count, expected, "at {:?}", (row, col));
        }
    }

    #[test]
    fn custom_config_is_validated() {
        assert_eq!(
            Board::with_config(BoardConfig::new_unchecked(4, 17), 0),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            Board::with_config(BoardConfig::new_unchecked(0, 0), 0),
            Err(GameError::InvalidDimension)
        );
        let board = Board::with_config(BoardConfig::new_unchecked(5, 3), 0).unwrap();
        assert_eq!(board.mine_count(), 3);
    }

    #[test]
    fn reveal_twice_is_a_no_op() {
        let mut board = board(4, &[(0, 0), (3, 3)]);

        assert_eq!(board.reveal((0, 1)).unwrap(), RevealOutcome::Revealed);
        let after_first = board.clone();
        assert_eq!(board.reveal((0, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board, after_first);
    }

    #[test]
    fn flood_fill_on_empty_board_reveals_everything() {
        let mut board = board(9, &[]);

        let outcome = board.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert!(board.iter_cells().all(|(_, cell)| cell.revealed));
        assert_eq!(board.revealed_count(), 81);
        assert!(board.is_won());
        assert!(!board.continue_playing());
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        let mut board = board(5, &[(0, 4), (4, 4)]);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(board.cell((1, 3)).unwrap().adjacent_mine_count, 1);
        assert!(board.cell((1, 3)).unwrap().revealed);
        assert!(!board.cell((0, 4)).unwrap().revealed);
        assert!(!board.cell((4, 4)).unwrap().revealed);
    }

    #[test]
    fn flood_fill_leaves_region_behind_a_wall() {
        // column of mines splits the board in two
        let mines: Vec<_> = (0..5).map(|row| (row, 2)).collect();
        let mut board = board(5, &mines);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);
        for row in 0..5 {
            assert!(board.cell((row, 0)).unwrap().revealed);
            assert!(board.cell((row, 1)).unwrap().revealed);
            assert!(!board.cell((row, 3)).unwrap().revealed);
            assert!(!board.cell((row, 4)).unwrap().revealed);
        }
        assert_eq!(board.revealed_count(), 10);
        assert_eq!(board.state(), GameState::Active);
    }

    #[test]
    fn revealing_a_mine_loses_and_shows_all_mines() {
        let mines = [(0, 0), (4, 4), (8, 8)];
        let mut board = board(9, &mines);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);

        assert!(board.is_over());
        assert!(!board.is_won());
        assert!(!board.continue_playing());
        assert_eq!(revealed_mines(&board), mines);
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn no_reveal_after_loss() {
        let mut board = board(3, &[(0, 0)]);
        board.reveal((0, 0)).unwrap();
        let lost = board.clone();

        assert_eq!(board.reveal((2, 2)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.flag((1, 1)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(board, lost);
    }

    #[test]
    fn revealing_every_safe_cell_wins() {
        // every safe cell touches the center mine, so no flood fill helps
        let mut board = board(3, &[(1, 1)]);
        let safe: Vec<_> = board
            .iter_cells()
            .filter(|(_, cell)| !cell.is_mine)
            .map(|(coords, _)| coords)
            .collect();
        let (last, rest) = safe.split_last().unwrap();

        for &coords in rest {
            assert_eq!(board.reveal(coords).unwrap(), RevealOutcome::Revealed);
            assert!(!board.is_won());
        }
        assert_eq!(board.reveal(*last).unwrap(), RevealOutcome::Won);
        assert!(board.is_won());
        assert!(board.check_win());
        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert!(!board.is_over());
    }

    #[test]
    fn out_of_bounds_is_reported_without_mutation() {
        let mut board = board(9, &[(3, 3)]);
        let before = board.clone();

        assert_eq!(board.reveal((-1, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.reveal((9, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.reveal((0, 9)), Err(GameError::OutOfBounds));
        assert_eq!(board.flag((0, -1)), Err(GameError::OutOfBounds));
        assert_eq!(board.cell((9, 9)), Err(GameError::OutOfBounds));
        assert_eq!(board, before);
    }

    #[test]
    fn flagging_does_not_block_reveal() {
        let mut board = board(3, &[(0, 0)]);

        assert_eq!(board.flag((2, 2)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.flags_remaining(), 0);
        assert!(board.cell((2, 2)).unwrap().flagged);

        assert_eq!(board.reveal((2, 2)).unwrap(), RevealOutcome::Won);
        let cell = board.cell((2, 2)).unwrap();
        assert!(cell.revealed);
        assert!(!cell.flagged);
        assert_eq!(board.flags_remaining(), 1);
    }

    #[test]
    fn flag_bookkeeping() {
        let mut board = board(3, &[(0, 0)]);

        assert_eq!(board.flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.flag((0, 0)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(board.flags_remaining(), 0);

        assert_eq!(board.flag((0, 1)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.flags_remaining(), -1);

        assert_eq!(board.unflag((0, 1)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.unflag((0, 1)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(board.toggle_flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.flags_remaining(), 1);
        assert!(!board.cell((0, 0)).unwrap().flagged);

        board.reveal((1, 1)).unwrap();
        assert_eq!(board.flag((1, 1)).unwrap(), MarkOutcome::NoChange);
        assert!(board.flag((1, 1)).is_ok_and(|outcome| !outcome.has_update()));
    }

    #[test]
    fn reset_clears_grid_and_restart_regenerates() {
        let mut board = Board::initialize_with_seed(Difficulty::Easy, 5);
        board.flag((0, 0)).unwrap();

        board.reset();
        assert_eq!(board.iter_cells().count(), 0);
        assert_eq!(board.dimension(), 9);
        assert_eq!(board.mine_count(), 10);
        assert_eq!(board.flags_remaining(), 9);
        assert!(!board.is_over() && !board.is_won());
        assert_eq!(board.reveal((0, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.render_text(), "");

        board.restart(5);
        assert_eq!(board, Board::initialize_with_seed(Difficulty::Easy, 5));
        assert_eq!(board.flags_remaining(), 10);
    }

    #[test]
    fn render_text_shows_revealed_state_only() {
        let mut board = board(2, &[(0, 0)]);
        assert_eq!(board.render_text(), "* *\n* *\n");

        board.flag((0, 0)).unwrap();
        board.reveal((1, 1)).unwrap();
        assert_eq!(board.render_text(), "* *\n* 1\n");

        board.reveal((0, 0)).unwrap();
        assert_eq!(board.render_text(), "x *\n* 1\n");
    }

    #[test]
    fn board_survives_json_round_trip() {
        let mut board = Board::initialize_with_seed(Difficulty::Easy, 8);
        board.reveal((0, 0)).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, board);
    }
}

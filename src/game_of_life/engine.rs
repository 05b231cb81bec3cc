//! The simulation engine: a state machine over (grid, generation)

use super::error::GridResult;
use super::{GameOfLifeRules, Grid};
use crate::config::BoardConfig;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Owns the board and its generation counter.
///
/// The grid only changes through [`toggle`](Self::toggle), [`advance`](Self::advance)
/// and [`reset`](Self::reset). Callers read it through a shared borrow or an
/// owned [`snapshot`](Self::snapshot).
#[derive(Debug, Clone)]
pub struct GridEngine {
    grid: Grid,
    generation: u64,
    alive_probability: f64,
    rng: StdRng,
}

impl GridEngine {
    /// Create an engine with a randomly seeded board at generation 0
    pub fn new(rows: usize, columns: usize, alive_probability: f64) -> GridResult<Self> {
        Self::with_rng(rows, columns, alive_probability, StdRng::from_entropy())
    }

    /// Like [`new`](Self::new) but reproducible: the same seed yields the same
    /// initial board and the same sequence of boards after each reset
    pub fn with_seed(
        rows: usize,
        columns: usize,
        alive_probability: f64,
        seed: u64,
    ) -> GridResult<Self> {
        Self::with_rng(rows, columns, alive_probability, StdRng::seed_from_u64(seed))
    }

    /// Build an engine from board settings
    pub fn from_config(board: &BoardConfig) -> GridResult<Self> {
        match board.seed {
            Some(seed) => Self::with_seed(board.rows, board.columns, board.alive_probability, seed),
            None => Self::new(board.rows, board.columns, board.alive_probability),
        }
    }

    /// Start from an existing board. `alive_probability` is used by later resets.
    pub fn from_grid(grid: Grid, alive_probability: f64) -> Self {
        Self {
            grid,
            generation: 0,
            alive_probability,
            rng: StdRng::from_entropy(),
        }
    }

    fn with_rng(
        rows: usize,
        columns: usize,
        alive_probability: f64,
        mut rng: StdRng,
    ) -> GridResult<Self> {
        let grid = Grid::random(rows, columns, alive_probability, &mut rng)?;
        debug!(
            "Seeded {}x{} board with {} living cells",
            rows,
            columns,
            grid.living_count()
        );
        Ok(Self {
            grid,
            generation: 0,
            alive_probability,
            rng,
        })
    }

    /// Discard the board for a freshly randomized one of the same shape and
    /// restart the generation count
    pub fn reset(&mut self) {
        let (rows, columns) = self.grid.dimensions();
        // Dimensions were validated when the current grid was built
        if let Ok(grid) = Grid::random(rows, columns, self.alive_probability, &mut self.rng) {
            self.grid = grid;
        }
        self.generation = 0;
        debug!("Board reset with {} living cells", self.grid.living_count());
    }

    /// Flip a single cell. Out of range coordinates leave the board untouched.
    pub fn toggle(&mut self, row: isize, col: isize) -> GridResult<()> {
        let alive = self.grid.toggle(row, col)?;
        trace!("Toggled ({}, {}) to {}", row, col, if alive { "alive" } else { "dead" });
        Ok(())
    }

    /// Replace the board with its next generation
    pub fn advance(&mut self) {
        self.grid = GameOfLifeRules::evolve(&self.grid);
        self.generation += 1;
        trace!(
            "Generation {}: {} living cells",
            self.generation,
            self.grid.living_count()
        );
    }

    pub fn cell_at(&self, row: isize, col: isize) -> GridResult<bool> {
        self.grid.cell_at(row, col)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `(rows, columns)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn alive_probability(&self) -> f64 {
        self.alive_probability
    }

    pub fn living_count(&self) -> usize {
        self.grid.living_count()
    }

    /// Borrow the current board
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// An independent copy of the current board
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::GridError;

    /// An all-dead board with the given cells switched on through `toggle`
    fn engine_with(rows: usize, columns: usize, alive: &[(isize, isize)]) -> GridEngine {
        let mut engine = GridEngine::with_seed(rows, columns, 0.0, 1).unwrap();
        for &(r, c) in alive {
            engine.toggle(r, c).unwrap();
        }
        engine
    }

    #[test]
    fn test_new_engine() {
        let engine = GridEngine::new(160, 90, 0.3).unwrap();
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.dimensions(), (160, 90));
        assert_eq!(engine.alive_probability(), 0.3);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            GridEngine::new(0, 90, 0.3),
            Err(GridError::InvalidDimensions { rows: 0, columns: 90 })
        ));
        assert!(GridEngine::with_seed(10, 0, 0.3, 5).is_err());
    }

    #[test]
    fn test_seeded_engines_match() {
        let mut a = GridEngine::with_seed(20, 30, 0.3, 99).unwrap();
        let mut b = GridEngine::with_seed(20, 30, 0.3, 99).unwrap();
        assert_eq!(a.grid(), b.grid());

        a.reset();
        b.reset();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut engine = GridEngine::with_seed(8, 8, 0.3, 11).unwrap();
        engine.advance();
        let before = engine.snapshot();
        let original = engine.cell_at(3, 4).unwrap();

        engine.toggle(3, 4).unwrap();
        assert_eq!(engine.cell_at(3, 4).unwrap(), !original);
        engine.toggle(3, 4).unwrap();

        assert_eq!(engine.cell_at(3, 4).unwrap(), original);
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_out_of_bounds_leaves_board_unchanged() {
        let mut engine = GridEngine::with_seed(4, 6, 0.5, 3).unwrap();
        let before = engine.snapshot();

        for &(r, c) in &[(-1, 0), (4, 0), (0, -1), (0, 6)] {
            assert!(matches!(engine.toggle(r, c), Err(GridError::OutOfBounds { .. })));
            assert!(matches!(engine.cell_at(r, c), Err(GridError::OutOfBounds { .. })));
        }

        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_advance_increments_generation() {
        let mut engine = GridEngine::with_seed(10, 10, 0.3, 8).unwrap();
        for expected in 1..=5 {
            engine.advance();
            assert_eq!(engine.generation(), expected);
        }

        let mut empty = engine_with(3, 3, &[]);
        empty.advance();
        assert_eq!(empty.generation(), 1);
        assert!(empty.grid().is_empty());
    }

    #[test]
    fn test_still_life_block() {
        let mut engine = engine_with(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        let before = engine.snapshot();
        engine.advance();
        assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut engine = engine_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let horizontal = engine.snapshot();

        engine.advance();
        assert_eq!(engine.grid().living_cells(), vec![(1, 2), (2, 2), (3, 2)]);

        engine.advance();
        assert_eq!(engine.grid(), &horizontal);
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn test_birth() {
        let mut engine = engine_with(5, 5, &[(1, 2), (2, 1), (3, 3)]);
        assert!(!engine.cell_at(2, 2).unwrap());
        engine.advance();
        assert!(engine.cell_at(2, 2).unwrap());
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut engine = engine_with(5, 5, &[(2, 2)]);
        engine.advance();
        assert!(!engine.cell_at(2, 2).unwrap());
        assert_eq!(engine.living_count(), 0);
    }

    #[test]
    fn test_corner_rule() {
        // The corner has exactly 3 possible neighbors; filling them gives a birth
        let mut engine = engine_with(4, 4, &[(0, 1), (1, 0), (1, 1)]);
        engine.advance();
        assert!(engine.cell_at(0, 0).unwrap());
    }

    #[test]
    fn test_reset() {
        let mut engine = GridEngine::with_seed(12, 7, 0.3, 21).unwrap();
        engine.advance();
        engine.advance();
        engine.reset();

        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.dimensions(), (12, 7));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let engine = engine_with(3, 3, &[(1, 1)]);
        let mut copy = engine.snapshot();
        copy.toggle(1, 1).unwrap();
        copy.toggle(0, 0).unwrap();

        assert!(engine.cell_at(1, 1).unwrap());
        assert!(!engine.cell_at(0, 0).unwrap());
    }

    #[test]
    fn test_from_grid() {
        let grid = Grid::from_cells(vec![vec![false, true], vec![true, true]]).unwrap();
        let mut engine = GridEngine::from_grid(grid.clone(), 0.3);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.grid(), &grid);

        engine.advance();
        assert_eq!(engine.living_count(), 4);
    }

    #[test]
    fn test_from_config() {
        let board = BoardConfig {
            rows: 9,
            columns: 4,
            alive_probability: 1.0,
            seed: Some(5),
        };
        let engine = GridEngine::from_config(&board).unwrap();
        assert_eq!(engine.dimensions(), (9, 4));
        assert_eq!(engine.living_count(), 36);
    }
}

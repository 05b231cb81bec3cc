//! Conway's transition rule and whole-grid evolution

use super::Grid;
use rayon::prelude::*;

/// The rule never tells four neighbors apart from more, so counting stops here.
pub const NEIGHBOR_COUNT_CAP: u8 = 4;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Compute the next generation of `current`.
    ///
    /// The result is written into a fresh buffer while `current` is only read,
    /// so no cell ever sees a neighbor that has already been updated. Rows are
    /// independent and are computed in parallel.
    pub fn evolve(current: &Grid) -> Grid {
        let columns = current.columns();
        let mut next = vec![false; current.cells().len()];

        next.par_chunks_mut(columns)
            .enumerate()
            .for_each(|(row, out)| {
                for (col, cell) in out.iter_mut().enumerate() {
                    let neighbors = current.count_neighbors_capped(row, col, NEIGHBOR_COUNT_CAP);
                    *cell = Self::should_be_alive(current.get(row, col), neighbors);
                }
            });

        current.with_cells(next)
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = Self::evolve(&grid);
        }
        grid
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        let allowed = if current_state {
            Self::survival_neighbor_counts()
        } else {
            Self::birth_neighbor_counts()
        };
        allowed.contains(&neighbor_count)
    }

    /// Neighbor counts that bring a dead cell to life
    pub fn birth_neighbor_counts() -> &'static [u8] {
        &[3]
    }

    /// Neighbor counts that keep a living cell alive
    pub fn survival_neighbor_counts() -> &'static [u8] {
        &[2, 3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(rows: usize, columns: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, columns).unwrap();
        for &(r, c) in alive {
            grid.set(r, c, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_still_life_block() {
        let grid = grid_with(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        let evolved = GameOfLifeRules::evolve(&grid);

        assert_eq!(grid, evolved);
    }

    #[test]
    fn test_block_in_corner() {
        // Corner cells of the block only have 3 in-bounds neighbors
        let grid = grid_with(4, 4, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(GameOfLifeRules::evolve(&grid), grid);
    }

    #[test]
    fn test_oscillator_blinker() {
        let horizontal = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);

        let evolved = GameOfLifeRules::evolve(&horizontal);
        assert_eq!(evolved, vertical);

        let evolved_twice = GameOfLifeRules::evolve(&evolved);
        assert_eq!(evolved_twice, horizontal);
        assert_eq!(GameOfLifeRules::evolve_generations(horizontal.clone(), 4), horizontal);
    }

    #[test]
    fn test_birth_and_isolated_death() {
        let grid = grid_with(5, 5, &[(1, 1), (1, 3), (3, 2)]);
        let evolved = GameOfLifeRules::evolve(&grid);

        assert!(evolved.get(2, 2));
        assert!(!evolved.get(1, 1));

        let lonely = grid_with(3, 3, &[(1, 1)]);
        assert!(GameOfLifeRules::evolve(&lonely).is_empty());
    }

    #[test]
    fn test_overcrowding() {
        // Centre of a plus shape has 4 neighbors and dies
        let grid = grid_with(5, 5, &[(2, 2), (1, 2), (3, 2), (2, 1), (2, 3)]);
        let evolved = GameOfLifeRules::evolve(&grid);
        assert!(!evolved.get(2, 2));
    }

    #[test]
    fn test_no_wraparound() {
        // With wraparound (2, 2) would see the top row and be born
        let grid = grid_with(3, 5, &[(0, 1), (0, 2), (0, 3)]);
        let evolved = GameOfLifeRules::evolve(&grid);
        assert_eq!(evolved.living_cells(), vec![(0, 2), (1, 2)]);
        assert!(!evolved.get(2, 2));
    }

    #[test]
    fn test_rule_logic() {
        assert!(GameOfLifeRules::should_be_alive(true, 2));
        assert!(GameOfLifeRules::should_be_alive(true, 3));
        assert!(GameOfLifeRules::should_be_alive(false, 3));
        assert!(!GameOfLifeRules::should_be_alive(true, 1));
        assert!(!GameOfLifeRules::should_be_alive(true, 4));
        assert!(!GameOfLifeRules::should_be_alive(false, 2));
        assert!(!GameOfLifeRules::should_be_alive(false, 4));

        assert_eq!(GameOfLifeRules::birth_neighbor_counts(), &[3u8]);
        assert_eq!(GameOfLifeRules::survival_neighbor_counts(), &[2u8, 3]);
    }

    #[test]
    fn test_capped_count_matches_full_count_for_rule() {
        let grid = grid_with(3, 3, &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]);
        let full = grid.count_neighbors(1, 1);
        let capped = grid.count_neighbors_capped(1, 1, NEIGHBOR_COUNT_CAP);
        assert_eq!(full, 7);
        assert_eq!(capped, 4);
        assert_eq!(
            GameOfLifeRules::should_be_alive(false, full),
            GameOfLifeRules::should_be_alive(false, capped)
        );
    }
}

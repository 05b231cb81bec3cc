//! Grid representation and utilities for Game of Life

use super::error::{GridError, GridResult};
use anyhow::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offsets of the eight cells surrounding a cell, clockwise from the upper left.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// A fixed-size, row-major matrix of cells. `true` is alive.
///
/// The shape is set at construction and never changes: `cells.len()` is always
/// `rows * columns` and both dimensions are positive. Cells beyond the edge are
/// treated as dead, there is no wraparound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = String;

    fn try_from(raw: RawGrid) -> std::result::Result<Self, Self::Error> {
        check_dimensions(raw.rows, raw.columns).map_err(|e| e.to_string())?;
        if raw.cells.len() != raw.rows * raw.columns {
            return Err(format!(
                "expected {} cells for a {}x{} grid, found {}",
                raw.rows * raw.columns,
                raw.rows,
                raw.columns,
                raw.cells.len()
            ));
        }
        Ok(Self {
            rows: raw.rows,
            columns: raw.columns,
            cells: raw.cells,
        })
    }
}

fn check_dimensions(rows: usize, columns: usize) -> GridResult<()> {
    if rows == 0 || columns == 0 {
        return Err(GridError::InvalidDimensions { rows, columns });
    }
    Ok(())
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(rows: usize, columns: usize) -> GridResult<Self> {
        check_dimensions(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        })
    }

    /// Create a grid where each cell is independently alive with probability
    /// `alive_probability`: a uniform draw in `[0, 1)` below the probability
    /// makes the cell alive.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        alive_probability: f64,
        rng: &mut R,
    ) -> GridResult<Self> {
        check_dimensions(rows, columns)?;
        let cells = (0..rows * columns)
            .map(|_| rng.gen::<f64>() < alive_probability)
            .collect();
        Ok(Self { rows, columns, cells })
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        let rows = cells.len();
        let columns = cells.first().map_or(0, Vec::len);
        check_dimensions(rows, columns)?;

        for (i, row) in cells.iter().enumerate() {
            if row.len() != columns {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), columns);
            }
        }

        Ok(Self {
            rows,
            columns,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }

    /// Resolve signed coordinates to a cell index, rejecting anything outside the grid
    fn checked_index(&self, row: isize, col: isize) -> GridResult<usize> {
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) if r < self.rows && c < self.columns => Ok(self.index(r, c)),
            _ => Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                columns: self.columns,
            }),
        }
    }

    /// Get cell value at coordinates; out of bounds cells read as dead
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns && self.cells[self.index(row, col)]
    }

    /// Get cell value, failing on coordinates outside the grid
    pub fn cell_at(&self, row: isize, col: isize) -> GridResult<bool> {
        self.checked_index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> GridResult<()> {
        let idx = self.checked_index(row as isize, col as isize)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: isize, col: isize) -> GridResult<bool> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Positions of the neighbors of `(row, col)` that lie inside the grid.
    /// Corners have 3, other edge cells 5, interior cells 8.
    pub fn neighbor_positions(
        &self,
        row: usize,
        col: usize,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < self.rows && c < self.columns).then_some((r, c))
        })
    }

    /// Count living neighbors, stopping as soon as `cap` have been found
    pub fn count_neighbors_capped(&self, row: usize, col: usize, cap: u8) -> u8 {
        self.neighbor_positions(row, col)
            .filter(|&(r, c)| self.cells[self.index(r, c)])
            .take(cap as usize)
            .count() as u8
    }

    /// Count living neighbors for a cell
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        self.count_neighbors_capped(row, col, u8::MAX)
    }

    /// Iterate over the rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.columns)
    }

    /// Copy the cells out as a 2D array
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.iter_rows().map(<[bool]>::to_vec).collect()
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| (idx / self.columns, idx % self.columns))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Fraction of cells alive, in `[0, 1]`
    pub fn density(&self) -> f64 {
        self.living_count() as f64 / self.cells.len() as f64
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    pub(crate) fn with_cells(&self, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), self.cells.len());
        Self {
            rows: self.rows,
            columns: self.columns,
            cells,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for &cell in row {
                let symbol = if cell { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

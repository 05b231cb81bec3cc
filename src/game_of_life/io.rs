//! Loading and saving a single board
//!
//! Two formats are understood, picked by file extension: `.json` holds the
//! serialized [`Grid`], anything else is plain text with one line per row,
//! `1` for alive and `0` for dead.

use super::Grid;
use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::Path;

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Load a grid from a text or JSON file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grid file: {}", path.display()))?;

    if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON grid: {}", path.display()))
    } else {
        parse_grid_from_string(&content)
            .with_context(|| format!("Failed to parse grid from file: {}", path.display()))
    }
}

/// Parse a grid from its text representation. Blank lines are ignored.
pub fn parse_grid_from_string(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid file is empty or contains no valid rows");
    }

    let width = lines[0].chars().count();
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(anyhow::anyhow!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                )),
            })
            .collect::<Result<Vec<bool>>>()?;

        if row.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                row.len(),
                width
            );
        }
        cells.push(row);
    }

    Grid::from_cells(cells)
}

/// Convert a grid to its text representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut out = grid
        .iter_rows()
        .map(|row| row.iter().map(|&cell| if cell { '1' } else { '0' }).collect::<String>())
        .join("\n");
    out.push('\n');
    out
}

/// Save a grid to a text or JSON file, creating parent directories as needed
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = if is_json(path) {
        serde_json::to_string_pretty(grid).context("Failed to serialize grid")?
    } else {
        grid_to_string(grid)
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.display()))?;

    Ok(())
}

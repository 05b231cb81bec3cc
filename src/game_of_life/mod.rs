//! Game of Life core functionality

pub mod engine;
pub mod error;
pub mod grid;
pub mod io;
pub mod rules;

pub use engine::GridEngine;
pub use error::{GridError, GridResult};
pub use grid::Grid;
pub use io::{load_grid_from_file, parse_grid_from_string, save_grid_to_file};
pub use rules::GameOfLifeRules;

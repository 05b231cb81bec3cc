//! Conway's Game of Life engine
//!
//! A fixed-size board advanced one generation at a time under Conway's rule,
//! with no wraparound at the edges. [`GridEngine`] owns the board and its
//! generation counter; [`SimulationDriver`] runs an engine on a timer for
//! front ends that want a live simulation.

pub mod config;
pub mod driver;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use driver::{SimulationDriver, Speed};
pub use game_of_life::{Grid, GridEngine, GridError};

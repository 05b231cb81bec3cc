//! Periodic driver that runs the engine in the background
//!
//! The engine itself never schedules anything; this module supplies the
//! timer, the running flag and the speed setting that a front end needs.

pub mod error;
pub mod simulation;
pub mod speed;
pub mod ticker;

pub use error::DriverError;
pub use simulation::SimulationDriver;
pub use speed::Speed;
pub use ticker::Ticker;

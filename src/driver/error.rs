use crate::game_of_life::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("speed {0}ms is not in 50..=1000ms with a 50ms step")]
    InvalidSpeed(u64),

    #[error("cannot step while the simulation is running")]
    Running,

    #[error("engine state is unavailable after a panic during a tick")]
    EnginePoisoned,

    #[error(transparent)]
    Grid(#[from] GridError),
}

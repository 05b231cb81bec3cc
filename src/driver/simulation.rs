//! Start/stop/speed control around a shared engine

use super::{DriverError, Speed, Ticker};
use crate::game_of_life::{Grid, GridEngine};
use log::{debug, error, info};
use std::sync::{Arc, Mutex, MutexGuard};

/// Runs a [`GridEngine`] periodically.
///
/// The driver owns the running flag and the speed. At most one [`Ticker`] is
/// alive at a time: changing the speed while running cancels the old ticker
/// before starting the new one, so ticks are never doubled. Cell toggles go
/// through the same lock as the ticks and are allowed in either state.
pub struct SimulationDriver {
    engine: Arc<Mutex<GridEngine>>,
    speed: Speed,
    generation_limit: Option<u64>,
    ticker: Option<Ticker>,
}

impl SimulationDriver {
    pub fn new(engine: GridEngine, speed: Speed) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            speed,
            generation_limit: None,
            ticker: None,
        }
    }

    /// Stop ticking on its own once the engine reaches `limit` generations
    pub fn with_generation_limit(mut self, limit: u64) -> Self {
        self.generation_limit = Some(limit);
        self
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|ticker| !ticker.is_finished())
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        // A ticker that hit the generation limit has already exited; reap it
        if let Some(finished) = self.ticker.take() {
            finished.cancel();
        }

        let engine = Arc::clone(&self.engine);
        let limit = self.generation_limit;
        self.ticker = Some(Ticker::spawn(self.speed.interval(), move || {
            match engine.lock() {
                Ok(mut engine) => {
                    engine.advance();
                    limit.map_or(true, |limit| engine.generation() < limit)
                }
                Err(_) => {
                    error!("Engine lock poisoned, stopping simulation");
                    false
                }
            }
        }));
        info!("Simulation started at {}", self.speed);
    }

    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
            info!("Simulation stopped");
        }
    }

    /// Change the tick interval, restarting the ticker if it is running
    pub fn set_speed(&mut self, speed: Speed) {
        if speed == self.speed {
            return;
        }
        debug!("Speed changed from {} to {}", self.speed, speed);
        self.speed = speed;
        if self.is_running() {
            self.stop();
            self.start();
        }
    }

    /// Advance exactly one generation by hand. Only allowed while stopped.
    pub fn step(&self) -> Result<u64, DriverError> {
        if self.is_running() {
            return Err(DriverError::Running);
        }
        let mut engine = self.lock()?;
        engine.advance();
        Ok(engine.generation())
    }

    pub fn toggle(&self, row: isize, col: isize) -> Result<(), DriverError> {
        self.lock()?.toggle(row, col)?;
        Ok(())
    }

    /// Reseed the board. The running state is left as it is.
    pub fn reset(&self) -> Result<(), DriverError> {
        self.lock()?.reset();
        Ok(())
    }

    pub fn generation(&self) -> Result<u64, DriverError> {
        Ok(self.lock()?.generation())
    }

    pub fn snapshot(&self) -> Result<Grid, DriverError> {
        Ok(self.lock()?.snapshot())
    }

    /// Read the engine under the lock, e.g. to render a frame
    pub fn with_engine<R>(&self, f: impl FnOnce(&GridEngine) -> R) -> Result<R, DriverError> {
        Ok(f(&*self.lock()?))
    }

    fn lock(&self) -> Result<MutexGuard<'_, GridEngine>, DriverError> {
        self.engine.lock().map_err(|_| DriverError::EnginePoisoned)
    }
}

impl Drop for SimulationDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

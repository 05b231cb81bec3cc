//! Configuration settings for the simulation

use crate::driver::Speed;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub driver: DriverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
    pub alive_probability: f64,
    /// Fixed RNG seed for reproducible boards
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Tick interval in milliseconds
    pub speed_ms: u64,
    /// Generations to run before the driver stops
    pub generations: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub style: OutputStyle,
    pub clear_screen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    Compact,
    Coordinates,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                rows: 160,
                columns: 90,
                alive_probability: 0.3,
                seed: None,
            },
            driver: DriverConfig {
                speed_ms: Speed::DEFAULT_MS,
                generations: 100,
            },
            output: OutputConfig {
                style: OutputStyle::Compact,
                clear_screen: true,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.rows == 0 || self.board.columns == 0 {
            anyhow::bail!(
                "Board dimensions must be positive, got {}x{}",
                self.board.rows,
                self.board.columns
            );
        }

        if !(0.0..=1.0).contains(&self.board.alive_probability) {
            anyhow::bail!(
                "Alive probability must be between 0 and 1, got {}",
                self.board.alive_probability
            );
        }

        Speed::new(self.driver.speed_ms).context("Invalid driver speed")?;

        if self.driver.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        Ok(())
    }

    /// The configured tick interval
    pub fn speed(&self) -> Result<Speed> {
        Ok(Speed::new(self.driver.speed_ms)?)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.board.rows = rows;
        }
        if let Some(columns) = cli_overrides.columns {
            self.board.columns = columns;
        }
        if let Some(probability) = cli_overrides.alive_probability {
            self.board.alive_probability = probability;
        }
        if cli_overrides.seed.is_some() {
            self.board.seed = cli_overrides.seed;
        }
        if let Some(speed_ms) = cli_overrides.speed_ms {
            self.driver.speed_ms = speed_ms;
        }
        if let Some(generations) = cli_overrides.generations {
            self.driver.generations = generations;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub alive_probability: Option<f64>,
    pub seed: Option<u64>,
    pub speed_ms: Option<u64>,
    pub generations: Option<u64>,
}

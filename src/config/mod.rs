//! Configuration management for the simulation

pub mod settings;

pub use settings::{BoardConfig, CliOverrides, DriverConfig, OutputConfig, OutputStyle, Settings};

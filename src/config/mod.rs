//! Configuration management for the terminal runner

pub mod settings;

pub use settings::{
    CliOverrides, DisplayFormat, DisplaySettings, RunSettings, Settings, SimulationSettings,
};

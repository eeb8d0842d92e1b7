//! Configuration settings for the terminal runner

use crate::game_of_life::{parse_grid, Grid};
use crate::simulation::{SimulationConfig, TickRate};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationSettings,
    pub display: DisplaySettings,
    pub run: RunSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub width: usize,
    pub height: usize,
    pub ticks_per_second: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub format: DisplayFormat,
    pub clear_screen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DisplayFormat {
    Compact,
    Coords,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSettings {
    /// Generations to run before stopping
    pub generations: u64,
    /// Rows of `0`/`1` seeded at the center of the board
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_pattern: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = SimulationConfig::default();
        Self {
            simulation: SimulationSettings {
                width: defaults.width(),
                height: defaults.height(),
                ticks_per_second: defaults.tick_rate().into(),
            },
            display: DisplaySettings {
                format: DisplayFormat::Compact,
                clear_screen: true,
            },
            run: RunSettings {
                generations: 100,
                initial_pattern: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
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
        self.simulation_config()?;
        if self.run.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }
        self.initial_grid()?;
        Ok(())
    }

    /// Core configuration for the simulation loop
    pub fn simulation_config(&self) -> Result<SimulationConfig> {
        let tick_rate = TickRate::new(self.simulation.ticks_per_second)
            .context("Invalid simulation.ticks_per_second")?;
        SimulationConfig::new(self.simulation.width, self.simulation.height, tick_rate)
            .context("Invalid simulation dimensions")
    }

    /// Starting board: empty, or with the initial pattern stamped at its center
    pub fn initial_grid(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.simulation.width, self.simulation.height)
            .context("Invalid simulation dimensions")?;

        if let Some(ref text) = self.run.initial_pattern {
            let pattern = parse_grid(text).context("Invalid run.initial_pattern")?;
            if pattern.width() > grid.width() || pattern.height() > grid.height() {
                anyhow::bail!(
                    "Initial pattern {}x{} does not fit on a {}x{} board",
                    pattern.width(),
                    pattern.height(),
                    grid.width(),
                    grid.height()
                );
            }
            let top = (grid.height() - pattern.height()) / 2;
            let left = (grid.width() - pattern.width()) / 2;
            grid.stamp(&pattern, top, left)?;
        }

        Ok(grid)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.simulation.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.simulation.height = height;
        }
        if let Some(ticks_per_second) = cli_overrides.ticks_per_second {
            self.simulation.ticks_per_second = ticks_per_second;
        }
        if let Some(generations) = cli_overrides.generations {
            self.run.generations = generations;
        }
        if let Some(ref pattern) = cli_overrides.pattern {
            self.run.initial_pattern = Some(pattern.clone());
        }
        if let Some(format) = cli_overrides.format {
            self.display.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub ticks_per_second: Option<i64>,
    pub generations: Option<u64>,
    pub pattern: Option<String>,
    pub format: Option<DisplayFormat>,
}

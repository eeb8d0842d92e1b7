//! Validated configuration values for the simulation loop

use crate::error::{LifeError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TICKS_PER_SECOND: u64 = 20;
pub const DEFAULT_WIDTH: usize = 60;
pub const DEFAULT_HEIGHT: usize = 60;

/// Generations per second, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TickRate(u64);

impl TickRate {
    pub fn new(ticks_per_second: i64) -> Result<Self> {
        match u64::try_from(ticks_per_second) {
            Ok(tps) if tps > 0 => Ok(Self(tps)),
            _ => Err(LifeError::InvalidRate(ticks_per_second)),
        }
    }

    pub fn ticks_per_second(self) -> u64 {
        self.0
    }

    /// Wait between generations: `1000 / tps` milliseconds, floored
    pub fn interval(self) -> Duration {
        Duration::from_millis(1000 / self.0)
    }
}

impl Default for TickRate {
    fn default() -> Self {
        Self(DEFAULT_TICKS_PER_SECOND)
    }
}

impl TryFrom<i64> for TickRate {
    type Error = LifeError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TickRate> for i64 {
    fn from(rate: TickRate) -> Self {
        // Built from a positive i64, so this never saturates
        i64::try_from(rate.0).unwrap_or(i64::MAX)
    }
}

/// Board dimensions and tick rate the loop is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    width: usize,
    height: usize,
    tick_rate: TickRate,
}

impl SimulationConfig {
    pub fn new(width: usize, height: usize, tick_rate: TickRate) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            tick_rate,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tick_rate(&self) -> TickRate {
        self.tick_rate
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate: TickRate::default(),
        }
    }
}

/// A reconfiguration request. Unset fields keep their current value.
///
/// Changing either dimension replaces the board with a fresh dead one;
/// changing only the tick rate keeps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconfigure {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub ticks_per_second: Option<i64>,
}

impl Reconfigure {
    pub fn dimensions(width: usize, height: usize) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ticks_per_second: None,
        }
    }

    pub fn tick_rate(ticks_per_second: i64) -> Self {
        Self {
            ticks_per_second: Some(ticks_per_second),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.ticks_per_second.is_none()
    }

    pub fn changes_dimensions(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}

//! Error types for the simulation core

/// Failures reported by the grid, the transition engine and the simulation loop.
///
/// Every variant is returned before any state is touched, so a caller can
/// retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifeError {
    #[error("Invalid grid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Coordinates ({row}, {col}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    #[error("Invalid tick rate {0}: ticks per second must be positive")]
    InvalidRate(i64),

    #[error("Simulation is running; stop it before reconfiguring")]
    SimulationRunning,

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Simulation loop has shut down")]
    Closed,
}

pub type Result<T> = std::result::Result<T, LifeError>;

//! Display/input adapters: the observers the simulation loop notifies

pub mod terminal;

use crate::game_of_life::Grid;

pub use terminal::{GridSnapshot, TerminalAdapter};

/// Receives state notifications from the simulation loop.
///
/// Implementations own whatever presentation surface they draw on. They
/// never get mutable access to the simulation's grids; edits go back through
/// `Simulation::request_edit` or a `SimulationHandle`.
pub trait DisplayAdapter {
    /// A generation was committed. Also fired for the initial pre-run board
    /// with `generation == 0`.
    fn on_generation(&mut self, generation: u64, grid: &Grid);

    /// The simulation was reconfigured; rebuild the presentation at the
    /// given dimensions.
    fn on_reset(&mut self, width: usize, height: usize);
}

/// One notification seen by a [`RecordingAdapter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterEvent {
    Generation { generation: u64, grid: Grid },
    Reset { width: usize, height: usize },
}

/// Keeps every notification in order
#[derive(Debug, Default, Clone)]
pub struct RecordingAdapter {
    pub events: Vec<AdapterEvent>,
}

impl RecordingAdapter {
    /// Grids of all committed generations, oldest first
    pub fn generations(&self) -> Vec<(u64, &Grid)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                AdapterEvent::Generation { generation, grid } => Some((*generation, grid)),
                AdapterEvent::Reset { .. } => None,
            })
            .collect()
    }

    /// The most recently rendered grid
    pub fn last_grid(&self) -> Option<&Grid> {
        self.generations().last().map(|(_, grid)| *grid)
    }

    pub fn resets(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                AdapterEvent::Reset { width, height } => Some((*width, *height)),
                AdapterEvent::Generation { .. } => None,
            })
            .collect()
    }
}

impl DisplayAdapter for RecordingAdapter {
    fn on_generation(&mut self, generation: u64, grid: &Grid) {
        self.events.push(AdapterEvent::Generation {
            generation,
            grid: grid.clone(),
        });
    }

    fn on_reset(&mut self, width: usize, height: usize) {
        self.events.push(AdapterEvent::Reset { width, height });
    }
}

impl<A: DisplayAdapter + ?Sized> DisplayAdapter for Box<A> {
    fn on_generation(&mut self, generation: u64, grid: &Grid) {
        (**self).on_generation(generation, grid);
    }

    fn on_reset(&mut self, width: usize, height: usize) {
        (**self).on_reset(width, height);
    }
}

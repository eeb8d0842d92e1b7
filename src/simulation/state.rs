//! The simulation state machine: current board, pending next board, run state

use super::config::{Reconfigure, SimulationConfig, TickRate};
use crate::adapter::DisplayAdapter;
use crate::error::{LifeError, Result};
use crate::game_of_life::{CellAddress, CellState, GameOfLifeRules, Grid};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Owns the boards and drives generations for one adapter.
///
/// A tick is split in two: [`begin_tick`](Self::begin_tick) computes the
/// next generation into the pending board, [`commit_tick`](Self::commit_tick)
/// makes it current. Between the two the caller waits the tick interval, and
/// edits made in that window go to the pending board.
pub struct Simulation<A> {
    current: Grid,
    pending: Option<Grid>,
    /// Cells edited while the pending board is waiting, as last shown
    tick_edits: HashMap<CellAddress, CellState>,
    run_state: RunState,
    tick_rate: TickRate,
    generation: u64,
    adapter: A,
}

impl<A: DisplayAdapter> Simulation<A> {
    /// Create a stopped simulation on an empty board and show it
    pub fn new(config: SimulationConfig, adapter: A) -> Result<Self> {
        let grid = Grid::new(config.width(), config.height())?;
        Ok(Self::with_grid(grid, config.tick_rate(), adapter))
    }

    /// Create a stopped simulation starting from `grid` and show it
    pub fn with_grid(grid: Grid, tick_rate: TickRate, mut adapter: A) -> Self {
        adapter.on_generation(0, &grid);
        Self {
            current: grid,
            pending: None,
            tick_edits: HashMap::new(),
            run_state: RunState::Stopped,
            tick_rate,
            generation: 0,
            adapter,
        }
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// The generation computed but not yet committed, if a tick is in flight
    pub fn pending(&self) -> Option<&Grid> {
        self.pending.as_ref()
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Number of generations committed since the board was last replaced
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tick_rate(&self) -> TickRate {
        self.tick_rate
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_rate.interval()
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    /// Flip between running and stopped. Stopping does not discard a tick
    /// already in flight; its generation still commits.
    pub fn toggle(&mut self) -> RunState {
        self.run_state = match self.run_state {
            RunState::Stopped => RunState::Running,
            RunState::Running => RunState::Stopped,
        };
        debug!(
            state = ?self.run_state,
            generation = self.generation,
            tick_in_flight = self.pending.is_some(),
            "Simulation toggled"
        );
        self.run_state
    }

    /// Toggle one cell as displayed and return its new state.
    ///
    /// With no tick in flight the current board is edited. While a tick is in
    /// flight the displayed state (the current board plus edits made during
    /// this wait) is flipped and the result is written into the pending
    /// board, so it survives the commit. A live cell about to die is killed,
    /// not revived.
    pub fn request_edit(&mut self, row: usize, col: usize) -> Result<CellState> {
        let Some(pending) = self.pending.as_mut() else {
            let state = self.current.toggle(row, col)?;
            trace!(row, col, ?state, board = "current", "Cell edited");
            return Ok(state);
        };

        let address = CellAddress::new(row, col);
        let shown = match self.tick_edits.get(&address) {
            Some(&state) => state,
            None => self.current.get(row, col)?,
        };
        let state = shown.toggled();
        pending.set(row, col, state)?;
        self.tick_edits.insert(address, state);
        trace!(row, col, ?state, board = "pending", "Cell edited");
        Ok(state)
    }

    /// Change dimensions and/or tick rate. Only allowed while stopped with no
    /// tick in flight; the request is validated in full before anything
    /// changes.
    pub fn reconfigure(&mut self, request: Reconfigure) -> Result<()> {
        if self.is_running() || self.pending.is_some() {
            debug!(?request, "Reconfigure rejected while running");
            return Err(LifeError::SimulationRunning);
        }
        if request.is_empty() {
            return Ok(());
        }

        let tick_rate = match request.ticks_per_second {
            Some(tps) => TickRate::new(tps)?,
            None => self.tick_rate,
        };
        let fresh = if request.changes_dimensions() {
            let width = request.width.unwrap_or(self.current.width());
            let height = request.height.unwrap_or(self.current.height());
            Some(Grid::new(width, height)?)
        } else {
            None
        };

        self.tick_rate = tick_rate;
        let replaced = fresh.is_some();
        if let Some(grid) = fresh {
            self.current = grid;
            self.generation = 0;
        }

        let (width, height) = self.current.dimensions();
        self.adapter.on_reset(width, height);
        if replaced {
            self.adapter.on_generation(0, &self.current);
        }

        debug!(
            width,
            height,
            ticks_per_second = tick_rate.ticks_per_second(),
            "Simulation reconfigured"
        );
        Ok(())
    }

    /// Compute the next generation into the pending board. Returns `false`
    /// when stopped or when a tick is already in flight.
    pub fn begin_tick(&mut self) -> bool {
        if !self.is_running() || self.pending.is_some() {
            return false;
        }
        self.pending = Some(GameOfLifeRules::evolve(&self.current));
        true
    }

    /// Make the pending board current and notify the adapter. Returns `false`
    /// when no tick was in flight.
    pub fn commit_tick(&mut self) -> bool {
        let Some(next) = self.pending.take() else {
            return false;
        };
        self.current = next;
        self.tick_edits.clear();
        self.generation += 1;
        trace!(
            generation = self.generation,
            living = self.current.living_count(),
            "Generation committed"
        );
        self.adapter.on_generation(self.generation, &self.current);
        true
    }

    /// Run one full tick without waiting
    pub fn step(&mut self) -> bool {
        self.begin_tick() && self.commit_tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AdapterEvent, RecordingAdapter};
    use crate::game_of_life::parse_grid;

    fn blinker() -> Simulation<RecordingAdapter> {
        let grid = parse_grid("00000\n00000\n01110\n00000\n00000").unwrap();
        Simulation::with_grid(grid, TickRate::default(), RecordingAdapter::default())
    }

    #[test]
    fn test_new_simulation_is_stopped_and_shown() {
        let sim =
            Simulation::new(SimulationConfig::default(), RecordingAdapter::default()).unwrap();
        assert_eq!(sim.run_state(), RunState::Stopped);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.tick_interval(), Duration::from_millis(50));
        assert_eq!(sim.current().dimensions(), (60, 60));

        let shown = sim.adapter().generations();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, 0);
    }

    #[test]
    fn test_toggle() {
        let mut sim = blinker();
        assert_eq!(sim.toggle(), RunState::Running);
        assert!(sim.is_running());
        assert_eq!(sim.toggle(), RunState::Stopped);
    }

    #[test]
    fn test_no_tick_while_stopped() {
        let mut sim = blinker();
        assert!(!sim.begin_tick());
        assert!(!sim.commit_tick());
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_tick_commits_next_generation() {
        let mut sim = blinker();
        let start = sim.current().clone();
        sim.toggle();

        assert!(sim.begin_tick());
        assert_eq!(sim.current(), &start);
        assert!(!sim.begin_tick());

        assert!(sim.commit_tick());
        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.current(), &GameOfLifeRules::evolve(&start));
        assert!(sim.pending().is_none());

        assert!(sim.step());
        assert_eq!(sim.current(), &start);
        assert_eq!(sim.adapter().generations().len(), 3);
    }

    #[test]
    fn test_edit_while_stopped_changes_current() {
        let mut sim = blinker();
        assert_eq!(sim.request_edit(0, 0), Ok(CellState::Alive));
        assert!(sim.current().is_alive(0, 0));
        assert_eq!(sim.request_edit(0, 0), Ok(CellState::Dead));
        assert!(!sim.current().is_alive(0, 0));
    }

    #[test]
    fn test_edit_during_tick_goes_to_pending() {
        let mut sim = blinker();
        let start = sim.current().clone();
        sim.toggle();
        sim.begin_tick();

        assert_eq!(sim.request_edit(0, 0), Ok(CellState::Alive));
        assert_eq!(sim.current(), &start);
        assert!(sim.pending().is_some_and(|next| next.is_alive(0, 0)));

        sim.commit_tick();
        let mut expected = GameOfLifeRules::evolve(&start);
        expected.set(0, 0, CellState::Alive).unwrap();
        assert_eq!(sim.current(), &expected);

        // The edit is applied exactly once and feeds the following generation
        sim.step();
        assert_eq!(sim.current(), &GameOfLifeRules::evolve(&expected));
    }

    #[test]
    fn test_edit_during_tick_flips_displayed_cell() {
        let mut sim = blinker();
        sim.toggle();
        sim.begin_tick();

        // (2, 1) is shown alive and dies this generation; (1, 2) is shown
        // dead and is born this generation
        assert_eq!(sim.request_edit(2, 1), Ok(CellState::Dead));
        assert_eq!(sim.request_edit(1, 2), Ok(CellState::Alive));
        sim.commit_tick();

        assert!(!sim.current().is_alive(2, 1));
        assert!(sim.current().is_alive(1, 2));
    }

    #[test]
    fn test_repeated_edits_during_tick_alternate() {
        let mut sim = blinker();
        sim.toggle();
        sim.begin_tick();

        assert_eq!(sim.request_edit(2, 1), Ok(CellState::Dead));
        assert_eq!(sim.request_edit(2, 1), Ok(CellState::Alive));
        assert_eq!(sim.request_edit(2, 1), Ok(CellState::Dead));
        sim.commit_tick();
        assert!(!sim.current().is_alive(2, 1));

        // Edits from the last wait do not leak into the next one
        sim.begin_tick();
        assert_eq!(sim.request_edit(2, 1), Ok(CellState::Alive));
        assert!(sim.pending().is_some_and(|next| next.is_alive(2, 1)));
    }

    #[test]
    fn test_edit_after_stop_during_tick_is_not_lost() {
        let mut sim = blinker();
        sim.toggle();
        sim.begin_tick();
        sim.toggle();

        sim.request_edit(4, 4).unwrap();
        assert!(sim.commit_tick());
        assert!(sim.current().is_alive(4, 4));
        assert!(!sim.begin_tick());
    }

    #[test]
    fn test_edit_out_of_bounds() {
        let mut sim = blinker();
        let before = sim.current().clone();
        assert!(matches!(
            sim.request_edit(5, 0),
            Err(LifeError::OutOfBounds { row: 5, col: 0, .. })
        ));
        assert_eq!(sim.current(), &before);
    }

    #[test]
    fn test_reconfigure_dimensions() {
        let mut sim = blinker();
        sim.toggle();
        sim.step();
        sim.toggle();

        sim.reconfigure(Reconfigure::dimensions(8, 3)).unwrap();

        assert_eq!(sim.current().dimensions(), (8, 3));
        assert!(sim.current().is_empty());
        assert_eq!(sim.generation(), 0);
        let events = &sim.adapter().events;
        assert_eq!(events[events.len() - 2], AdapterEvent::Reset { width: 8, height: 3 });
        assert!(matches!(
            events.last(),
            Some(AdapterEvent::Generation { generation: 0, .. })
        ));
    }

    #[test]
    fn test_reconfigure_single_dimension_keeps_the_other() {
        let mut sim = blinker();
        sim.reconfigure(Reconfigure { height: Some(2), ..Reconfigure::default() }).unwrap();
        assert_eq!(sim.current().dimensions(), (5, 2));
    }

    #[test]
    fn test_reconfigure_rate_keeps_board() {
        let mut sim = blinker();
        let before = sim.current().clone();

        sim.reconfigure(Reconfigure::tick_rate(4)).unwrap();

        assert_eq!(sim.current(), &before);
        assert_eq!(sim.tick_interval(), Duration::from_millis(250));
        assert_eq!(sim.adapter().resets(), vec![(5, 5)]);
    }

    #[test]
    fn test_reconfigure_rejected_while_running() {
        let mut sim = blinker();
        sim.toggle();
        let before = sim.current().clone();
        let events = sim.adapter().events.len();

        assert_eq!(
            sim.reconfigure(Reconfigure::dimensions(3, 3)),
            Err(LifeError::SimulationRunning)
        );
        assert_eq!(sim.current(), &before);
        assert_eq!(sim.tick_rate(), TickRate::default());
        assert_eq!(sim.adapter().events.len(), events);
    }

    #[test]
    fn test_reconfigure_rejected_while_tick_in_flight() {
        let mut sim = blinker();
        sim.toggle();
        sim.begin_tick();
        sim.toggle();

        assert_eq!(
            sim.reconfigure(Reconfigure::tick_rate(1)),
            Err(LifeError::SimulationRunning)
        );
        sim.commit_tick();
        assert!(sim.reconfigure(Reconfigure::tick_rate(1)).is_ok());
    }

    #[test]
    fn test_invalid_reconfigure_changes_nothing() {
        let mut sim = blinker();
        let before = sim.current().clone();

        let request = Reconfigure {
            width: Some(10),
            height: Some(10),
            ticks_per_second: Some(0),
        };
        assert_eq!(sim.reconfigure(request), Err(LifeError::InvalidRate(0)));
        assert_eq!(
            sim.reconfigure(Reconfigure {
                width: Some(0),
                height: None,
                ticks_per_second: Some(5),
            }),
            Err(LifeError::InvalidDimensions { width: 0, height: 5 })
        );
        assert_eq!(
            sim.reconfigure(Reconfigure::dimensions(usize::MAX, 2)),
            Err(LifeError::InvalidDimensions { width: usize::MAX, height: 2 })
        );

        assert_eq!(sim.current(), &before);
        assert_eq!(sim.tick_rate(), TickRate::default());
        assert!(sim.adapter().resets().is_empty());
    }
}

use game_of_life_sim::game_of_life::{neighbors, parse_grid};
use game_of_life_sim::{
    step, CellAddress, CellState, Grid, LifeError, Reconfigure, RecordingAdapter, RunState,
    Simulation, SimulationConfig, TickRate,
};
use std::collections::HashSet;
use std::time::Duration;

#[test]
fn test_horizontal_blinker_through_3x3_center() {
    let mut grid = Grid::new(3, 3).unwrap();
    grid.set(1, 0, CellState::Alive).unwrap();
    grid.set(1, 1, CellState::Alive).unwrap();
    grid.set(1, 2, CellState::Alive).unwrap();

    let next = step(&grid);

    let alive: HashSet<CellAddress> = next.living_cells().into_iter().collect();
    let expected: HashSet<CellAddress> =
        [(0, 1), (1, 1), (2, 1)].into_iter().map(CellAddress::from).collect();
    assert_eq!(alive, expected);
}

#[test]
fn test_neighbor_counts_across_a_board() {
    let (width, height) = (6, 4);
    for row in 0..height {
        for col in 0..width {
            let on_row_edge = row == 0 || row == height - 1;
            let on_col_edge = col == 0 || col == width - 1;
            let expected = match (on_row_edge, on_col_edge) {
                (true, true) => 3,
                (true, false) | (false, true) => 5,
                (false, false) => 8,
            };
            assert_eq!(neighbors(row, col, width, height).len(), expected, "({}, {})", row, col);
        }
    }
}

#[test]
fn test_block_in_larger_board_is_still() {
    let mut board = Grid::new(8, 6).unwrap();
    board.stamp(&parse_grid("11\n11").unwrap(), 2, 3).unwrap();
    assert_eq!(step(&board), board);
}

#[test]
fn test_glider_travels_diagonally() {
    let mut board = Grid::new(8, 8).unwrap();
    let glider = parse_grid(".#.\n..#\n###").unwrap();
    board.stamp(&glider, 0, 0).unwrap();

    let mut moved = Grid::new(8, 8).unwrap();
    moved.stamp(&glider, 1, 1).unwrap();

    let mut current = board;
    for _ in 0..4 {
        current = step(&current);
    }
    assert_eq!(current, moved);
}

#[test]
fn test_manual_ticks_with_edit_between_compute_and_commit() {
    let config = SimulationConfig::new(5, 5, TickRate::new(20).unwrap()).unwrap();
    let mut sim = Simulation::new(config, RecordingAdapter::default()).unwrap();
    for col in 1..4 {
        sim.request_edit(2, col).unwrap();
    }
    let before_run = sim.current().clone();

    sim.toggle();
    assert!(sim.begin_tick());
    sim.request_edit(0, 4).unwrap();
    // The in-flight computation never saw the edit
    assert!(!sim.current().is_alive(0, 4));
    sim.commit_tick();

    let mut expected = step(&before_run);
    expected.set(0, 4, CellState::Alive).unwrap();
    assert_eq!(sim.current(), &expected);
    assert_eq!(sim.adapter().last_grid(), Some(&expected));
}

#[tokio::test(start_paused = true)]
async fn test_run_stop_and_reconfigure_through_handle() {
    let grid = parse_grid("00000\n00000\n01110\n00000\n00000").unwrap();
    let rate = TickRate::new(4).unwrap();
    let (handle, task) =
        Simulation::with_grid(grid.clone(), rate, RecordingAdapter::default()).spawn();

    assert_eq!(handle.toggle_run().await, Ok(RunState::Running));
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(
        handle.reconfigure(Reconfigure::tick_rate(10)).await,
        Err(LifeError::SimulationRunning)
    );
    assert_eq!(handle.toggle_run().await, Ok(RunState::Stopped));
    tokio::time::sleep(Duration::from_millis(400)).await;

    handle.reconfigure(Reconfigure::tick_rate(10)).await.unwrap();
    handle.shutdown().unwrap();

    let sim = task.await.unwrap();
    // 250 ms ticks: commits at 250 and 500, the third (750) was in flight at the stop
    assert_eq!(sim.generation(), 3);
    assert_eq!(sim.current(), &step(&grid));
    assert_eq!(sim.tick_interval(), Duration::from_millis(100));
    assert_eq!(sim.adapter().resets(), vec![(5, 5)]);
}

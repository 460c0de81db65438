//! End-to-end board scenarios: edit, run, cancel, inspect.

use std::cell::Cell;
use std::time::Duration;

use gridpath_core::{CellKind, Grid, Pos};
use gridpath_playback::{
    Algorithm, Board, BoardConfig, BoardError, PlaybackConfig, PlaybackState, Tick,
};

fn reference_board() -> Board {
    Board::new(BoardConfig {
        maze_seed: Some(42),
        ..BoardConfig::default()
    })
    .unwrap()
}

#[test]
fn reference_board_all_algorithms() {
    for algorithm in Algorithm::ALL {
        let mut board = reference_board();
        board.start_run(algorithm).unwrap();
        let state = board.run(|_: Duration| {}, |_: &Grid| {});
        assert_eq!(state, PlaybackState::Completed, "{algorithm}");

        let result = board.last_result().unwrap();
        assert!(result.is_found(), "{algorithm}");
        if algorithm.guarantees_shortest() {
            assert_eq!(result.path_len(), 31, "{algorithm}");
            assert_eq!(board.stats().path_len, Some(31));
            assert_eq!(board.grid().count(CellKind::Path), 29);
        }
        assert_eq!(board.stats().visited, result.visited);
        assert_eq!(board.grid().count(CellKind::Current), 0);
    }
}

#[test]
fn cancel_after_n_events_freezes_the_board() {
    for algorithm in Algorithm::ALL {
        for n in [1, 5, 17] {
            let mut board = reference_board();
            let token = board.start_run(algorithm).unwrap();
            let frames = Cell::new(0);
            let state = board.run(
                |_: Duration| {},
                |_: &Grid| {
                    frames.set(frames.get() + 1);
                    if frames.get() == n {
                        token.cancel();
                    }
                },
            );
            assert_eq!(state, PlaybackState::Cancelled, "{algorithm} n={n}");

            let grid = board.grid();
            assert_eq!(grid.count_where(|c| c.visited), n, "{algorithm} n={n}");
            assert_eq!(grid.count(CellKind::Path), 0);
            assert_eq!(grid.count(CellKind::Current), 0);
            assert_eq!(board.stats().visited, n);
            assert_eq!(board.stats().path_len, None);
            // Frames 1..=n plus the final one.
            assert_eq!(frames.get(), n + 1);
        }
    }
}

#[test]
fn toggling_a_marker_is_refused() {
    let mut board = reference_board();
    let start = board.grid().start();
    let end = board.grid().end();
    assert!(!board.toggle_wall(start));
    assert!(!board.toggle_wall(end));
    assert_eq!(board.grid().kind(start), Some(CellKind::Start));
    assert_eq!(board.grid().count(CellKind::Wall), 0);
}

#[test]
fn markers_cannot_land_on_walls() {
    let mut board = reference_board();
    assert!(board.toggle_wall(Pos::new(3, 3)));
    assert!(!board.move_start(Pos::new(3, 3)));
    assert!(!board.move_end(Pos::new(10, 5)));
    assert!(board.move_end(Pos::new(19, 39)));
    assert_eq!(board.grid().end(), Pos::new(19, 39));
}

#[test]
fn concurrent_run_is_refused() {
    let mut board = reference_board();
    board.start_run(Algorithm::Dijkstra).unwrap();
    for _ in 0..3 {
        board.tick();
    }
    assert!(matches!(
        board.start_run(Algorithm::AStar),
        Err(BoardError::RunActive)
    ));
    // The running playback is unaffected.
    assert!(matches!(board.tick(), Tick::Wait(_)));
    assert_eq!(board.stats().visited, 4);
}

#[test]
fn delays_follow_speed_then_path_delay() {
    let mut board = Board::new(BoardConfig {
        rows: 5,
        cols: 8,
        start: Pos::new(2, 1),
        end: Pos::new(2, 6),
        maze_seed: Some(0),
        playback: PlaybackConfig {
            speed: 80,
            path_delay: Duration::from_millis(7),
        },
    })
    .unwrap();
    board.start_run(Algorithm::Bfs).unwrap();

    let mut delays = Vec::new();
    board.run(|d: Duration| delays.push(d), |_: &Grid| {});

    let visited = board.stats().visited;
    assert_eq!(delays.len(), visited + 4);
    assert!(delays[..visited].iter().all(|&d| d == Duration::from_millis(21)));
    assert!(delays[visited..].iter().all(|&d| d == Duration::from_millis(7)));
}

#[test]
fn maze_runs_are_reproducible() {
    let run = || {
        let mut board = reference_board();
        board.generate_maze().unwrap();
        board.start_run(Algorithm::AStar).unwrap();
        board.run(|_: Duration| {}, |_: &Grid| {});
        (board.grid().clone(), board.last_result().cloned())
    };
    let (a, ra) = run();
    let (b, rb) = run();
    assert_eq!(a, b);
    assert_eq!(ra, rb);
    assert!(ra.is_some_and(|r| r.is_found()));
}

#[test]
fn enclosed_end_reports_no_path() {
    let grid: Grid = "\
        S....\n\
        ...#.\n\
        ..#E#\n\
        ...#."
        .parse()
        .unwrap();
    let mut board = Board::from_grid(grid, PlaybackConfig::default(), None);
    board.start_run(Algorithm::Dijkstra).unwrap();
    assert_eq!(
        board.run(|_: Duration| {}, |_: &Grid| {}),
        PlaybackState::Completed
    );
    let result = board.last_result().unwrap();
    assert!(!result.is_found());
    assert_eq!(result.path_len(), 0);
    assert_eq!(board.stats().path_len, None);
    assert_eq!(board.grid().count(CellKind::Path), 0);
}

//! Maze generation for gridpath boards.
//!
//! [`MazeGen`] carves a perfect maze with randomized recursive backtracking:
//! the board is filled with walls, then a depth-first walk over the
//! odd-aligned lattice knocks down the wall between each cell and a random
//! unvisited lattice cell two steps away, backtracking when stuck. The
//! carved corridors form a spanning tree, so every carved cell is reachable
//! from every other one along exactly one route.
//!
//! Start and end may sit on any parity. After carving, the 3×3 block around
//! each of them is cleared. Such a block always contains an (odd, odd)
//! lattice cell when the board is at least 2×2, which ties the marker into
//! the corridor tree.

use gridpath_core::{Bounds, Grid, GridError, Pos};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The fixed lattice cell carving starts from.
pub const MAZE_SEED: Pos = Pos::new(1, 1);

/// Two-step moves to the neighbouring lattice cells.
const JUMPS: [Pos; 4] = [
    Pos::new(-2, 0),
    Pos::new(0, 2),
    Pos::new(2, 0),
    Pos::new(0, -2),
];

/// Maze generator owning its random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl MazeGen<StdRng> {
    /// A reproducible generator: the same seed yields the same maze.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a maze with the dimensions and markers of `grid`.
    ///
    /// The input is only read; a fresh board is returned. Boards smaller
    /// than 2×2 have no lattice cell to carve from and are rejected with
    /// [`GridError::TooSmallForMaze`].
    pub fn generate(&mut self, grid: &Grid) -> Result<Grid, GridError> {
        let bounds = grid.bounds();
        if bounds.rows < 2 || bounds.cols < 2 {
            return Err(GridError::TooSmallForMaze(bounds));
        }

        let mut walls = vec![true; bounds.len()];
        let carved = self.carve(bounds, &mut walls);
        let cleared = clear_around(bounds, &mut walls, grid.start())
            + clear_around(bounds, &mut walls, grid.end());
        log::debug!("maze {bounds}: carved {carved} cells, cleared {cleared} around markers");

        Grid::with_walls(bounds, grid.start(), grid.end(), |p| {
            bounds.index(p).is_some_and(|i| walls[i])
        })
    }

    /// Depth-first carve from [`MAZE_SEED`]. Returns the number of cells
    /// opened.
    fn carve(&mut self, bounds: Bounds, walls: &mut [bool]) -> usize {
        let Some(seed) = bounds.index(MAZE_SEED) else {
            return 0;
        };
        walls[seed] = false;
        let mut carved = 1;
        let mut stack = vec![MAZE_SEED];
        let mut jumps = JUMPS;

        while let Some(&cur) = stack.last() {
            jumps.shuffle(&mut self.rng);
            let target = jumps
                .iter()
                .map(|&d| cur + d)
                .find(|&t| bounds.index(t).is_some_and(|i| walls[i]));

            let Some(target) = target else {
                stack.pop();
                continue;
            };
            let between = Pos::new((cur.row + target.row) / 2, (cur.col + target.col) / 2);
            for p in [between, target] {
                if let Some(i) = bounds.index(p) {
                    walls[i] = false;
                }
            }
            carved += 2;
            stack.push(target);
        }
        carved
    }
}

/// Open the clipped 3×3 block centred on `center`. Returns how many walls
/// were removed.
fn clear_around(bounds: Bounds, walls: &mut [bool], center: Pos) -> usize {
    let mut cleared = 0;
    for dr in -1..=1 {
        for dc in -1..=1 {
            if let Some(i) = bounds.index(center.shift(dr, dc)) {
                if walls[i] {
                    walls[i] = false;
                    cleared += 1;
                }
            }
        }
    }
    cleared
}

/// Generate a maze for `grid` with the thread-local random source.
pub fn generate_maze(grid: &Grid) -> Result<Grid, GridError> {
    MazeGen::new(rand::rng()).generate(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::{CellKind, build_grid};
    use gridpath_search::{Algorithm, run_search};
    use std::collections::HashSet;

    fn flood(grid: &Grid, from: Pos) -> HashSet<Pos> {
        let mut seen = HashSet::from([from]);
        let mut stack = vec![from];
        while let Some(p) = stack.pop() {
            for n in grid.neighbors(p) {
                if seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        seen
    }

    fn open_cells(grid: &Grid) -> HashSet<Pos> {
        grid.iter()
            .filter(|c| !c.is_wall())
            .map(|c| c.pos())
            .collect()
    }

    #[test]
    fn maze_is_fully_connected() {
        for (rows, cols) in [(20, 40), (21, 41), (2, 2), (3, 7), (9, 4), (15, 15)] {
            let board = build_grid(rows, cols).unwrap();
            for seed in 0..10 {
                let maze = MazeGen::seeded(seed).generate(&board).unwrap();
                assert_eq!(flood(&maze, MAZE_SEED), open_cells(&maze), "{rows}x{cols}\n{maze}");
            }
        }
    }

    #[test]
    fn markers_survive_on_any_parity() {
        let corners = [
            (Pos::new(0, 0), Pos::new(19, 39)),
            (Pos::new(19, 0), Pos::new(0, 39)),
            (Pos::new(10, 5), Pos::new(10, 35)),
            (Pos::new(2, 2), Pos::new(17, 38)),
        ];
        for (start, end) in corners {
            let board = Grid::new(20, 40, start, end).unwrap();
            let maze = MazeGen::seeded(3).generate(&board).unwrap();
            assert_eq!(maze.start(), start);
            assert_eq!(maze.end(), end);
            assert_eq!(maze.kind(start), Some(CellKind::Start));
            assert_eq!(maze.kind(end), Some(CellKind::End));
            for dr in -1..=1 {
                for dc in -1..=1 {
                    let p = start.shift(dr, dc);
                    if maze.contains(p) {
                        assert!(maze.is_open(p));
                    }
                }
            }
            for algorithm in Algorithm::ALL {
                let r = run_search(&maze, algorithm, |_| {}, || false);
                assert!(r.is_found(), "{algorithm}\n{maze}");
            }
        }
    }

    #[test]
    fn carve_visits_every_lattice_cell_once() {
        let bounds = Bounds::new(20, 40);
        let mut walls = vec![true; bounds.len()];
        let carved = MazeGen::seeded(11).carve(bounds, &mut walls);
        let lattice = bounds.iter().filter(|p| p.is_odd_aligned()).count();
        // A spanning tree over the lattice: one cell per node plus one
        // between each of its edges.
        assert_eq!(carved, 2 * lattice - 1);
        assert_eq!(walls.iter().filter(|w| !**w).count(), carved);
        for p in bounds.iter().filter(|p| p.is_odd_aligned()) {
            assert!(!walls[bounds.index(p).unwrap()], "{p} not carved");
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let board = build_grid(20, 40).unwrap();
        let a = MazeGen::seeded(99).generate(&board).unwrap();
        let b = MazeGen::seeded(99).generate(&board).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn input_is_left_alone() {
        let mut board = build_grid(10, 10).unwrap();
        board.toggle_wall(Pos::new(0, 9));
        let before = board.clone();
        let _ = generate_maze(&board).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn tiny_boards_are_rejected() {
        let board = Grid::new(1, 5, Pos::new(0, 0), Pos::new(0, 4)).unwrap();
        assert!(matches!(
            MazeGen::seeded(0).generate(&board),
            Err(GridError::TooSmallForMaze(_))
        ));
    }
}

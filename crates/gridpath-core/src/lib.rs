//! **gridpath-core**: the grid model of the gridpath pathfinding engine.
//!
//! This crate provides the foundational types shared by the search engine,
//! the maze generator and the playback controller: lattice positions, cells
//! with their search bookkeeping, and the [`Grid`] board that enforces the
//! start/end/wall placement invariants.

pub mod cell;
mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellKind, UNREACHABLE};
pub use error::GridError;
pub use geom::{Bounds, Pos, manhattan};
pub use grid::{DEFAULT_COLS, DEFAULT_ROWS, Grid, build_grid};

use thiserror::Error;

use crate::geom::{Bounds, Pos};

pub(crate) const OUT_OF_BOUNDS: &str = "outside the grid";
pub(crate) const ON_WALL: &str = "occupied by a wall";
pub(crate) const ON_MARKER: &str = "occupied by the other marker";
pub(crate) const COINCIDE: &str = "start and end coincide";
pub(crate) const IS_MARKER: &str = "holds the start or end marker";
#[cfg(feature = "serde")]
pub(crate) const MISPLACED: &str = "cell out of row-major order";

/// Errors raised at the grid's construction and mutation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions {0} hold no cell")]
    EmptyGrid(Bounds),
    /// Placement out of bounds or colliding with a wall or the other marker.
    #[error("invalid position {pos}: {reason}")]
    InvalidPosition { pos: Pos, reason: &'static str },
    #[error("grid text: line {line} is {found} wide, expected {expected}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid text: invalid glyph \u{201c}{ch}\u{201d} at {pos}")]
    InvalidGlyph { ch: char, pos: Pos },
    #[error("grid text: missing {0} marker")]
    MissingMarker(&'static str),
    #[error("grid text: more than one {marker} marker (second at {pos})")]
    DuplicateMarker { marker: &'static str, pos: Pos },
    #[error("grid {bounds} needs {expected} cells, found {found}")]
    CellCount {
        bounds: Bounds,
        expected: usize,
        found: usize,
    },
    #[error("grid {0} is too small to carve a maze (need at least 2x2)")]
    TooSmallForMaze(Bounds),
}

//! The [`Cell`] type: one lattice position with its search-relevant state.

use std::fmt;

use crate::geom::Pos;

/// Sentinel distance meaning "not reached yet" (+infinity).
pub const UNREACHABLE: u32 = u32::MAX;

/// What a cell currently shows on the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Visited,
    Path,
    Current,
}

impl CellKind {
    /// Glyph used by the text form of a grid.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Visited => 'o',
            Self::Path => '*',
            Self::Current => '@',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        Some(match ch {
            '.' => Self::Empty,
            '#' => Self::Wall,
            'S' => Self::Start,
            'E' => Self::End,
            'o' => Self::Visited,
            '*' => Self::Path,
            '@' => Self::Current,
            _ => return None,
        })
    }

    /// Start or end marker.
    #[inline]
    pub const fn is_marker(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Markers left behind by a search playback.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Visited | Self::Path | Self::Current)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A single board cell.
///
/// `previous` is a flat index into the owning grid's cell vector; the grid
/// is the sole owner of every cell. `pos` and `kind` are only changed through
/// [`Grid`](crate::Grid) so the marker invariants hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub(crate) pos: Pos,
    pub(crate) kind: CellKind,
    /// Hop count from start, [`UNREACHABLE`] until reached.
    pub distance: u32,
    /// A* estimate to the end.
    pub heuristic: u32,
    /// A* priority, `distance + heuristic`.
    pub total_cost: u32,
    pub previous: Option<usize>,
    pub visited: bool,
}

impl Cell {
    /// A fresh cell of the given kind with search state reset.
    pub(crate) const fn new(pos: Pos, kind: CellKind) -> Self {
        Self {
            pos,
            kind,
            distance: UNREACHABLE,
            heuristic: 0,
            total_cost: 0,
            previous: None,
            visited: false,
        }
    }

    #[inline]
    pub const fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    #[inline]
    pub const fn is_wall(&self) -> bool {
        matches!(self.kind, CellKind::Wall)
    }

    /// Reset the search bookkeeping, leaving `kind` alone.
    #[inline]
    pub fn reset_search(&mut self) {
        self.distance = UNREACHABLE;
        self.heuristic = 0;
        self.total_cost = 0;
        self.previous = None;
        self.visited = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_round_trip() {
        for kind in [
            CellKind::Empty,
            CellKind::Wall,
            CellKind::Start,
            CellKind::End,
            CellKind::Visited,
            CellKind::Path,
            CellKind::Current,
        ] {
            assert_eq!(CellKind::from_glyph(kind.glyph()), Some(kind));
        }
        assert_eq!(CellKind::from_glyph('x'), None);
    }

    #[test]
    fn new_cell_is_unreached() {
        let c = Cell::new(Pos::new(1, 1), CellKind::Empty);
        assert_eq!(c.distance, UNREACHABLE);
        assert!(c.previous.is_none());
        assert!(!c.visited);
    }

    #[test]
    fn reset_search_keeps_kind() {
        let mut c = Cell::new(Pos::new(0, 0), CellKind::Visited);
        c.distance = 4;
        c.previous = Some(3);
        c.visited = true;
        c.reset_search();
        assert_eq!(c.kind, CellKind::Visited);
        assert_eq!(c.distance, UNREACHABLE);
        assert!(c.previous.is_none());
        assert!(!c.visited);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn cell_round_trip() {
        let mut cell = Cell::new(Pos::new(3, 7), CellKind::Path);
        cell.distance = 12;
        cell.previous = Some(42);
        let json = serde_json::to_string(&cell).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(cell, back);
    }
}

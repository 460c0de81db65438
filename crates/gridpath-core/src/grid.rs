//! The [`Grid`] type: the board of [`Cell`]s searched by the engine.
//!
//! A `Grid` owns its cells in a row-major vector, so cloning it yields an
//! independent snapshot. Exactly one start and one end cell exist at all
//! times, and walls never coincide with either; every mutating method keeps
//! those invariants and rejects (rather than half-applies) anything that
//! would break them.

use std::fmt;
use std::str::FromStr;

use crate::cell::{Cell, CellKind};
use crate::error::{self, GridError};
use crate::geom::{Bounds, Pos};

/// Rows of the reference board.
pub const DEFAULT_ROWS: i32 = 20;
/// Columns of the reference board.
pub const DEFAULT_COLS: i32 = 40;

/// Build a `rows × cols` board with the default marker placement: start at
/// `(rows/2, cols/8)`, end at `(rows/2, cols - cols/8)` clamped to the last
/// column.
///
/// On the 20×40 reference board that is start (10, 5) and end (10, 35).
pub fn build_grid(rows: i32, cols: i32) -> Result<Grid, GridError> {
    let row = rows / 2;
    let start = Pos::new(row, cols / 8);
    let end = Pos::new(row, (cols - cols / 8).min(cols - 1));
    Grid::new(rows, cols, start, end)
}

/// A board of cells with one start and one end marker.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr")
)]
pub struct Grid {
    bounds: Bounds,
    cells: Vec<Cell>,
    start: Pos,
    end: Pos,
}

impl Grid {
    /// Create an empty board with start and end placed.
    ///
    /// Fails with [`GridError::EmptyGrid`] for a zero dimension and with
    /// [`GridError::InvalidPosition`] if a marker is out of bounds or both
    /// markers coincide.
    pub fn new(rows: i32, cols: i32, start: Pos, end: Pos) -> Result<Self, GridError> {
        Self::with_walls(Bounds::new(rows, cols), start, end, |_| false)
    }

    /// Create a board whose walls are given by `is_wall`.
    ///
    /// The predicate is ignored on the start and end positions, which are
    /// always stamped on top.
    pub fn with_walls(
        bounds: Bounds,
        start: Pos,
        end: Pos,
        mut is_wall: impl FnMut(Pos) -> bool,
    ) -> Result<Self, GridError> {
        if bounds.is_empty() {
            return Err(GridError::EmptyGrid(bounds));
        }
        for p in [start, end] {
            if !bounds.contains(p) {
                return Err(GridError::InvalidPosition {
                    pos: p,
                    reason: error::OUT_OF_BOUNDS,
                });
            }
        }
        if start == end {
            return Err(GridError::InvalidPosition {
                pos: end,
                reason: error::COINCIDE,
            });
        }

        let cells = bounds
            .iter()
            .map(|p| {
                let kind = if p == start {
                    CellKind::Start
                } else if p == end {
                    CellKind::End
                } else if is_wall(p) {
                    CellKind::Wall
                } else {
                    CellKind::Empty
                };
                Cell::new(p, kind)
            })
            .collect();

        Ok(Self {
            bounds,
            cells,
            start,
            end,
        })
    }

    /// Parse a board from its text form.
    ///
    /// Lines are separated by `'\n'`, must all have the same width, and use
    /// the glyphs of [`CellKind::glyph`]. Exactly one `S` and one `E` are
    /// required. Surrounding whitespace of the whole string and of each line
    /// is trimmed, so indented raw strings work.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s
            .trim()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = lines.first().map_or(0, |l| l.chars().count());

        let mut kinds = Vec::with_capacity(width * lines.len());
        let mut start = None;
        let mut end = None;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::InconsistentWidth {
                    line: row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row as i32, col as i32);
                let kind = CellKind::from_glyph(ch).ok_or(GridError::InvalidGlyph { ch, pos })?;
                let slot = match kind {
                    CellKind::Start => Some((&mut start, "start")),
                    CellKind::End => Some((&mut end, "end")),
                    _ => None,
                };
                if let Some((slot, marker)) = slot {
                    if slot.is_some() {
                        return Err(GridError::DuplicateMarker { marker, pos });
                    }
                    *slot = Some(pos);
                }
                kinds.push(kind);
            }
        }

        let start = start.ok_or(GridError::MissingMarker("start"))?;
        let end = end.ok_or(GridError::MissingMarker("end"))?;
        let bounds = Bounds::new(lines.len() as i32, width as i32);
        let mut grid = Self::with_walls(bounds, start, end, |_| false)?;
        for (cell, kind) in grid.cells.iter_mut().zip(kinds) {
            cell.kind = kind;
        }
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty boards.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Pos {
        self.end
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.bounds.contains(p)
    }

    /// Flat index of `p`, `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        self.bounds.index(p)
    }

    pub fn cell(&self, p: Pos) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    pub fn cell_at(&self, idx: usize) -> Option<&Cell> {
        self.cells.get(idx)
    }

    /// Mutable access to a cell's search fields.
    ///
    /// The cell's position and kind stay read-only from outside this crate.
    pub fn cell_at_mut(&mut self, idx: usize) -> Option<&mut Cell> {
        self.cells.get_mut(idx)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn kind(&self, p: Pos) -> Option<CellKind> {
        self.cell(p).map(Cell::kind)
    }

    /// Whether `p` is in bounds and not a wall.
    #[inline]
    pub fn is_open(&self, p: Pos) -> bool {
        self.cell(p).is_some_and(|c| !c.is_wall())
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Count cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }

    /// Count cells satisfying a predicate.
    pub fn count_where(&self, f: impl FnMut(&&Cell) -> bool) -> usize {
        self.cells.iter().filter(f).count()
    }

    /// The up-to-4 orthogonal in-bounds, non-wall neighbours of `p`, in the
    /// order up, right, down, left.
    pub fn neighbors(&self, p: Pos) -> impl Iterator<Item = Pos> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.is_open(n))
    }

    /// Index form of [`neighbors`](Self::neighbors).
    pub fn neighbor_indices(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let p = self.bounds.pos(idx);
        p.neighbors_4()
            .into_iter()
            .filter_map(|n| self.index(n))
            .filter(|&i| !self.cells[i].is_wall())
    }

    // -----------------------------------------------------------------------
    // Interactive edits
    // -----------------------------------------------------------------------

    /// Flip empty ↔ wall at `p`. Search marks count as empty.
    ///
    /// Returns the new kind. Start, end and out-of-bounds targets are
    /// rejected with [`GridError::InvalidPosition`].
    pub fn try_toggle_wall(&mut self, p: Pos) -> Result<CellKind, GridError> {
        let idx = self.checked_index(p)?;
        let cell = &mut self.cells[idx];
        if cell.kind.is_marker() {
            return Err(GridError::InvalidPosition {
                pos: p,
                reason: error::IS_MARKER,
            });
        }
        cell.kind = if cell.is_wall() {
            CellKind::Empty
        } else {
            CellKind::Wall
        };
        cell.reset_search();
        Ok(cell.kind)
    }

    /// Silent form of [`try_toggle_wall`](Self::try_toggle_wall): returns
    /// whether the grid changed.
    pub fn toggle_wall(&mut self, p: Pos) -> bool {
        self.try_toggle_wall(p)
            .inspect_err(|e| log::trace!("toggle_wall rejected: {e}"))
            .is_ok()
    }

    /// Relocate the start marker to `p`.
    pub fn try_move_start(&mut self, p: Pos) -> Result<(), GridError> {
        let old = self.start;
        self.relocate(old, p, self.end, CellKind::Start)?;
        self.start = p;
        Ok(())
    }

    /// Relocate the end marker to `p`.
    pub fn try_move_end(&mut self, p: Pos) -> Result<(), GridError> {
        let old = self.end;
        self.relocate(old, p, self.start, CellKind::End)?;
        self.end = p;
        Ok(())
    }

    /// Silent form of [`try_move_start`](Self::try_move_start): returns
    /// whether the marker moved. Moving onto its own cell changes nothing.
    pub fn move_start(&mut self, p: Pos) -> bool {
        p != self.start
            && self
                .try_move_start(p)
                .inspect_err(|e| log::trace!("move_start rejected: {e}"))
                .is_ok()
    }

    /// Silent form of [`try_move_end`](Self::try_move_end): returns whether
    /// the marker moved.
    pub fn move_end(&mut self, p: Pos) -> bool {
        p != self.end
            && self
                .try_move_end(p)
                .inspect_err(|e| log::trace!("move_end rejected: {e}"))
                .is_ok()
    }

    fn relocate(&mut self, from: Pos, to: Pos, other: Pos, marker: CellKind) -> Result<(), GridError> {
        let to_idx = self.checked_index(to)?;
        if to == from {
            return Ok(());
        }
        if to == other {
            return Err(GridError::InvalidPosition {
                pos: to,
                reason: error::ON_MARKER,
            });
        }
        if self.cells[to_idx].is_wall() {
            return Err(GridError::InvalidPosition {
                pos: to,
                reason: error::ON_WALL,
            });
        }
        if let Some(from_idx) = self.index(from) {
            self.cells[from_idx].kind = CellKind::Empty;
        }
        self.cells[to_idx].kind = marker;
        Ok(())
    }

    fn checked_index(&self, p: Pos) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::InvalidPosition {
            pos: p,
            reason: error::OUT_OF_BOUNDS,
        })
    }

    // -----------------------------------------------------------------------
    // Search marks
    // -----------------------------------------------------------------------

    /// Paint a search mark (visited, path or current) on `p`.
    ///
    /// Walls and markers are never repainted; returns whether the cell
    /// changed kind.
    pub fn mark(&mut self, p: Pos, kind: CellKind) -> bool {
        if !kind.is_search_mark() {
            return false;
        }
        let Some(idx) = self.index(p) else {
            return false;
        };
        let cell = &mut self.cells[idx];
        if cell.is_wall() || cell.kind.is_marker() || cell.kind == kind {
            return false;
        }
        cell.kind = kind;
        true
    }

    /// Reset the search bookkeeping of every cell; kinds untouched.
    pub fn reset_search_state(&mut self) {
        for c in &mut self.cells {
            c.reset_search();
        }
    }

    /// Remove visited, path and current marks and reset the search state.
    /// Walls, start and end are preserved.
    pub fn clear_path(&mut self) {
        for c in &mut self.cells {
            if c.kind.is_search_mark() {
                c.kind = CellKind::Empty;
            }
            c.reset_search();
        }
    }

    /// [`clear_path`](Self::clear_path) plus removal of every wall.
    pub fn clear_walls(&mut self) {
        for c in &mut self.cells {
            if !c.kind.is_marker() {
                c.kind = CellKind::Empty;
            }
            c.reset_search();
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.bounds.cols.max(1) as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for c in row {
                write!(f, "{}", c.kind.glyph())?;
            }
        }
        Ok(())
    }
}

/// Unchecked wire form of a [`Grid`]; every deserialized grid passes
/// through [`Grid::from_parts`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    bounds: Bounds,
    cells: Vec<Cell>,
    start: Pos,
    end: Pos,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(r: GridRepr) -> Result<Self, GridError> {
        Self::from_parts(r.bounds, r.cells, r.start, r.end)
    }
}

#[cfg(feature = "serde")]
impl Grid {
    /// Reassemble a grid from raw parts, checking every placement invariant
    /// [`with_walls`](Self::with_walls) guarantees.
    fn from_parts(bounds: Bounds, mut cells: Vec<Cell>, start: Pos, end: Pos) -> Result<Self, GridError> {
        if bounds.is_empty() {
            return Err(GridError::EmptyGrid(bounds));
        }
        if cells.len() != bounds.len() {
            return Err(GridError::CellCount {
                bounds,
                expected: bounds.len(),
                found: cells.len(),
            });
        }
        let mut grid = Self::with_walls(bounds, start, end, |_| false)?;
        for (i, cell) in cells.iter_mut().enumerate() {
            if cell.pos != bounds.pos(i) {
                return Err(GridError::InvalidPosition {
                    pos: cell.pos,
                    reason: crate::error::MISPLACED,
                });
            }
            let expected = match cell.pos {
                p if p == start => Some((CellKind::Start, "start")),
                p if p == end => Some((CellKind::End, "end")),
                _ => None,
            };
            match (expected, cell.kind) {
                (Some((marker, _)), kind) if kind == marker => {}
                (Some((_, name)), _) => return Err(GridError::MissingMarker(name)),
                (None, CellKind::Start) => {
                    return Err(GridError::DuplicateMarker {
                        marker: "start",
                        pos: cell.pos,
                    });
                }
                (None, CellKind::End) => {
                    return Err(GridError::DuplicateMarker {
                        marker: "end",
                        pos: cell.pos,
                    });
                }
                (None, _) => {}
            }
            if cell.previous.is_some_and(|prev| prev >= bounds.len()) {
                cell.previous = None;
            }
        }
        grid.cells = cells;
        Ok(grid)
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(5, 6, Pos::new(2, 0), Pos::new(2, 5)).unwrap()
    }

    #[test]
    fn new_places_markers() {
        let g = grid();
        assert_eq!(g.len(), 30);
        assert_eq!(g.kind(Pos::new(2, 0)), Some(CellKind::Start));
        assert_eq!(g.kind(Pos::new(2, 5)), Some(CellKind::End));
        assert_eq!(g.count(CellKind::Empty), 28);
    }

    #[test]
    fn new_rejects_bad_markers() {
        assert!(matches!(
            Grid::new(5, 5, Pos::new(1, 1), Pos::new(1, 1)),
            Err(GridError::InvalidPosition { .. })
        ));
        assert!(matches!(
            Grid::new(5, 5, Pos::new(1, 1), Pos::new(5, 1)),
            Err(GridError::InvalidPosition { .. })
        ));
        assert!(matches!(
            Grid::new(0, 5, Pos::new(0, 0), Pos::new(0, 1)),
            Err(GridError::EmptyGrid(_))
        ));
    }

    #[test]
    fn build_grid_reference_board() {
        let g = build_grid(DEFAULT_ROWS, DEFAULT_COLS).unwrap();
        assert_eq!(g.start(), Pos::new(10, 5));
        assert_eq!(g.end(), Pos::new(10, 35));
        let small = build_grid(1, 2).unwrap();
        assert_eq!(small.start(), Pos::new(0, 0));
        assert_eq!(small.end(), Pos::new(0, 1));
    }

    #[test]
    fn toggle_wall_flips() {
        let mut g = grid();
        let p = Pos::new(0, 0);
        assert!(g.toggle_wall(p));
        assert_eq!(g.kind(p), Some(CellKind::Wall));
        assert!(g.toggle_wall(p));
        assert_eq!(g.kind(p), Some(CellKind::Empty));
    }

    #[test]
    fn toggle_wall_on_start_is_rejected() {
        let mut g = grid();
        let before = g.clone();
        assert!(!g.toggle_wall(g.start()));
        assert!(!g.toggle_wall(g.end()));
        assert!(!g.toggle_wall(Pos::new(9, 9)));
        assert_eq!(g, before);
        assert_eq!(g.kind(Pos::new(2, 0)), Some(CellKind::Start));
    }

    #[test]
    fn move_markers() {
        let mut g = grid();
        assert!(g.move_start(Pos::new(0, 0)));
        assert_eq!(g.start(), Pos::new(0, 0));
        assert_eq!(g.kind(Pos::new(2, 0)), Some(CellKind::Empty));
        assert_eq!(g.count(CellKind::Start), 1);

        assert!(g.move_end(Pos::new(4, 4)));
        assert_eq!(g.kind(Pos::new(4, 4)), Some(CellKind::End));
        assert_eq!(g.count(CellKind::End), 1);
    }

    #[test]
    fn move_onto_own_cell_reports_no_change() {
        let mut g = grid();
        let before = g.clone();
        assert!(!g.move_start(g.start()));
        assert!(!g.move_end(g.end()));
        assert_eq!(g, before);
        assert_eq!(g.try_move_start(g.start()), Ok(()));
    }

    #[test]
    fn move_rejected_on_wall_or_other_marker() {
        let mut g = grid();
        g.toggle_wall(Pos::new(1, 1));
        let before = g.clone();
        assert!(!g.move_start(Pos::new(1, 1)));
        assert!(!g.move_start(g.end()));
        assert!(!g.move_end(g.start()));
        assert!(!g.move_end(Pos::new(-1, 0)));
        assert_eq!(g, before);
        assert!(matches!(
            g.try_move_end(Pos::new(1, 1)),
            Err(GridError::InvalidPosition { reason, .. }) if reason == error::ON_WALL
        ));
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let mut g = grid();
        g.toggle_wall(Pos::new(1, 0));
        let n: Vec<_> = g.neighbors(Pos::new(0, 0)).collect();
        assert_eq!(n, vec![Pos::new(0, 1)]);
        let n: Vec<_> = g.neighbors(Pos::new(2, 2)).collect();
        assert_eq!(
            n,
            vec![Pos::new(1, 2), Pos::new(2, 3), Pos::new(3, 2), Pos::new(2, 1)]
        );
        let idx = g.index(Pos::new(2, 2)).unwrap();
        let ni: Vec<_> = g.neighbor_indices(idx).collect();
        assert_eq!(ni.len(), 4);
    }

    #[test]
    fn mark_never_covers_walls_or_markers() {
        let mut g = grid();
        g.toggle_wall(Pos::new(0, 0));
        assert!(!g.mark(Pos::new(0, 0), CellKind::Visited));
        assert!(!g.mark(g.start(), CellKind::Visited));
        assert!(!g.mark(Pos::new(1, 1), CellKind::Wall));
        assert!(g.mark(Pos::new(1, 1), CellKind::Visited));
        assert_eq!(g.kind(Pos::new(1, 1)), Some(CellKind::Visited));
    }

    #[test]
    fn clear_path_is_idempotent() {
        let mut g = grid();
        g.toggle_wall(Pos::new(0, 3));
        g.mark(Pos::new(1, 1), CellKind::Visited);
        g.mark(Pos::new(1, 2), CellKind::Path);
        g.cell_at_mut(7).unwrap().visited = true;
        g.clear_path();
        let once = g.clone();
        g.clear_path();
        assert_eq!(g, once);
        assert_eq!(g.count(CellKind::Wall), 1);
        assert_eq!(g.count(CellKind::Visited), 0);
        assert_eq!(g.count(CellKind::Path), 0);
        assert!(g.iter().all(|c| !c.visited));
    }

    #[test]
    fn clear_walls_keeps_markers() {
        let mut g = grid();
        g.toggle_wall(Pos::new(0, 3));
        g.clear_walls();
        assert_eq!(g.count(CellKind::Wall), 0);
        assert_eq!(g.count(CellKind::Start), 1);
        assert_eq!(g.count(CellKind::End), 1);
    }

    #[test]
    fn parse_and_display() {
        let text = "
            S..#
            .#..
            ...E
        ";
        let g = Grid::parse(text).unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.start(), Pos::new(0, 0));
        assert_eq!(g.end(), Pos::new(2, 3));
        assert_eq!(g.count(CellKind::Wall), 2);
        assert_eq!(g.to_string(), "S..#\n.#..\n...E");
        let again: Grid = g.to_string().parse().unwrap();
        assert_eq!(again, g);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Grid::parse("S.\n.E.\n"),
            Err(GridError::InconsistentWidth { line: 1, .. })
        ));
        assert!(matches!(
            Grid::parse("S.x\n..E"),
            Err(GridError::InvalidGlyph { ch: 'x', .. })
        ));
        assert!(matches!(
            Grid::parse("S..\n..."),
            Err(GridError::MissingMarker("end"))
        ));
        assert!(matches!(
            Grid::parse("S.S\n..E"),
            Err(GridError::DuplicateMarker { marker: "start", .. })
        ));
    }
}

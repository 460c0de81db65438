use gridpath_core::Pos;

use crate::Algorithm;

/// One animation-worthy moment of a run: a cell was dequeued and finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchEvent {
    pub pos: Pos,
    /// Flat index of `pos` in the grid.
    pub index: usize,
    /// Hop count from start to this cell.
    pub distance: u32,
    /// Cells finalized so far, this one included.
    pub visited: usize,
    /// Entries left in the frontier after expanding this cell.
    pub frontier: usize,
}

/// Where a search stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Running,
    Found,
    Exhausted,
    Cancelled,
}

/// One advance of a [`Search`](crate::Search).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Visit(SearchEvent),
    /// The search has terminated; further calls keep returning this.
    Done(Status),
}

/// Terminal outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Cells from start to end inclusive.
    Found { path: Vec<Pos> },
    /// The frontier was exhausted without reaching the end.
    NoPath,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    pub algorithm: Algorithm,
    pub outcome: Outcome,
    /// Number of cells finalized during the run.
    pub visited: usize,
}

impl RunResult {
    pub fn path(&self) -> Option<&[Pos]> {
        match &self.outcome {
            Outcome::Found { path } => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.outcome, Outcome::Found { .. })
    }

    /// Number of cells on the path, start and end included; 0 without a path.
    pub fn path_len(&self) -> usize {
        self.path().map_or(0, <[Pos]>::len)
    }

    /// Number of moves along the path; 0 without a path.
    pub fn steps(&self) -> usize {
        self.path_len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_len_counts_cells() {
        let r = RunResult {
            algorithm: Algorithm::Bfs,
            outcome: Outcome::Found {
                path: vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 1)],
            },
            visited: 4,
        };
        assert!(r.is_found());
        assert_eq!(r.path_len(), 3);
        assert_eq!(r.steps(), 2);

        let none = RunResult {
            outcome: Outcome::NoPath,
            ..r
        };
        assert_eq!(none.path(), None);
        assert_eq!(none.path_len(), 0);
        assert_eq!(none.steps(), 0);
    }
}

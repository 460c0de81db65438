use std::fmt;

use gridpath_core::{Grid, Pos};

use crate::Algorithm;
use crate::astar::AStar;
use crate::bfs::Bfs;
use crate::dfs::Dfs;
use crate::dijkstra::Dijkstra;
use crate::event::{Outcome, RunResult, SearchEvent, Status, Step};
use crate::frontier::Frontier;

/// A single run of one algorithm, advanced one visitation at a time.
///
/// The search owns a private copy of the grid taken at construction, so
/// the caller's board is never touched and an abandoned run leaves nothing
/// behind. Each [`step`](Self::step) finalizes exactly one cell, which is the
/// suspension point a scheduler or animation loop hooks into.
pub struct Search {
    algorithm: Algorithm,
    grid: Grid,
    frontier: Box<dyn Frontier>,
    start: usize,
    end: usize,
    visited: usize,
    status: Status,
}

impl Search {
    /// Snapshot `grid` and seed the frontier for `algorithm`.
    ///
    /// Marks left by an earlier playback are cleared on the copy; only walls
    /// and the two markers matter to the search.
    pub fn new(grid: &Grid, algorithm: Algorithm) -> Self {
        let mut grid = grid.clone();
        grid.clear_path();

        let mut frontier: Box<dyn Frontier> = match algorithm {
            Algorithm::Dijkstra => Box::<Dijkstra>::default(),
            Algorithm::AStar => Box::<AStar>::default(),
            Algorithm::Bfs => Box::<Bfs>::default(),
            Algorithm::Dfs => Box::<Dfs>::default(),
        };

        let bounds = grid.bounds();
        let start = bounds.index(grid.start()).unwrap_or_default();
        let end = bounds.index(grid.end()).unwrap_or_default();
        frontier.seed(&mut grid, start, end);

        log::debug!(
            "{algorithm}: search {} -> {} on {bounds}",
            grid.start(),
            grid.end()
        );

        Self {
            algorithm,
            grid,
            frontier,
            start,
            end,
            visited: 0,
            status: Status::Running,
        }
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Cells finalized so far.
    #[inline]
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// The private working copy, with the search bookkeeping filled in.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Finalize the next cell.
    ///
    /// Returns [`Step::Visit`] for every dequeued cell, the start and end
    /// included, then [`Step::Done`] forever once the end was finalized, the
    /// frontier ran dry, or the search was cancelled.
    pub fn step(&mut self) -> Step {
        if self.status != Status::Running {
            return Step::Done(self.status);
        }

        let Some(ci) = self.frontier.next(&mut self.grid) else {
            self.finish(Status::Exhausted);
            return Step::Done(self.status);
        };

        self.visited += 1;
        if ci == self.end {
            self.finish(Status::Found);
        } else {
            self.frontier.expand(&mut self.grid, ci, self.end);
        }

        let bounds = self.grid.bounds();
        let event = SearchEvent {
            pos: bounds.pos(ci),
            index: ci,
            distance: self.grid.cell_at(ci).map_or(0, |c| c.distance),
            visited: self.visited,
            frontier: self.frontier.len(),
        };
        log::trace!(
            "{}: visit {} at distance {} ({} queued)",
            self.algorithm,
            event.pos,
            event.distance,
            event.frontier
        );
        Step::Visit(event)
    }

    /// Stop a running search. Finished searches are left as they are.
    pub fn cancel(&mut self) {
        if self.status == Status::Running {
            self.finish(Status::Cancelled);
        }
    }

    /// The terminal result, `None` while the search is still running.
    pub fn result(&self) -> Option<RunResult> {
        (self.status != Status::Running).then(|| self.build_result())
    }

    /// The path from start to end, once found.
    pub fn path(&self) -> Option<Vec<Pos>> {
        (self.status == Status::Found).then(|| self.reconstruct())
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        log::debug!(
            "{}: {status:?} after {} visited cells",
            self.algorithm,
            self.visited
        );
    }

    /// Result of the run as it stands; a still running search counts as
    /// cancelled.
    fn build_result(&self) -> RunResult {
        let outcome = match self.status {
            Status::Found => Outcome::Found {
                path: self.reconstruct(),
            },
            Status::Exhausted => Outcome::NoPath,
            Status::Running | Status::Cancelled => Outcome::Cancelled,
        };
        RunResult {
            algorithm: self.algorithm,
            outcome,
            visited: self.visited,
        }
    }

    /// Walk the back-pointers from end to start.
    fn reconstruct(&self) -> Vec<Pos> {
        let mut path = Vec::new();
        let mut cur = Some(self.end);
        while let Some(ci) = cur {
            let Some(cell) = self.grid.cell_at(ci) else {
                break;
            };
            path.push(cell.pos());
            if ci == self.start {
                break;
            }
            cur = cell.previous;
        }
        path.reverse();
        path
    }
}

impl Iterator for Search {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        match self.step() {
            Step::Visit(e) => Some(e),
            Step::Done(_) => None,
        }
    }
}

impl fmt::Debug for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("algorithm", &self.algorithm)
            .field("status", &self.status)
            .field("visited", &self.visited)
            .field("frontier", &self.frontier.len())
            .finish()
    }
}

/// Run `algorithm` over a snapshot of `grid` to completion.
///
/// `is_cancelled` is polled before every step and `on_event` receives each
/// visitation as it happens, so a caller can render incrementally. A
/// cancelled run returns [`Outcome::Cancelled`].
pub fn run_search(
    grid: &Grid,
    algorithm: Algorithm,
    mut on_event: impl FnMut(&SearchEvent),
    mut is_cancelled: impl FnMut() -> bool,
) -> RunResult {
    let mut search = Search::new(grid, algorithm);
    loop {
        if is_cancelled() {
            search.cancel();
            break;
        }
        match search.step() {
            Step::Visit(event) => on_event(&event),
            Step::Done(_) => break,
        }
    }
    search.build_result()
}

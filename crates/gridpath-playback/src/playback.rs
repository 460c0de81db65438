use std::time::Duration;

use gridpath_core::{CellKind, Grid, Pos};
use gridpath_search::{RunResult, Search, SearchEvent, Status, Step};
use thiserror::Error;

use crate::{CancelToken, PlaybackConfig, Scheduler};

/// Lifecycle of a [`Playback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl PlaybackState {
    /// Whether the playback reached a terminal state.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// What the driver should do after a [`Playback::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A frame was applied; wait this long before ticking again.
    Wait(Duration),
    /// Nothing more to apply.
    Finished(PlaybackState),
}

/// Counters surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackStats {
    /// Visitation events applied to the board so far.
    pub visited: usize,
    /// Cells on the traced path, start and end included. Only set once the
    /// trace completed.
    pub path_len: Option<usize>,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("playback already started (state {0:?})")]
    NotIdle(PlaybackState),
}

#[derive(Debug)]
enum Phase {
    Visiting,
    /// Painting the path between start and end, one cell per tick.
    Tracing { path: Vec<Pos>, next: usize },
    Done,
}

/// Replays a [`Search`] onto a render grid at a controlled pace.
///
/// Each [`tick`](Self::tick) applies at most one visitation event or one
/// path cell and reports how long to wait before the next one. The caller
/// decides how to wait: [`run`](Self::run) hands the delays to a
/// [`Scheduler`], a UI can feed them to its own timer.
#[derive(Debug)]
pub struct Playback {
    search: Search,
    config: PlaybackConfig,
    cancel: CancelToken,
    state: PlaybackState,
    phase: Phase,
    /// Cell currently painted as [`CellKind::Current`].
    current: Option<Pos>,
    applied: usize,
    path_len: Option<usize>,
    result: Option<RunResult>,
}

impl Playback {
    pub fn new(search: Search, config: PlaybackConfig, cancel: CancelToken) -> Self {
        Self {
            search,
            config,
            cancel,
            state: PlaybackState::Idle,
            phase: Phase::Visiting,
            current: None,
            applied: 0,
            path_len: None,
            result: None,
        }
    }

    /// Move from `Idle` to `Running`.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        if self.state != PlaybackState::Idle {
            return Err(PlaybackError::NotIdle(self.state));
        }
        self.state = PlaybackState::Running;
        log::debug!("playback of {} started", self.search.algorithm());
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> PlaybackConfig {
        self.config
    }

    /// A handle that stops this playback when cancelled.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn stats(&self) -> PlaybackStats {
        PlaybackStats {
            visited: self.applied,
            path_len: self.path_len,
        }
    }

    /// Outcome of the underlying search, once it terminated.
    pub fn result(&self) -> Option<&RunResult> {
        self.result.as_ref()
    }

    /// Apply the next frame to `grid`.
    ///
    /// Outside the `Running` state this does nothing and returns
    /// [`Tick::Finished`] with the current state. The cancel token is
    /// checked before anything is applied, so no mutation follows a
    /// cancellation request.
    pub fn tick(&mut self, grid: &mut Grid) -> Tick {
        if self.state != PlaybackState::Running {
            return Tick::Finished(self.state);
        }
        if self.cancel.is_cancelled() {
            self.search.cancel();
            if self.result.is_none() {
                self.result = self.search.result();
            }
            return self.finish(grid, PlaybackState::Cancelled);
        }

        if let Phase::Visiting = self.phase {
            match self.search.step() {
                Step::Visit(event) => {
                    self.apply(grid, &event);
                    return Tick::Wait(self.config.visit_delay());
                }
                Step::Done(Status::Found) => {
                    self.settle(grid);
                    self.result = self.search.result();
                    let path = self.search.path().unwrap_or_default();
                    let interior = if path.len() > 2 {
                        path[1..path.len() - 1].to_vec()
                    } else {
                        Vec::new()
                    };
                    self.phase = Phase::Tracing {
                        path: interior,
                        next: 0,
                    };
                }
                Step::Done(status) => {
                    self.result = self.search.result();
                    let state = if status == Status::Cancelled {
                        PlaybackState::Cancelled
                    } else {
                        PlaybackState::Completed
                    };
                    return self.finish(grid, state);
                }
            }
        }

        if let Phase::Tracing { path, next } = &mut self.phase {
            if let Some(&p) = path.get(*next) {
                *next += 1;
                grid.mark(p, CellKind::Path);
                return Tick::Wait(self.config.trace_delay());
            }
            self.path_len = Some(path.len() + 2);
        }
        self.finish(grid, PlaybackState::Completed)
    }

    /// Drive the playback to its end.
    ///
    /// Starts an idle playback, then ticks until finished. `on_frame` sees
    /// the grid after every applied frame and once more after the final
    /// tick; the scheduler absorbs the delays in between.
    pub fn run<S, F>(&mut self, grid: &mut Grid, mut scheduler: S, mut on_frame: F) -> PlaybackState
    where
        S: Scheduler,
        F: FnMut(&Grid),
    {
        match self.start() {
            Ok(()) => {}
            // Already started or finished: carry on from where it stands.
            Err(PlaybackError::NotIdle(_)) => {}
        }
        loop {
            match self.tick(grid) {
                Tick::Wait(delay) => {
                    on_frame(grid);
                    scheduler.sleep(delay);
                }
                Tick::Finished(state) => {
                    on_frame(grid);
                    return state;
                }
            }
        }
    }

    fn apply(&mut self, grid: &mut Grid, event: &SearchEvent) {
        self.settle(grid);
        if let Some(cell) = grid.cell_at_mut(event.index) {
            cell.visited = true;
            cell.distance = event.distance;
        }
        if grid.mark(event.pos, CellKind::Current) {
            self.current = Some(event.pos);
        }
        self.applied += 1;
    }

    /// Demote the lingering current cell to visited.
    fn settle(&mut self, grid: &mut Grid) {
        if let Some(p) = self.current.take() {
            grid.mark(p, CellKind::Visited);
        }
    }

    fn finish(&mut self, grid: &mut Grid, state: PlaybackState) -> Tick {
        self.settle(grid);
        self.phase = Phase::Done;
        self.state = state;
        log::debug!(
            "playback of {} {state:?}: {} visited, path {:?}",
            self.search.algorithm(),
            self.applied,
            self.path_len
        );
        Tick::Finished(state)
    }
}

use gridpath_core::{CellKind, Grid, GridError, Pos};
use gridpath_maze::MazeGen;
use gridpath_search::{Algorithm, RunResult, Search};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::{
    BoardConfig, CancelToken, Playback, PlaybackConfig, PlaybackError, PlaybackState,
    PlaybackStats, Scheduler, Tick,
};

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("a run is in progress")]
    RunActive,
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// The interactive board: the live grid plus at most one playback.
///
/// While a playback is running it is the only writer of the grid; every
/// edit made through the board is refused until it finishes or is
/// cancelled.
pub struct Board {
    grid: Grid,
    playback_config: PlaybackConfig,
    playback: Option<Playback>,
    maze: MazeGen<StdRng>,
}

impl Board {
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        let grid = Grid::new(config.rows, config.cols, config.start, config.end)?;
        Ok(Self::from_grid(grid, config.playback, config.maze_seed))
    }

    /// Wrap an existing grid, e.g. one parsed from text.
    pub fn from_grid(grid: Grid, playback_config: PlaybackConfig, maze_seed: Option<u64>) -> Self {
        let maze = match maze_seed {
            Some(seed) => MazeGen::seeded(seed),
            None => MazeGen::new(StdRng::from_os_rng()),
        };
        Self {
            grid,
            playback_config,
            playback: None,
            maze,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn playback_config(&self) -> PlaybackConfig {
        self.playback_config
    }

    pub fn state(&self) -> PlaybackState {
        self.playback
            .as_ref()
            .map_or(PlaybackState::Idle, Playback::state)
    }

    pub fn is_running(&self) -> bool {
        self.state() == PlaybackState::Running
    }

    fn ensure_idle(&self, op: &str) -> Result<(), BoardError> {
        if self.is_running() {
            log::warn!("{op} rejected: a run is in progress");
            return Err(BoardError::RunActive);
        }
        Ok(())
    }

    /// Flip a wall. Refused on markers, out of bounds, and while running.
    pub fn toggle_wall(&mut self, p: Pos) -> bool {
        self.ensure_idle("toggle_wall").is_ok() && self.grid.toggle_wall(p)
    }

    pub fn move_start(&mut self, p: Pos) -> bool {
        self.ensure_idle("move_start").is_ok() && self.grid.move_start(p)
    }

    pub fn move_end(&mut self, p: Pos) -> bool {
        self.ensure_idle("move_end").is_ok() && self.grid.move_end(p)
    }

    pub fn clear_path(&mut self) -> bool {
        if self.ensure_idle("clear_path").is_err() {
            return false;
        }
        self.grid.clear_path();
        true
    }

    pub fn clear_walls(&mut self) -> bool {
        if self.ensure_idle("clear_walls").is_err() {
            return false;
        }
        self.grid.clear_walls();
        true
    }

    /// Replace the board with a fresh maze keeping the same markers.
    pub fn generate_maze(&mut self) -> Result<(), BoardError> {
        self.ensure_idle("generate_maze")?;
        self.grid = self.maze.generate(&self.grid)?;
        log::debug!(
            "maze generated: {} walls on {}",
            self.grid.count(CellKind::Wall),
            self.grid.bounds()
        );
        Ok(())
    }

    /// Set the speed used by the next run, clamped to 0–100.
    pub fn set_speed(&mut self, speed: u8) -> bool {
        if self.ensure_idle("set_speed").is_err() {
            return false;
        }
        self.playback_config = self.playback_config.with_speed(speed);
        true
    }

    /// Clear earlier marks and start replaying `algorithm`.
    ///
    /// Refused with [`BoardError::RunActive`] while another run is
    /// `Running`; the running one is left untouched. The returned token
    /// cancels the new run.
    pub fn start_run(&mut self, algorithm: Algorithm) -> Result<CancelToken, BoardError> {
        self.ensure_idle("start_run")?;
        self.grid.clear_path();

        let token = CancelToken::new();
        let mut playback = Playback::new(
            Search::new(&self.grid, algorithm),
            self.playback_config,
            token.clone(),
        );
        playback.start()?;
        self.playback = Some(playback);
        Ok(token)
    }

    /// Apply the next frame of the active playback to the board.
    pub fn tick(&mut self) -> Tick {
        match self.playback.as_mut() {
            Some(pb) => pb.tick(&mut self.grid),
            None => Tick::Finished(PlaybackState::Idle),
        }
    }

    /// Drive the active playback to its end.
    pub fn run<S, F>(&mut self, scheduler: S, on_frame: F) -> PlaybackState
    where
        S: Scheduler,
        F: FnMut(&Grid),
    {
        match self.playback.as_mut() {
            Some(pb) => pb.run(&mut self.grid, scheduler, on_frame),
            None => PlaybackState::Idle,
        }
    }

    /// Request cancellation of the active playback. Returns whether one was
    /// running.
    pub fn cancel(&mut self) -> bool {
        match self.playback.as_ref() {
            Some(pb) if pb.state() == PlaybackState::Running => {
                pb.cancel_token().cancel();
                true
            }
            _ => false,
        }
    }

    pub fn stats(&self) -> PlaybackStats {
        self.playback
            .as_ref()
            .map(Playback::stats)
            .unwrap_or_default()
    }

    /// Result of the latest run, once its search terminated.
    pub fn last_result(&self) -> Option<&RunResult> {
        self.playback.as_ref().and_then(Playback::result)
    }
}

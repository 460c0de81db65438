//! Playback and board configuration.

use std::time::Duration;

use gridpath_core::{DEFAULT_COLS, DEFAULT_ROWS, Pos};

/// Highest accepted speed setting.
pub const MAX_SPEED: u8 = 100;

/// Pacing of a replay.
///
/// A single `speed` (0–100) drives the delay between visitation events for
/// every algorithm: `101 - speed` milliseconds. Tracing the found path uses
/// its own fixed `path_delay`, capped by the visit delay so the trace is
/// never slower than the search it follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaybackConfig {
    pub speed: u8,
    pub path_delay: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 50,
            path_delay: Duration::from_millis(25),
        }
    }
}

impl PlaybackConfig {
    /// Same config with `speed` clamped to [`MAX_SPEED`].
    pub fn with_speed(self, speed: u8) -> Self {
        Self {
            speed: speed.min(MAX_SPEED),
            ..self
        }
    }

    /// Delay after each visitation event.
    pub fn visit_delay(&self) -> Duration {
        let speed = u64::from(self.speed.min(MAX_SPEED));
        Duration::from_millis(101 - speed)
    }

    /// Delay after each traced path cell.
    pub fn trace_delay(&self) -> Duration {
        self.path_delay.min(self.visit_delay())
    }
}

/// Everything needed to set up a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Pos,
    pub end: Pos,
    /// Seed for maze generation; `None` draws one from the OS.
    pub maze_seed: Option<u64>,
    pub playback: PlaybackConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            start: Pos::new(10, 5),
            end: Pos::new(10, 35),
            maze_seed: None,
            playback: PlaybackConfig::default(),
        }
    }
}

//! Paced replay of grid searches and the interactive board around it.
//!
//! A [`Playback`] turns the visitation order of a
//! [`Search`](gridpath_search::Search) into frames on a live grid: each
//! visited cell briefly becomes the current cell, then settles as visited,
//! and a found path is traced cell by cell afterwards. Pacing is
//! cooperative. The playback never sleeps itself, it returns the delay to
//! its driver.
//!
//! [`Board`] is the facade an interface talks to. It owns the grid, refuses
//! edits while a run is active, and starts at most one run at a time.

mod board;
mod cancel;
mod config;
mod playback;
mod scheduler;

pub use board::{Board, BoardError};
pub use cancel::CancelToken;
pub use config::{BoardConfig, MAX_SPEED, PlaybackConfig};
pub use gridpath_search::Algorithm;
pub use playback::{Playback, PlaybackError, PlaybackState, PlaybackStats, Tick};
pub use scheduler::{Scheduler, ThreadScheduler};

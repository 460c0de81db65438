//! Step-wise grid search for the gridpath engine.
//!
//! Four traversal algorithms run over a snapshot of a
//! [`Grid`](gridpath_core::Grid):
//!
//! - **Dijkstra**: minimum-distance extraction, uniform edge weight 1
//! - **A\***: minimum `distance + Manhattan` extraction
//! - **BFS**: FIFO queue, shortest in hop count by level order
//! - **DFS**: LIFO stack, finds a path whenever one exists but not
//!   necessarily a shortest one
//!
//! A [`Search`] yields one [`SearchEvent`] per finalized cell so that a
//! caller can suspend between cells (to render, to sleep, to observe a
//! cancellation request). [`run_search`] drives a search to completion
//! through callbacks.
//!
//! # Tie-breaking
//!
//! Priority extraction is deterministic: Dijkstra orders by
//! `(distance, index)`, A* by `(total_cost, heuristic, index)`, where
//! `index` is the row-major cell index.

mod algorithm;
mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod event;
mod frontier;
mod search;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use event::{Outcome, RunResult, SearchEvent, Status, Step};
pub use gridpath_core::manhattan;
pub use search::{Search, run_search};

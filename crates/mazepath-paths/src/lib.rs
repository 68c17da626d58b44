//! Step-wise graph search over a [`mazepath_core::Grid`].
//!
//! Seven strategies share one engine, [`Search`]:
//!
//! | Strategy | Frontier | Ordering |
//! |---|---|---|
//! | [`Strategy::Bfs`] | FIFO queue | discovery order |
//! | [`Strategy::Dfs`] | stack | last pushed first, re-seeded from the start on dead ends |
//! | [`Strategy::Ucs`] | min-heap | accumulated cost |
//! | [`Strategy::AStar`] | min-heap | accumulated cost + heuristic |
//! | [`Strategy::Greedy`] | min-heap | heuristic only |
//!
//! A* and greedy search take a [`Heuristic`] (Manhattan or Euclidean).
//! Every step pops one frontier entry, so a renderer can redraw the grid in
//! between. On success the [`Path`] is rebuilt from parent links by
//! [`reconstruct_path`].

mod distance;
mod error;
mod frontier;
mod path;
mod search;
mod strategy;

pub use distance::{euclidean, manhattan};
pub use error::SearchError;
pub use path::{Path, reconstruct_path};
pub use search::{Search, SearchResult, Status, UNREACHED, run_strategy, run_strategy_with};
pub use strategy::{Heuristic, SearchOptions, Strategy};

//! Strategy selection and per-run options.

use std::fmt;
use std::str::FromStr;

use mazepath_core::Point;

use crate::distance::{euclidean, manhattan};
use crate::error::SearchError;

/// Distance estimate used by A* and greedy best-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    Manhattan,
    Euclidean,
}

impl Heuristic {
    /// Estimated distance from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> f64 {
        match self {
            Self::Manhattan => f64::from(manhattan(from, to)),
            Self::Euclidean => euclidean(from, to),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
        }
    }
}

/// A traversal strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Breadth-first search over a FIFO queue.
    Bfs,
    /// Depth-first search over a stack, re-seeding from the start on dead ends.
    Dfs,
    /// Uniform-cost search keyed by accumulated cost.
    Ucs,
    /// A* keyed by accumulated cost plus heuristic.
    AStar(Heuristic),
    /// Greedy best-first keyed by heuristic only.
    Greedy(Heuristic),
}

impl Strategy {
    /// Every strategy, in menu order.
    pub const ALL: [Strategy; 7] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Ucs,
        Strategy::AStar(Heuristic::Manhattan),
        Strategy::AStar(Heuristic::Euclidean),
        Strategy::Greedy(Heuristic::Manhattan),
        Strategy::Greedy(Heuristic::Euclidean),
    ];

    /// Stable lowercase name, accepted back by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Ucs => "ucs",
            Self::AStar(Heuristic::Manhattan) => "astar-manhattan",
            Self::AStar(Heuristic::Euclidean) => "astar-euclidean",
            Self::Greedy(Heuristic::Manhattan) => "greedy-manhattan",
            Self::Greedy(Heuristic::Euclidean) => "greedy-euclidean",
        }
    }

    /// The heuristic this strategy consults, if any.
    pub fn heuristic(self) -> Option<Heuristic> {
        match self {
            Self::AStar(h) | Self::Greedy(h) => Some(h),
            Self::Bfs | Self::Dfs | Self::Ucs => None,
        }
    }

    /// Whether the strategy tracks accumulated cost and relaxes on
    /// improvement.
    pub fn relaxes(self) -> bool {
        matches!(self, Self::Ucs | Self::AStar(_))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|st| st.name() == key)
            .ok_or_else(|| SearchError::UnknownStrategy(s.to_string()))
    }
}

/// Options shared by all strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    /// Charge each cell's own cost on entry. When false every move costs 1.
    pub use_cell_costs: bool,
    /// Add the entered cell's cost to its heuristic estimate (A* and greedy).
    /// The resulting heuristic is no longer admissible.
    pub heuristic_includes_cost: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            use_cell_costs: true,
            heuristic_includes_cost: false,
        }
    }
}

impl SearchOptions {
    /// Options that ignore cell costs: every move costs 1.
    pub fn unit_cost() -> Self {
        Self {
            use_cell_costs: false,
            ..Self::default()
        }
    }

    /// Builder: toggle adding the cell cost to the heuristic.
    pub fn with_heuristic_cost(mut self, on: bool) -> Self {
        self.heuristic_includes_cost = on;
        self
    }

    /// Cost of entering a cell whose own cost is `cell_cost`.
    #[inline]
    pub fn step_cost(&self, cell_cost: u32) -> u64 {
        if self.use_cell_costs {
            u64::from(cell_cost)
        } else {
            1
        }
    }
}

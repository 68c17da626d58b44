//! The [`Cell`] type — one node of the search grid.

use crate::geom::Point;

/// Movement cost of a freshly built cell.
pub const DEFAULT_COST: u32 = 1;

/// A single grid cell.
///
/// Role flags (start, wall, target) and the cost are owned by the
/// [`Grid`](crate::Grid), which keeps them consistent. Traversal state
/// (queued, visited, parent, heuristic) is written by search engines and
/// cleared by [`Grid::reset_traversal_state`](crate::Grid::reset_traversal_state).
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pos: Point,
    start: bool,
    wall: bool,
    target: bool,
    queued: bool,
    visited: bool,
    cost: u32,
    heuristic: f64,
    parent: Option<Point>,
    neighbors: Vec<Point>,
}

impl Cell {
    pub(crate) fn new(pos: Point, neighbors: Vec<Point>) -> Self {
        Self {
            pos,
            start: false,
            wall: false,
            target: false,
            queued: false,
            visited: false,
            cost: DEFAULT_COST,
            heuristic: f64::INFINITY,
            parent: None,
            neighbors,
        }
    }

    /// Grid coordinates `(column, row)` of this cell.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.start
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.wall
    }

    #[inline]
    pub fn is_target(&self) -> bool {
        self.target
    }

    /// Whether the cell can be entered.
    #[inline]
    pub fn is_open(&self) -> bool {
        !self.wall
    }

    /// Whether the cell has been inserted into a frontier during the current
    /// traversal.
    #[inline]
    pub fn is_queued(&self) -> bool {
        self.queued
    }

    /// Whether the cell has been expanded during the current traversal.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Cost of entering this cell. Always at least 1.
    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Best heuristic estimate recorded for this cell during the current
    /// traversal, `f64::INFINITY` if none.
    #[inline]
    pub fn heuristic(&self) -> f64 {
        self.heuristic
    }

    /// The cell this one was reached from, if any.
    #[inline]
    pub fn parent(&self) -> Option<Point> {
        self.parent
    }

    /// In-bounds cardinal neighbours, wired once at grid construction in
    /// left, right, up, down order.
    #[inline]
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }

    // --- traversal state ---

    #[inline]
    pub fn mark_queued(&mut self) {
        self.queued = true;
    }

    #[inline]
    pub fn mark_visited(&mut self) {
        self.visited = true;
    }

    #[inline]
    pub fn set_parent(&mut self, parent: Point) {
        self.parent = Some(parent);
    }

    /// Record a heuristic estimate, keeping the smallest seen.
    #[inline]
    pub fn record_heuristic(&mut self, h: f64) {
        if h < self.heuristic {
            self.heuristic = h;
        }
    }

    pub(crate) fn reset_traversal(&mut self) {
        self.queued = false;
        self.visited = false;
        self.heuristic = f64::INFINITY;
        self.parent = None;
    }

    // --- roles (grid-managed) ---

    pub(crate) fn set_start(&mut self, on: bool) {
        self.start = on;
    }

    pub(crate) fn set_target(&mut self, on: bool) {
        self.target = on;
    }

    pub(crate) fn set_wall(&mut self, on: bool) {
        self.wall = on;
    }

    pub(crate) fn set_cost(&mut self, cost: u32) {
        debug_assert!(cost >= 1);
        self.cost = cost;
    }

    pub(crate) fn reset_all(&mut self) {
        self.reset_traversal();
        self.start = false;
        self.wall = false;
        self.target = false;
        self.cost = DEFAULT_COST;
    }
}

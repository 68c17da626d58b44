//! The search [`Grid`]: an owned, row-major collection of [`Cell`]s with
//! 4-connected neighbour wiring.

use std::ops::{Index, IndexMut};

use crate::cell::Cell;
use crate::config::GridConfig;
use crate::error::GridError;
use crate::geom::{Point, Range};

/// Neighbour offsets, in wiring order: left, right, up, down.
const DIRS: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
];

/// A fixed-size 2D grid of cells.
///
/// The grid owns every cell and keeps the role invariants: at most one
/// start and one target, never on a wall, and never on the same cell.
#[derive(Clone, Debug)]
pub struct Grid {
    config: GridConfig,
    bounds: Range,
    cells: Vec<Cell>,
    start: Option<Point>,
    target: Option<Point>,
}

impl Grid {
    /// Build a `columns` x `rows` grid whose border is walled.
    pub fn new(columns: i32, rows: i32) -> Result<Self, GridError> {
        Self::with_config(GridConfig::new(columns, rows))
    }

    /// Build a grid from a [`GridConfig`].
    pub fn with_config(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let bounds = Range::new(0, 0, config.columns, config.rows);
        let cells = bounds
            .iter()
            .map(|p| {
                let neighbors = DIRS
                    .iter()
                    .map(|&d| p + d)
                    .filter(|&n| bounds.contains(n))
                    .collect();
                Cell::new(p, neighbors)
            })
            .collect();
        let mut grid = Self {
            config,
            bounds,
            cells,
            start: None,
            target: None,
        };
        grid.apply_border();
        Ok(grid)
    }

    fn apply_border(&mut self) {
        if !self.config.border_walls {
            return;
        }
        let bounds = self.bounds;
        for cell in self.cells.iter_mut() {
            if bounds.on_edge(cell.pos()) {
                cell.set_wall(true);
            }
        }
    }

    #[inline]
    pub fn columns(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    /// The range of valid coordinates.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: grids are never built empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// Point for a flat index produced by [`index`](Self::index).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.bounds.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Mutable access for traversal-state updates. Roles and costs go
    /// through the grid's own setters.
    #[inline]
    pub fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        let i = self.index(p)?;
        Some(&mut self.cells[i])
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.cell(p).is_some_and(Cell::is_open)
    }

    /// Whether `p` lies on the outer ring of the grid.
    #[inline]
    pub fn is_border(&self, p: Point) -> bool {
        self.bounds.on_edge(p)
    }

    /// Number of non-wall cells.
    pub fn count_open(&self) -> usize {
        self.cells.iter().filter(|c| c.is_open()).count()
    }

    /// Fail unless `p` is inside the grid and not a wall.
    pub fn check_open(&self, p: Point) -> Result<(), GridError> {
        match self.cell(p) {
            None => Err(GridError::OutOfBounds(p)),
            Some(c) if c.is_wall() => Err(GridError::Wall(p)),
            Some(_) => Ok(()),
        }
    }

    // -----------------------------------------------------------------------
    // Roles
    // -----------------------------------------------------------------------

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn target(&self) -> Option<Point> {
        self.target
    }

    /// Both endpoints, validated as set and open.
    pub fn endpoints(&self) -> Result<(Point, Point), GridError> {
        let start = self.start.ok_or(GridError::MissingStart)?;
        let target = self.target.ok_or(GridError::MissingTarget)?;
        self.check_open(start)?;
        self.check_open(target)?;
        Ok((start, target))
    }

    /// Make `p` the start cell, moving the role off any previous start.
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        self.check_open(p)?;
        if self.target == Some(p) {
            return Err(GridError::Reserved(p));
        }
        self.clear_start();
        let i = self.index_unchecked(p);
        self.cells[i].set_start(true);
        self.start = Some(p);
        Ok(())
    }

    /// Make `p` the target cell, moving the role off any previous target.
    pub fn set_target(&mut self, p: Point) -> Result<(), GridError> {
        self.check_open(p)?;
        if self.start == Some(p) {
            return Err(GridError::Reserved(p));
        }
        self.clear_target();
        let i = self.index_unchecked(p);
        self.cells[i].set_target(true);
        self.target = Some(p);
        Ok(())
    }

    pub fn clear_start(&mut self) {
        if let Some(p) = self.start.take() {
            let i = self.index_unchecked(p);
            self.cells[i].set_start(false);
        }
    }

    pub fn clear_target(&mut self) {
        if let Some(p) = self.target.take() {
            let i = self.index_unchecked(p);
            self.cells[i].set_target(false);
        }
    }

    /// Paint or erase a wall. The start and target cells cannot be walled.
    pub fn set_wall(&mut self, p: Point, on: bool) -> Result<(), GridError> {
        let i = self.index(p).ok_or(GridError::OutOfBounds(p))?;
        if on && (self.start == Some(p) || self.target == Some(p)) {
            return Err(GridError::Reserved(p));
        }
        self.cells[i].set_wall(on);
        Ok(())
    }

    /// Set the entry cost of `p`. Costs start at 1 and must stay >= 1.
    pub fn set_cost(&mut self, p: Point, cost: u32) -> Result<(), GridError> {
        let i = self.index(p).ok_or(GridError::OutOfBounds(p))?;
        if cost == 0 {
            return Err(GridError::InvalidCost(cost));
        }
        self.cells[i].set_cost(cost);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Resets
    // -----------------------------------------------------------------------

    /// Return every cell to its freshly-built state: roles, walls, costs and
    /// traversal state are cleared, then the border policy is re-applied.
    pub fn reset_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset_all();
        }
        self.start = None;
        self.target = None;
        self.apply_border();
    }

    /// Clear queued/visited/parent/heuristic on every cell, keeping walls,
    /// costs, start and target.
    pub fn reset_traversal_state(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset_traversal();
        }
    }

    #[inline]
    fn index_unchecked(&self, p: Point) -> usize {
        (p.y * self.bounds.width() + p.x) as usize
    }
}

impl Index<Point> for Grid {
    type Output = Cell;

    /// Panics if `p` is outside the grid.
    #[inline]
    fn index(&self, p: Point) -> &Cell {
        match self.index(p) {
            Some(i) => &self.cells[i],
            None => panic!("point {p} outside grid {}", self.bounds),
        }
    }
}

impl IndexMut<Point> for Grid {
    #[inline]
    fn index_mut(&mut self, p: Point) -> &mut Cell {
        match self.index(p) {
            Some(i) => &mut self.cells[i],
            None => panic!("point {p} outside grid {}", self.bounds),
        }
    }
}

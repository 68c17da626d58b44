//! Recursive-backtracker maze carving.
//!
//! The maze lives on the interior of the grid (everything but the outer
//! ring). Cells with odd coordinates are rooms; carving opens a room and the
//! wall cell between it and the room it was reached from, so the open cells
//! always form a spanning tree of the rooms: exactly one route between any
//! two open cells.

use log::debug;
use mazepath_core::{Grid, GridError, Point};
use rand::Rng;
use rand::seq::SliceRandom;

/// Two-cell moves between rooms: up, right, down, left.
const STEPS: [Point; 4] = [
    Point::new(0, -2),
    Point::new(2, 0),
    Point::new(0, 2),
    Point::new(-2, 0),
];

/// Where carving starts.
pub const MAZE_ORIGIN: Point = Point::new(1, 1);

/// One level of the carving recursion, kept on an explicit stack.
struct Frame {
    at: Point,
    dirs: [Point; 4],
    next: usize,
}

/// Generator for grid contents, driven by a caller-supplied random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Carve a perfect maze into `grid`.
    ///
    /// Every interior cell is walled, then rooms are opened depth-first from
    /// [`MAZE_ORIGIN`], visiting the four directions of each room in a freshly
    /// shuffled order. Border cells and costs are left alone.
    ///
    /// A start or target role survives only if its cell ends up open. A
    /// role on a cell the maze walls over is cleared, since no role may sit
    /// on a wall, and the caller must set it again afterwards (check
    /// [`Grid::start`] and [`Grid::target`]).
    ///
    /// Returns the number of open interior cells. Grids smaller than 3x3
    /// have no interior and are rejected.
    pub fn generate_maze(&mut self, grid: &mut Grid) -> Result<usize, GridError> {
        let interior = grid.bounds().shift(1, 1, -1, -1);
        if !interior.contains(MAZE_ORIGIN) {
            return Err(GridError::InvalidDimensions {
                columns: grid.columns(),
                rows: grid.rows(),
            });
        }

        let start = grid.start();
        let target = grid.target();
        grid.clear_start();
        grid.clear_target();
        for p in interior {
            grid.set_wall(p, true)?;
        }

        grid.set_wall(MAZE_ORIGIN, false)?;
        let mut open = 1;
        let mut stack = vec![self.frame(MAZE_ORIGIN)];
        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.dirs.len() {
                stack.pop();
                continue;
            }
            let d = frame.dirs[frame.next];
            frame.next += 1;
            let at = frame.at;

            let dest = at + d;
            if !interior.contains(dest) || !grid[dest].is_wall() {
                continue;
            }
            grid.set_wall(at + Point::new(d.x / 2, d.y / 2), false)?;
            grid.set_wall(dest, false)?;
            open += 2;
            stack.push(self.frame(dest));
        }

        if let Some(p) = start {
            if grid.is_open(p) {
                grid.set_start(p)?;
            } else {
                debug!("maze walled over start {p}");
            }
        }
        if let Some(p) = target {
            if grid.is_open(p) {
                grid.set_target(p)?;
            } else {
                debug!("maze walled over target {p}");
            }
        }
        debug!(
            "carved {}x{} maze with {open} open cells",
            grid.columns(),
            grid.rows()
        );
        Ok(open)
    }

    fn frame(&mut self, at: Point) -> Frame {
        let mut dirs = STEPS;
        dirs.shuffle(&mut self.rng);
        Frame { at, dirs, next: 0 }
    }
}

//! Random cell-cost assignment.

use log::debug;
use mazepath_core::{Cell, Grid, GridError, Point};
use rand::{Rng, RngExt};

use crate::maze::MazeGen;

/// Lower bound of the default random cost range.
pub const DEFAULT_MIN_COST: u32 = 1;
/// Upper bound of the default random cost range.
pub const DEFAULT_MAX_COST: u32 = 1000;

impl<R: Rng> MazeGen<R> {
    /// Give every open cell that is neither start nor target a cost drawn
    /// uniformly from `min..=max`.
    ///
    /// Requires `1 <= min <= max`. Returns the number of cells changed.
    pub fn assign_random_costs(
        &mut self,
        grid: &mut Grid,
        min: u32,
        max: u32,
    ) -> Result<usize, GridError> {
        if min == 0 || min > max {
            return Err(GridError::InvalidCostRange { min, max });
        }
        let eligible: Vec<Point> = grid
            .cells()
            .filter(|c| c.is_open() && !c.is_start() && !c.is_target())
            .map(Cell::pos)
            .collect();
        for &p in &eligible {
            grid.set_cost(p, self.rng.random_range(min..=max))?;
        }
        debug!("assigned costs in {min}..={max} to {} cells", eligible.len());
        Ok(eligible.len())
    }
}

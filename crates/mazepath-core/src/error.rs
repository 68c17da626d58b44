use thiserror::Error;

use crate::geom::Point;

/// Configuration errors: a grid or a run request that is rejected before
/// any traversal step happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {columns}x{rows}")]
    InvalidDimensions { columns: i32, rows: i32 },
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Point),
    #[error("cell {0} is a wall")]
    Wall(Point),
    /// The cell already holds the start or target role.
    #[error("cell {0} is reserved for the start or target")]
    Reserved(Point),
    #[error("cell cost must be at least 1, got {0}")]
    InvalidCost(u32),
    #[error("invalid cost range {min}..={max}")]
    InvalidCostRange { min: u32, max: u32 },
    #[error("no start cell set")]
    MissingStart,
    #[error("no target cell set")]
    MissingTarget,
}

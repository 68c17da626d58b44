//! Grid construction settings.

use crate::error::GridError;

/// Settings used to build a [`Grid`](crate::Grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Number of columns (cells along X).
    pub columns: i32,
    /// Number of rows (cells along Y).
    pub rows: i32,
    /// Whether the outermost ring of cells starts out (and resets to) walls.
    pub border_walls: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 40,
            rows: 40,
            border_walls: true,
        }
    }
}

impl GridConfig {
    /// Config for a `columns` x `rows` grid with border walls.
    pub fn new(columns: i32, rows: i32) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Builder: toggle the border wall policy.
    pub fn with_border_walls(mut self, on: bool) -> Self {
        self.border_walls = on;
        self
    }

    /// Reject empty or negative dimensions.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.columns <= 0 || self.rows <= 0 {
            return Err(GridError::InvalidDimensions {
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

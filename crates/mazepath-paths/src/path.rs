//! The reconstructed [`Path`] and the parent-link walk that builds it.

use std::collections::HashSet;

use log::warn;
use mazepath_core::{Grid, Point};

use crate::error::SearchError;

/// Cells strictly between start and target, in the order they were walked
/// (target side first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Point>,
    members: HashSet<Point>,
}

impl Path {
    fn from_walk(cells: Vec<Point>) -> Self {
        let members = cells.iter().copied().collect();
        Self { cells, members }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is on the path.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.members.contains(&p)
    }

    /// Cells in walk order: from next-to-target back to next-to-start.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Point> + '_ {
        self.cells.iter().copied()
    }

    /// Cells in travel order: from next-to-start to next-to-target.
    pub fn forward(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().rev().copied()
    }

    /// Cells in walk order as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.cells
    }
}

/// Walk parent links from `target` back to `start`.
///
/// The returned [`Path`] excludes both endpoints. `start == target` gives an
/// empty path. A missing parent before `start` is reached, or a chain longer
/// than the grid, yields [`SearchError::BrokenChain`].
pub fn reconstruct_path(grid: &Grid, start: Point, target: Point) -> Result<Path, SearchError> {
    if start == target {
        return Ok(Path::default());
    }
    let mut walk = Vec::new();
    let mut cur = target;
    loop {
        let parent = grid.cell(cur).and_then(|c| c.parent());
        let Some(parent) = parent else {
            warn!("parent chain from {target} to {start} breaks at {cur}");
            return Err(SearchError::BrokenChain(cur));
        };
        if parent == start {
            break;
        }
        if walk.len() >= grid.len() {
            warn!("parent chain from {target} to {start} cycles through {parent}");
            return Err(SearchError::BrokenChain(parent));
        }
        walk.push(parent);
        cur = parent;
    }
    Ok(Path::from_walk(walk))
}

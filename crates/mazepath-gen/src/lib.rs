//! Grid content generators for mazepath: perfect mazes and random cell costs.

pub mod costs;
pub mod maze;

pub use costs::{DEFAULT_MAX_COST, DEFAULT_MIN_COST};
pub use maze::{MAZE_ORIGIN, MazeGen};

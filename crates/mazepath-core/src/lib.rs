//! **mazepath-core** — grid model for step-wise path search.
//!
//! This crate provides the foundational types used across the *mazepath*
//! workspace: geometry primitives, the [`Cell`] node with its role and
//! traversal flags, and the [`Grid`] that owns and wires the cells.

pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, DEFAULT_COST};
pub use config::GridConfig;
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::Grid;

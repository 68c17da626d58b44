use thiserror::Error;

use mazepath_core::{GridError, Point};

/// Errors raised by the traversal engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The grid or the requested endpoints are unusable; nothing ran.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] GridError),
    #[error("unknown strategy {0:?}")]
    UnknownStrategy(String),
    /// A parent link was missing while walking back from the target.
    /// Signals an engine bug, not an unreachable target.
    #[error("broken parent chain at {0}")]
    BrokenChain(Point),
}

impl SearchError {
    /// Whether the error reports an internal-consistency fault rather than
    /// bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::BrokenChain(_))
    }
}

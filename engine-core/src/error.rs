//! Error types shared by every engine
//!
//! Gameplay operations are total and never fail: illegal moves are ignored.
//! Errors only come out of construction, when a configuration cannot describe
//! a playable board.

/// Error type for building a grid from nested rows
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Grid must have at least one row and one column")]
    Empty,
    #[error("Row {row} has {actual} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, actual: usize },
    #[error("A {width}x{height} grid cannot hold {cells} cells")]
    Size { width: usize, height: usize, cells: usize },
}

/// Error type for engine configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Board dimensions must be non-zero, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("Invalid grid: {0}")]
    Grid(#[from] GridError),
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field, reason: reason.into() }
    }
}

// error.rs - Error type shared by the generator, the pathfinder and maze loading

use std::fmt;

use thiserror::Error;

use crate::grid::{Position, MIN_DIMENSION};

/// Why a position was rejected by a path query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionFault {
    OutOfBounds,
    Blocked,
}

impl fmt::Display for PositionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionFault::OutOfBounds => f.write_str("outside the grid"),
            PositionFault::Blocked => f.write_str("a blocked cell"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze dimensions {width}x{height}: both sides must be at least {}", MIN_DIMENSION)]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid position {position}: {fault}")]
    InvalidPosition {
        position: Position,
        fault: PositionFault,
    },

    /// No passage chain joins the two cells. Generated mazes are spanning
    /// trees, so seeing this means the maze is internally inconsistent.
    #[error("No path from {from} to {to}")]
    Unreachable { from: Position, to: Position },

    #[error("Invalid maze data: {reason}")]
    InvalidMazeData { reason: String },
}

impl MazeError {
    pub(crate) fn invalid_data(reason: impl Into<String>) -> Self {
        MazeError::InvalidMazeData {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_values() {
        let err = MazeError::InvalidDimensions { width: 1, height: 5 };
        assert_eq!(
            err.to_string(),
            "Invalid maze dimensions 1x5: both sides must be at least 2"
        );

        let err = MazeError::InvalidPosition {
            position: Position::new(3, 9),
            fault: PositionFault::OutOfBounds,
        };
        assert_eq!(err.to_string(), "Invalid position (3, 9): outside the grid");

        let err = MazeError::Unreachable {
            from: Position::new(0, 0),
            to: Position::new(1, 1),
        };
        assert_eq!(err.to_string(), "No path from (0, 0) to (1, 1)");
    }
}

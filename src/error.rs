//! Error types shared by the engine and the move selectors.

use thiserror::Error;

use crate::position::{Color, Location};

/// Errors raised when a caller breaks a move precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Coordinate outside the 8x8 board
    #[error("({row}, {col}) is not on the board")]
    OutOfBounds { row: isize, col: isize },

    /// Destination is occupied or captures nothing
    #[error("{0} cannot be played here")]
    IllegalMove(Location),

    /// A move was requested for a side that has none
    #[error("{0} has no legal moves")]
    NoLegalMoves(Color),

    /// Move string is not a letter a-h followed by a digit 1-8
    #[error("invalid coordinate {0:?}, expected a square like \"g6\"")]
    InvalidCoord(String),
}

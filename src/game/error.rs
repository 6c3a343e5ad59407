use thiserror::Error;

use super::state::Position;

/// Reasons a board setup is refused.
///
/// A refused setup leaves the engine and its published snapshot untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("board must have at least one row and one column (got {rows}x{cols})")]
    EmptyBoard { rows: usize, cols: usize },

    #[error("a {rows}x{cols} board is too large")]
    BoardTooLarge { rows: usize, cols: usize },

    #[error("starting length must be at least 1")]
    ZeroLength,

    #[error("a snake of length {length} heading {direction:?} does not fit on a {rows}x{cols} board")]
    SnakeOutOfBounds {
        length: usize,
        direction: super::Direction,
        rows: usize,
        cols: usize,
    },

    #[error("layout has no snake")]
    EmptySnake,

    #[error("{0:?} lies outside the board")]
    OutOfBounds(Position),

    #[error("{0:?} is occupied twice")]
    Overlap(Position),

    #[error("snake segments {0:?} and {1:?} are not adjacent")]
    Detached(Position, Position),
}

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when a command name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown command: {name:?}")]
pub struct ParseCommandError {
    pub name: String,
}

/// Error returned when a shape letter cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown shape: {name:?} (expected one of I, O, T, S, Z, J, L)")]
pub struct ParseShapeError {
    pub name: String,
}

/// Error returned when a textual grid (board or piece matrix) is malformed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    #[display("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[display("row {row}: expected {expected} cells, got {actual}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("row {row}: invalid cell {cell:?} (expected '#' or '.')")]
    InvalidCell { row: usize, cell: char },
}

/// Error returned when a deserialized game state breaks the engine's
/// invariants.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidStateError {
    #[display("active piece overlaps the board or a wall while the game is running")]
    ActivePieceCollides,
    #[display("game is marked over but the active piece fits on the board")]
    GameOverWithoutCollision,
    #[display("row {row} is complete and should have been cleared")]
    CompleteRow { row: usize },
    #[display("score {score} does not match {cleared_lines} cleared lines")]
    ScoreMismatch { score: usize, cleared_lines: usize },
}

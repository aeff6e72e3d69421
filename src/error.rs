//! Error type shared by the board model, the move generator and the solver.

use crate::engine::{Move, Pos};
use thiserror::Error;

/// Errors raised by board operations.
///
/// A search that runs out of time is not an error; it is reported through
/// [`crate::solver::SearchStatus::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A position lies outside the grid.
    #[error("position ({row}, {col}) lies outside the 7x7 grid")]
    OutOfRange { row: usize, col: usize },

    /// An operation would break a structural invariant of the board, such as
    /// writing to an off-board cell or solving with a mismatched topology.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A jump that the current board and topology do not allow.
    #[error("illegal move {0}")]
    IllegalMove(Move),

    /// Two positions that are not a jump apart.
    #[error("no jump leads from {from:?} to {to:?}")]
    NotAJump { from: Pos, to: Pos },

    #[error("unknown layout '{0}'")]
    UnknownLayout(String),

    #[error("unknown topology '{0}'")]
    UnknownTopology(String),

    /// Malformed text board.
    #[error("{0}")]
    Parse(String),

    /// A configuration value outside its permitted range.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

//! Errors used throughout the position core.
//!
//! Two error families exist:
//! - [`IllegalMove`] is the explicit rejection returned by `apply_move` (and
//!   named by `check_move`). A rejected move leaves the state untouched.
//! - [`ChessErrors`] covers position import/export, coordinate parsing and
//!   misuse of the apply/revert stack.
//!
//! Transposition-table collisions are never errors; they are plain misses.

use crate::game_state::chess_types::Square;
use crate::moves::move_descriptions::Move;

/// Why a candidate move was refused by the legality checker.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    /// Flags 6 and 7 are not assigned to any move type.
    #[error("move {0} uses a reserved flag pattern")]
    ReservedFlags(Move),

    #[error("no piece on origin square of {0}")]
    EmptyOrigin(Move),

    #[error("piece moved by {0} does not belong to the side to move")]
    NotSideToMove(Move),

    #[error("destination of {0} holds a piece of the side to move")]
    OwnPieceOnTarget(Move),

    #[error("{0} is flagged as a capture but the destination is empty")]
    CaptureOnEmptySquare(Move),

    #[error("{0} lands on an occupied square without a capture flag")]
    UnflaggedCapture(Move),

    #[error("{0} would capture a king")]
    KingCapture(Move),

    #[error("en-passant capture {0} does not match the current target")]
    InvalidEnPassant(Move),

    /// The move does not follow the moving piece's movement pattern, or its
    /// flags do not fit the moving piece.
    #[error("{0} is not a pseudo-legal move in this position")]
    NotPseudoLegal(Move),

    #[error("castling right for {0} has been lost")]
    CastlingRightLost(Move),

    #[error("pieces stand between king and rook for {0}")]
    CastlingPathBlocked(Move),

    #[error("king would castle out of, through or into check with {0}")]
    CastlingThroughCheck(Move),

    #[error("{0} leaves the own king attacked")]
    LeavesKingInCheck(Move),
}

/// Unified error type for parsing and state management.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraicString(String),

    #[error("square index out of bounds: {0}")]
    SquareOutOfBounds(Square),

    #[error("invalid long algebraic move: {0}")]
    InvalidLongAlgebraic(String),

    #[error(transparent)]
    Illegal(#[from] IllegalMove),

    /// `revert_move` was called with no applied move on the stack.
    #[error("no applied move to revert")]
    NothingToRevert,

    /// `revert_move` was called with a move other than the last one applied.
    #[error("revert of {requested} does not match last applied move {applied}")]
    RevertMismatch { requested: Move, applied: Move },

    /// Internal plane or hash invariant broken; indicates a bug.
    #[error("corrupted game state: {0}")]
    CorruptedState(String),
}

use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Snapshot pushed by `apply_move` and consumed by `revert_move`.
///
/// Rights, en-passant target and clocks cannot be rebuilt from the move
/// alone, so they are restored from here verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: PieceKind,
    pub captured_piece: Option<PieceKind>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    pub prev_zobrist_key: u64,
}

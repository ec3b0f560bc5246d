//! Canonical chess-rule constants.
//!
//! Static rule literals: the starting position, castling geometry, and the
//! per-square masks that strip castling rights when a king or rook leaves
//! (or a rook is captured on) its home square.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule can be claimed.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

pub const A1: Square = 0;
pub const B1: Square = 1;
pub const C1: Square = 2;
pub const D1: Square = 3;
pub const E1: Square = 4;
pub const F1: Square = 5;
pub const G1: Square = 6;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const B8: Square = 57;
pub const C8: Square = 58;
pub const D8: Square = 59;
pub const E8: Square = 60;
pub const F8: Square = 61;
pub const G8: Square = 62;
pub const H8: Square = 63;

/// Squares and rights involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook; must be empty.
    pub between: Bitboard,
    /// Squares the king stands on or crosses; must not be attacked.
    pub king_path: [Square; 3],
}

const fn geometry(
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    rook_to: Square,
    between: Bitboard,
    pass: Square,
) -> CastlingGeometry {
    CastlingGeometry {
        right,
        king_from,
        king_to,
        rook_from,
        rook_to,
        between,
        king_path: [king_from, pass, king_to],
    }
}

pub const WHITE_KINGSIDE: CastlingGeometry = geometry(
    CASTLE_WHITE_KINGSIDE,
    E1,
    G1,
    H1,
    F1,
    square_bb(F1) | square_bb(G1),
    F1,
);
pub const WHITE_QUEENSIDE: CastlingGeometry = geometry(
    CASTLE_WHITE_QUEENSIDE,
    E1,
    C1,
    A1,
    D1,
    square_bb(B1) | square_bb(C1) | square_bb(D1),
    D1,
);
pub const BLACK_KINGSIDE: CastlingGeometry = geometry(
    CASTLE_BLACK_KINGSIDE,
    E8,
    G8,
    H8,
    F8,
    square_bb(F8) | square_bb(G8),
    F8,
);
pub const BLACK_QUEENSIDE: CastlingGeometry = geometry(
    CASTLE_BLACK_QUEENSIDE,
    E8,
    C8,
    A8,
    D8,
    square_bb(B8) | square_bb(C8) | square_bb(D8),
    D8,
);

#[inline]
pub const fn castling_geometry(color: Color, kingside: bool) -> &'static CastlingGeometry {
    match (color, kingside) {
        (Color::White, true) => &WHITE_KINGSIDE,
        (Color::White, false) => &WHITE_QUEENSIDE,
        (Color::Black, true) => &BLACK_KINGSIDE,
        (Color::Black, false) => &BLACK_QUEENSIDE,
    }
}

/// `rights & mask[from] & mask[to]` is the rights after any move.
pub const CASTLING_RIGHTS_MASK: [CastlingRights; 64] = build_castling_rights_mask();

const fn build_castling_rights_mask() -> [CastlingRights; 64] {
    let mut table = [CASTLE_ALL; 64];
    table[A1 as usize] = CASTLE_ALL & !CASTLE_WHITE_QUEENSIDE;
    table[H1 as usize] = CASTLE_ALL & !CASTLE_WHITE_KINGSIDE;
    table[E1 as usize] = CASTLE_ALL & !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE);
    table[A8 as usize] = CASTLE_ALL & !CASTLE_BLACK_QUEENSIDE;
    table[H8 as usize] = CASTLE_ALL & !CASTLE_BLACK_KINGSIDE;
    table[E8 as usize] = CASTLE_ALL & !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    table
}

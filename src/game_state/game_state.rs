//! Core incremental board state representation.
//!
//! `GameState` stores one occupancy plane per color and one per piece kind,
//! the turn/rights flags, clocks, the incremental Zobrist key and the undo
//! stack used by `apply_move` / `revert_move`. It is built once and then
//! mutated in place by strictly nested apply/revert pairs.

use std::fmt;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::search::zobrist::compute_zobrist_key;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Bitboard planes ---
    pub(crate) color_bb: [Bitboard; 2],
    pub(crate) piece_bb: [Bitboard; 6],

    // --- Side and state flags ---
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,

    // --- Incremental hashing ---
    pub(crate) zobrist_key: u64,

    // --- Apply/revert stack ---
    pub(crate) undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            color_bb: [0; 2],
            piece_bb: [0; 6],

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,
            undo_stack: Vec::with_capacity(256),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    // --- Plane accessors ---

    #[inline]
    pub fn color_occupancy(&self, color: Color) -> Bitboard {
        self.color_bb[color.index()]
    }

    #[inline]
    pub fn piece_occupancy(&self, piece: PieceKind) -> Bitboard {
        self.piece_bb[piece.index()]
    }

    #[inline]
    pub fn pieces(&self, color: Color, piece: PieceKind) -> Bitboard {
        self.color_bb[color.index()] & self.piece_bb[piece.index()]
    }

    #[inline]
    pub fn occupancy(&self) -> Bitboard {
        self.color_bb[0] | self.color_bb[1]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    /// Number of moves currently applied on top of the imported position.
    #[inline]
    pub fn ply(&self) -> usize {
        self.undo_stack.len()
    }

    #[inline]
    pub fn last_undo(&self) -> Option<&UndoState> {
        self.undo_stack.last()
    }

    // --- Square queries ---

    #[inline]
    pub fn color_on(&self, square: Square) -> Option<Color> {
        let mask = square_bb(square);
        if self.color_bb[Color::White.index()] & mask != 0 {
            Some(Color::White)
        } else if self.color_bb[Color::Black.index()] & mask != 0 {
            Some(Color::Black)
        } else {
            None
        }
    }

    #[inline]
    pub fn piece_kind_on(&self, square: Square) -> Option<PieceKind> {
        let mask = square_bb(square);
        PieceKind::ALL
            .into_iter()
            .find(|piece| self.piece_bb[piece.index()] & mask != 0)
    }

    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        let color = self.color_on(square)?;
        let piece = self.piece_kind_on(square)?;
        Some((color, piece))
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.is_color_in_check(self.side_to_move)
    }

    pub fn is_color_in_check(&self, color: Color) -> bool {
        let Some(king_sq) = self.king_square(color) else {
            return false;
        };
        is_square_attacked(self, king_sq, color.opposite())
    }

    /// True once the halfmove clock allows a fifty-move claim.
    #[inline]
    pub fn fifty_move_rule_reached(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    /// Whether the current position already occurred earlier in the applied
    /// history. Only plies since the last irreversible move are scanned.
    pub fn is_repetition(&self) -> bool {
        let window = usize::from(self.halfmove_clock).min(self.undo_stack.len());
        self.undo_stack
            .iter()
            .rev()
            .take(window)
            .skip(1)
            .step_by(2)
            .any(|undo| undo.prev_zobrist_key == self.zobrist_key)
    }

    /// Checks every structural invariant of the planes and the hash.
    pub fn validate(&self) -> Result<(), ChessErrors> {
        let white = self.color_bb[Color::White.index()];
        let black = self.color_bb[Color::Black.index()];
        if white & black != 0 {
            return Err(ChessErrors::CorruptedState(
                "color planes overlap".to_owned(),
            ));
        }

        let mut union = 0u64;
        for (i, plane) in self.piece_bb.iter().enumerate() {
            if union & plane != 0 {
                return Err(ChessErrors::CorruptedState(format!(
                    "piece plane {i} overlaps another piece plane"
                )));
            }
            union |= plane;
        }
        if union != white | black {
            return Err(ChessErrors::CorruptedState(
                "piece planes disagree with color planes".to_owned(),
            ));
        }

        if self.zobrist_key != compute_zobrist_key(self) {
            return Err(ChessErrors::CorruptedState(
                "incremental zobrist key drifted from recomputation".to_owned(),
            ));
        }

        Ok(())
    }

    /// Drop a piece on an empty square during position setup.
    pub(crate) fn put_piece(&mut self, color: Color, piece: PieceKind, square: Square) {
        let mask = square_bb(square);
        self.color_bb[color.index()] |= mask;
        self.piece_bb[piece.index()] |= mask;
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", render_game_state(self))?;
        write!(f, "{}", self.to_fen())
    }
}

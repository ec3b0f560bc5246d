//! Long algebraic (`e2e4`, `e7e8q`) to flagged `Move` conversion.
//!
//! The coordinates alone do not carry capture, double-push, en-passant or
//! castle information; those flags are inferred from the position. The
//! result is not checked for legality, `apply_move` does that.

use crate::chess_errors::ChessErrors;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn long_algebraic_to_move(long_algebraic: &str, game_state: &GameState) -> Result<Move, ChessErrors> {
    let invalid = || ChessErrors::InvalidLongAlgebraic(long_algebraic.to_owned());

    if !long_algebraic.is_ascii() || !(4..=5).contains(&long_algebraic.len()) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&long_algebraic[0..2])?;
    let to = algebraic_to_square(&long_algebraic[2..4])?;
    let promotion = match long_algebraic.as_bytes().get(4) {
        None => None,
        Some(b'n') => Some(PieceKind::Knight),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'q') => Some(PieceKind::Queen),
        Some(_) => return Err(invalid()),
    };

    let Some((_, moved_piece)) = game_state.piece_on(from) else {
        return Err(invalid());
    };
    let capture = game_state.color_on(to).is_some();

    let flags = match moved_piece {
        PieceKind::Pawn => {
            let last_rank = match game_state.side_to_move() {
                Color::White => 7,
                Color::Black => 0,
            };
            if (rank_of(to) == last_rank) != promotion.is_some() {
                return Err(invalid());
            }

            if let Some(piece) = promotion {
                Move::promotion_flag(piece, capture)
            } else if capture {
                FLAG_CAPTURE
            } else if file_of(from) != file_of(to) && game_state.en_passant_square() == Some(to) {
                FLAG_EN_PASSANT
            } else if from.abs_diff(to) == 16 {
                FLAG_DOUBLE_PAWN_PUSH
            } else {
                FLAG_QUIET
            }
        }
        _ if promotion.is_some() => return Err(invalid()),
        PieceKind::King if from.abs_diff(to) == 2 && rank_of(from) == rank_of(to) => {
            if to > from {
                FLAG_KING_CASTLE
            } else {
                FLAG_QUEEN_CASTLE
            }
        }
        _ if capture => FLAG_CAPTURE,
        _ => FLAG_QUIET,
    };

    Ok(Move::new(from, to, flags))
}

/// Inverse of [`long_algebraic_to_move`]; flags are not needed for the text.
#[inline]
pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

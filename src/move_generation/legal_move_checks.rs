//! Full legality determination for candidate moves.
//!
//! The checker never mutates the position: pins, discovered checks and the
//! en-passant rank exposure are all detected by probing attacks against a
//! hypothetical occupancy (origin vacated, destination filled, en-passant
//! victim removed).

use crate::chess_errors::IllegalMove;
use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::sliding_moves::{bishop_attacks, rook_attacks, sliding_attacks};

/// What the checker learned about an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveFacts {
    pub moved_piece: PieceKind,
    /// `Some(Pawn)` for en passant even though the destination is empty.
    pub captured_piece: Option<PieceKind>,
}

/// Pure legality predicate for the side to move.
#[inline]
pub fn is_legal_move(game_state: &GameState, mv: Move) -> bool {
    check_move(game_state, mv).is_ok()
}

/// Legality check that names the rejection reason.
pub fn check_move(game_state: &GameState, mv: Move) -> Result<MoveFacts, IllegalMove> {
    if mv.has_reserved_flags() {
        return Err(IllegalMove::ReservedFlags(mv));
    }

    let us = game_state.side_to_move();
    let them = us.opposite();
    let from = mv.from();
    let to = mv.to();
    let to_bb = square_bb(to);

    let Some((mover_color, moved_piece)) = game_state.piece_on(from) else {
        return Err(IllegalMove::EmptyOrigin(mv));
    };
    if mover_color != us {
        return Err(IllegalMove::NotSideToMove(mv));
    }
    if game_state.color_occupancy(us) & to_bb != 0 {
        return Err(IllegalMove::OwnPieceOnTarget(mv));
    }

    let target = game_state.piece_kind_on(to);
    if target == Some(PieceKind::King) {
        return Err(IllegalMove::KingCapture(mv));
    }

    let mut en_passant_victim: Bitboard = 0;
    let captured_piece = if mv.is_en_passant() {
        if moved_piece != PieceKind::Pawn
            || game_state.en_passant_square() != Some(to)
            || target.is_some()
        {
            return Err(IllegalMove::InvalidEnPassant(mv));
        }
        let victim = square_bb(to.wrapping_add_signed(-us.pawn_push_offset()));
        if game_state.pieces(them, PieceKind::Pawn) & victim == 0 {
            return Err(IllegalMove::InvalidEnPassant(mv));
        }
        en_passant_victim = victim;
        Some(PieceKind::Pawn)
    } else if mv.is_capture() {
        if target.is_none() {
            return Err(IllegalMove::CaptureOnEmptySquare(mv));
        }
        target
    } else {
        if target.is_some() {
            return Err(IllegalMove::UnflaggedCapture(mv));
        }
        None
    };

    let occupancy = game_state.occupancy();
    let facts = MoveFacts {
        moved_piece,
        captured_piece,
    };

    if mv.is_castle() {
        if moved_piece != PieceKind::King {
            return Err(IllegalMove::NotPseudoLegal(mv));
        }
        check_castling(game_state, mv, us, occupancy)?;
        return Ok(facts);
    }

    if moved_piece == PieceKind::Pawn {
        check_pawn_shape(mv, us, occupancy)?;
    } else {
        if mv.is_promotion() || mv.is_double_pawn_push() {
            return Err(IllegalMove::NotPseudoLegal(mv));
        }
        let reach = match moved_piece {
            PieceKind::Knight => knight_attacks(from),
            PieceKind::King => king_attacks(from),
            slider => sliding_attacks(slider, from, occupancy),
        };
        if reach & to_bb == 0 {
            return Err(IllegalMove::NotPseudoLegal(mv));
        }
    }

    let king_square = if moved_piece == PieceKind::King {
        to
    } else {
        match game_state.king_square(us) {
            Some(square) => square,
            None => return Ok(facts),
        }
    };

    let occupancy_after = (occupancy & !square_bb(from) & !en_passant_victim) | to_bb;
    let removed = to_bb | en_passant_victim;

    // Pins and discovered lines first, then every attacker kind.
    if slider_attackers(game_state, king_square, them, occupancy_after, removed) != 0
        || is_square_attacked_with(game_state, king_square, them, occupancy_after, removed)
    {
        return Err(IllegalMove::LeavesKingInCheck(mv));
    }

    Ok(facts)
}

fn check_pawn_shape(mv: Move, us: Color, occupancy: Bitboard) -> Result<(), IllegalMove> {
    let from = mv.from();
    let to = mv.to();
    let (start_rank, last_rank) = match us {
        Color::White => (1, 7),
        Color::Black => (6, 0),
    };

    if mv.is_promotion() != (rank_of(to) == last_rank) {
        return Err(IllegalMove::NotPseudoLegal(mv));
    }

    if mv.is_capture() {
        if pawn_attacks(us, from) & square_bb(to) == 0 {
            return Err(IllegalMove::NotPseudoLegal(mv));
        }
        return Ok(());
    }

    let step = us.pawn_push_offset();
    let Some(single) = from.checked_add_signed(step).filter(|sq| *sq < 64) else {
        return Err(IllegalMove::NotPseudoLegal(mv));
    };

    if mv.is_double_pawn_push() {
        let double = single.checked_add_signed(step);
        if rank_of(from) != start_rank
            || double != Some(to)
            || occupancy & square_bb(single) != 0
        {
            return Err(IllegalMove::NotPseudoLegal(mv));
        }
        return Ok(());
    }

    if to != single {
        return Err(IllegalMove::NotPseudoLegal(mv));
    }
    Ok(())
}

fn check_castling(
    game_state: &GameState,
    mv: Move,
    us: Color,
    occupancy: Bitboard,
) -> Result<(), IllegalMove> {
    let geometry = castling_geometry(us, mv.is_kingside_castle());

    if mv.from() != geometry.king_from || mv.to() != geometry.king_to {
        return Err(IllegalMove::NotPseudoLegal(mv));
    }
    if game_state.castling_rights() & geometry.right == 0
        || game_state.pieces(us, PieceKind::Rook) & square_bb(geometry.rook_from) == 0
    {
        return Err(IllegalMove::CastlingRightLost(mv));
    }
    if occupancy & geometry.between != 0 {
        return Err(IllegalMove::CastlingPathBlocked(mv));
    }

    let them = us.opposite();
    if geometry
        .king_path
        .iter()
        .any(|&square| is_square_attacked(game_state, square, them))
    {
        return Err(IllegalMove::CastlingThroughCheck(mv));
    }

    Ok(())
}

/// Whether any piece of `attacker_color` attacks `square` in the current
/// position. Returns `false` when no attacker exists.
#[inline]
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    attackers_to(game_state, square, attacker_color, game_state.occupancy(), 0) != 0
}

/// Attack probe against a hypothetical `occupancy`; attackers standing on
/// `removed` are ignored (captured in the hypothetical position).
#[inline]
pub fn is_square_attacked_with(
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
    occupancy: Bitboard,
    removed: Bitboard,
) -> bool {
    attackers_to(game_state, square, attacker_color, occupancy, removed) != 0
}

/// Squares of every `attacker_color` piece attacking `square`.
pub fn attackers_to(
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
    occupancy: Bitboard,
    removed: Bitboard,
) -> Bitboard {
    let attackers = game_state.color_occupancy(attacker_color) & !removed;
    let pawns = game_state.piece_occupancy(PieceKind::Pawn) & attackers;
    let knights = game_state.piece_occupancy(PieceKind::Knight) & attackers;
    let kings = game_state.piece_occupancy(PieceKind::King) & attackers;

    // A pawn of `attacker_color` hits `square` iff a pawn of the other color
    // on `square` would hit the pawn.
    (pawn_attacks(attacker_color.opposite(), square) & pawns)
        | (knight_attacks(square) & knights)
        | (king_attacks(square) & kings)
        | slider_attackers(game_state, square, attacker_color, occupancy, removed)
}

#[inline]
fn slider_attackers(
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
    occupancy: Bitboard,
    removed: Bitboard,
) -> Bitboard {
    let attackers = game_state.color_occupancy(attacker_color) & !removed;
    let queens = game_state.piece_occupancy(PieceKind::Queen);
    let diagonal = (game_state.piece_occupancy(PieceKind::Bishop) | queens) & attackers;
    let straight = (game_state.piece_occupancy(PieceKind::Rook) | queens) & attackers;

    (bishop_attacks(square, occupancy) & diagonal) | (rook_attacks(square, occupancy) & straight)
}

/// Attacking pieces listed with their kind, in the current position.
pub fn attackers_to_square(
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let mut bb = attackers_to(game_state, square, attacker_color, game_state.occupancy(), 0);
    let mut attackers = Vec::with_capacity(bb.count_ones() as usize);
    while bb != 0 {
        let from = bb.trailing_zeros() as Square;
        if let Some(piece) = game_state.piece_kind_on(from) {
            attackers.push((from, piece));
        }
        bb &= bb - 1;
    }
    attackers
}

//! In-place make/unmake.
//!
//! `apply_move` validates, snapshots the irreversible fields into the undo
//! stack and edits the planes and the Zobrist key with XORs. `revert_move`
//! replays the same plane XORs (they are self-inverse) and restores the
//! snapshot verbatim, so the prior state comes back bit for bit.

use crate::chess_errors::{ChessErrors, IllegalMove};
use crate::game_state::chess_rules::{castling_geometry, CASTLING_RIGHTS_MASK};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{check_move, MoveFacts};
use crate::moves::move_descriptions::Move;
use crate::search::zobrist::{
    castling_key, en_passant_file_key, piece_square_key, side_to_move_key,
};

/// Play `mv` for the side to move. An illegal move is refused with its
/// reason and leaves the state untouched.
pub fn apply_move(game_state: &mut GameState, mv: Move) -> Result<(), IllegalMove> {
    let facts = check_move(game_state, mv)
        .inspect_err(|reason| log::trace!("apply_move refused {mv}: {reason}"))?;

    let mover = game_state.side_to_move;

    game_state.undo_stack.push(UndoState {
        mv,
        moved_piece: facts.moved_piece,
        captured_piece: facts.captured_piece,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_zobrist_key: game_state.zobrist_key,
    });

    let mut key = game_state.zobrist_key ^ side_to_move_key();
    game_state.side_to_move = mover.opposite();

    if facts.moved_piece == PieceKind::Pawn || facts.captured_piece.is_some() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    if let Some(old_target) = game_state.en_passant_square.take() {
        key ^= en_passant_file_key(file_of(old_target));
    }

    key ^= toggle_move_pieces(game_state, mv, mover, facts);

    if mv.is_double_pawn_push() {
        let target = (mv.from() + mv.to()) / 2;
        game_state.en_passant_square = Some(target);
        key ^= en_passant_file_key(file_of(target));
    }

    let old_rights = game_state.castling_rights;
    let new_rights = old_rights
        & CASTLING_RIGHTS_MASK[mv.from() as usize]
        & CASTLING_RIGHTS_MASK[mv.to() as usize];
    game_state.castling_rights = new_rights;
    key ^= castling_key(old_rights ^ new_rights);

    game_state.zobrist_key = key;
    Ok(())
}

/// Undo `mv`, which must be the most recently applied move.
pub fn revert_move(game_state: &mut GameState, mv: Move) -> Result<(), ChessErrors> {
    let Some(undo) = game_state.undo_stack.pop() else {
        log::trace!("revert_move refused {mv}: nothing applied");
        return Err(ChessErrors::NothingToRevert);
    };
    if undo.mv != mv {
        let applied = undo.mv;
        game_state.undo_stack.push(undo);
        log::trace!("revert_move refused {mv}: last applied move is {applied}");
        return Err(ChessErrors::RevertMismatch {
            requested: mv,
            applied,
        });
    }

    let mover = game_state.side_to_move.opposite();
    let facts = MoveFacts {
        moved_piece: undo.moved_piece,
        captured_piece: undo.captured_piece,
    };
    toggle_move_pieces(game_state, mv, mover, facts);

    game_state.side_to_move = mover;
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;
    game_state.zobrist_key = undo.prev_zobrist_key;

    Ok(())
}

/// XOR every piece edit of `mv` into the planes; returns the matching
/// Zobrist delta. Calling it twice is the identity on the planes.
fn toggle_move_pieces(game_state: &mut GameState, mv: Move, mover: Color, facts: MoveFacts) -> u64 {
    let from = mv.from();
    let to = mv.to();
    let mut key = 0u64;

    if let Some(captured) = facts.captured_piece {
        let victim = if mv.is_en_passant() {
            to.wrapping_add_signed(-mover.pawn_push_offset())
        } else {
            to
        };
        key ^= toggle_piece(game_state, mover.opposite(), captured, victim);
    }

    key ^= toggle_piece(game_state, mover, facts.moved_piece, from);
    match mv.promotion_piece() {
        Some(promoted) => key ^= toggle_piece(game_state, mover, promoted, to),
        None => key ^= toggle_piece(game_state, mover, facts.moved_piece, to),
    }

    if mv.is_castle() {
        let geometry = castling_geometry(mover, mv.is_kingside_castle());
        key ^= toggle_piece(game_state, mover, PieceKind::Rook, geometry.rook_from);
        key ^= toggle_piece(game_state, mover, PieceKind::Rook, geometry.rook_to);
    }

    key
}

#[inline]
fn toggle_piece(game_state: &mut GameState, color: Color, piece: PieceKind, square: Square) -> u64 {
    let mask = square_bb(square);
    game_state.color_bb[color.index()] ^= mask;
    game_state.piece_bb[piece.index()] ^= mask;
    piece_square_key(color, piece, square)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::moves::move_descriptions::*;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("test FEN should parse")
    }

    fn play(game_state: &mut GameState, mv: Move) {
        apply_move(game_state, mv).expect("move should be legal");
        game_state.validate().expect("state should stay consistent");
    }

    #[test]
    fn opening_sequence_updates_every_field() {
        let mut g = GameState::new_game();
        let e4 = Move::new(12, 28, FLAG_DOUBLE_PAWN_PUSH);
        let e5 = Move::new(52, 36, FLAG_DOUBLE_PAWN_PUSH);
        let nf3 = Move::new(6, 21, FLAG_QUIET);

        play(&mut g, e4);
        assert_eq!(g.side_to_move(), Color::Black);
        assert_eq!(g.en_passant_square(), Some(20));
        assert_eq!(g.halfmove_clock(), 0);
        assert_eq!(g.fullmove_number(), 1);

        play(&mut g, e5);
        assert_eq!(g.en_passant_square(), Some(44));
        assert_eq!(g.fullmove_number(), 2);

        play(&mut g, nf3);
        assert_eq!(g.en_passant_square(), None);
        assert_eq!(g.halfmove_clock(), 1);
        assert_eq!(
            g.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );

        for mv in [nf3, e5, e4] {
            revert_move(&mut g, mv).expect("revert should succeed");
        }
        assert_eq!(g, GameState::new_game());
        assert_eq!(g.to_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn en_passant_window_lasts_one_ply() {
        let mut g = GameState::new_game();
        play(&mut g, Move::new(12, 28, FLAG_DOUBLE_PAWN_PUSH)); // e4
        play(&mut g, Move::new(48, 40, FLAG_QUIET)); // a6
        play(&mut g, Move::new(28, 36, FLAG_QUIET)); // e5
        play(&mut g, Move::new(51, 35, FLAG_DOUBLE_PAWN_PUSH)); // d5

        let exd6 = Move::new(36, 43, FLAG_EN_PASSANT);
        let before = g.clone();
        play(&mut g, exd6);
        assert_eq!(g.piece_on(35), None);
        assert_eq!(g.piece_on(43), Some((Color::White, PieceKind::Pawn)));
        assert_eq!(g.halfmove_clock(), 0);
        revert_move(&mut g, exd6).expect("revert should succeed");
        assert_eq!(g, before);

        play(&mut g, Move::new(8, 16, FLAG_QUIET)); // a3
        play(&mut g, Move::new(55, 47, FLAG_QUIET)); // h6
        let stale = g.clone();
        assert_eq!(apply_move(&mut g, exd6), Err(IllegalMove::InvalidEnPassant(exd6)));
        assert_eq!(g, stale);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let original = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let mut g = original.clone();
        let short = Move::new(4, 6, FLAG_KING_CASTLE);
        play(&mut g, short);
        assert_eq!(g.piece_on(6), Some((Color::White, PieceKind::King)));
        assert_eq!(g.piece_on(5), Some((Color::White, PieceKind::Rook)));
        assert_eq!(g.piece_on(7), None);
        assert_eq!(g.castling_rights(), CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);

        let long = Move::new(60, 58, FLAG_QUEEN_CASTLE);
        play(&mut g, long);
        assert_eq!(g.piece_on(59), Some((Color::Black, PieceKind::Rook)));
        assert_eq!(g.castling_rights(), 0);

        revert_move(&mut g, long).expect("revert should succeed");
        revert_move(&mut g, short).expect("revert should succeed");
        assert_eq!(g, original);
    }

    #[test]
    fn capturing_home_rook_strips_both_sides_rights() {
        let mut g = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        play(&mut g, Move::new(0, 56, FLAG_CAPTURE));
        assert_eq!(g.castling_rights(), CASTLE_WHITE_KINGSIDE | CASTLE_BLACK_KINGSIDE);
        assert_eq!(g.halfmove_clock(), 0);
    }

    #[test]
    fn promotion_capture_replaces_pawn() {
        let original = game("1r2k3/P7/8/8/8/8/8/4K3 w - - 7 30");
        let mut g = original.clone();
        let axb8 = Move::new(48, 57, FLAG_PROMOTE_QUEEN_CAPTURE);
        play(&mut g, axb8);
        assert_eq!(g.piece_on(57), Some((Color::White, PieceKind::Queen)));
        assert_eq!(g.pieces(Color::White, PieceKind::Pawn), 0);
        assert_eq!(g.pieces(Color::Black, PieceKind::Rook), 0);
        let undo = g.last_undo().expect("snapshot should be recorded");
        assert_eq!(undo.captured_piece, Some(PieceKind::Rook));
        assert_eq!(undo.prev_halfmove_clock, 7);
        assert_eq!(g.halfmove_clock(), 0);

        revert_move(&mut g, axb8).expect("revert should succeed");
        assert_eq!(g, original);
    }

    #[test]
    fn fifty_move_counter_advances_and_restores() {
        let mut g = game("4k3/8/8/8/8/8/8/4K2R w - - 98 60");
        let rook_lift = Move::new(7, 15, FLAG_QUIET);
        play(&mut g, rook_lift);
        assert_eq!(g.halfmove_clock(), 99);
        assert!(!g.fifty_move_rule_reached());

        let king_step = Move::new(60, 52, FLAG_QUIET);
        play(&mut g, king_step);
        assert_eq!(g.halfmove_clock(), 100);
        assert_eq!(g.fullmove_number(), 61);
        assert!(g.fifty_move_rule_reached());

        revert_move(&mut g, king_step).expect("revert should succeed");
        assert_eq!(g.halfmove_clock(), 99);
        assert_eq!(g.fullmove_number(), 60);
    }

    #[test]
    fn illegal_move_is_rejected_without_side_effects() {
        let mut g = GameState::new_game();
        let before = g.clone();
        let bad = Move::new(12, 36, FLAG_QUIET);
        assert!(apply_move(&mut g, bad).is_err());
        assert_eq!(g, before);
        assert_eq!(g.ply(), 0);
    }

    #[test]
    fn revert_refuses_wrong_or_missing_move() {
        let mut g = GameState::new_game();
        let e4 = Move::new(12, 28, FLAG_DOUBLE_PAWN_PUSH);
        assert_eq!(revert_move(&mut g, e4), Err(ChessErrors::NothingToRevert));

        play(&mut g, e4);
        let nf3 = Move::new(6, 21, FLAG_QUIET);
        assert_eq!(
            revert_move(&mut g, nf3),
            Err(ChessErrors::RevertMismatch {
                requested: nf3,
                applied: e4
            })
        );
        assert_eq!(g.ply(), 1);
        revert_move(&mut g, e4).expect("revert should succeed");
    }

    #[test]
    fn knight_shuffle_is_a_repetition() {
        let mut g = GameState::new_game();
        let shuffle = [
            Move::new(6, 21, FLAG_QUIET),
            Move::new(62, 45, FLAG_QUIET),
            Move::new(21, 6, FLAG_QUIET),
        ];
        for mv in shuffle {
            play(&mut g, mv);
            assert!(!g.is_repetition());
        }
        play(&mut g, Move::new(45, 62, FLAG_QUIET));
        assert!(g.is_repetition());
        assert_eq!(g.zobrist_key(), GameState::new_game().zobrist_key());
    }
}

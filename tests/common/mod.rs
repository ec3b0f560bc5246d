//! Pseudo-legal move generator used by the integration tests and benches.
//!
//! Emits a superset of the legal moves: pins, checks and castling
//! preconditions are left to the legality checker.

#![allow(dead_code)]

use plum_core::game_state::chess_rules::{E1, E8};
use plum_core::game_state::chess_types::{rank_of, square_bb, Bitboard};
use plum_core::moves::king_moves::king_attacks;
use plum_core::moves::knight_moves::knight_attacks;
use plum_core::moves::move_descriptions::*;
use plum_core::moves::pawn_moves::pawn_attacks;
use plum_core::moves::sliding_moves::sliding_attacks;
use plum_core::{Color, GameState, Move, MoveGenerator, PieceKind, Square};

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
pub const POSITION_3_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
pub const POSITION_4_FEN: &str =
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
pub const POSITION_5_FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoLegalGenerator;

impl MoveGenerator for PseudoLegalGenerator {
    fn pseudo_legal_moves(&self, game_state: &GameState, moves: &mut Vec<Move>) {
        let us = game_state.side_to_move();
        let own = game_state.color_occupancy(us);
        let enemy = game_state.color_occupancy(us.opposite());
        let occupancy = game_state.occupancy();

        for piece in PieceKind::ALL {
            let mut pieces = game_state.pieces(us, piece);
            while pieces != 0 {
                let from = pieces.trailing_zeros() as Square;
                pieces &= pieces - 1;

                let targets = match piece {
                    PieceKind::Pawn => {
                        pawn_moves(game_state, from, us, enemy, occupancy, moves);
                        continue;
                    }
                    PieceKind::Knight => knight_attacks(from),
                    PieceKind::King => {
                        if from == E1 || from == E8 {
                            moves.push(Move::new(from, from + 2, FLAG_KING_CASTLE));
                            moves.push(Move::new(from, from - 2, FLAG_QUEEN_CASTLE));
                        }
                        king_attacks(from)
                    }
                    slider => sliding_attacks(slider, from, occupancy),
                } & !own;

                push_targets(from, targets, enemy, moves);
            }
        }
    }
}

fn push_targets(from: Square, mut targets: Bitboard, enemy: Bitboard, moves: &mut Vec<Move>) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        targets &= targets - 1;
        let flags = if enemy & square_bb(to) != 0 {
            FLAG_CAPTURE
        } else {
            FLAG_QUIET
        };
        moves.push(Move::new(from, to, flags));
    }
}

fn pawn_moves(
    game_state: &GameState,
    from: Square,
    us: Color,
    enemy: Bitboard,
    occupancy: Bitboard,
    moves: &mut Vec<Move>,
) {
    let (start_rank, last_rank) = match us {
        Color::White => (1, 7),
        Color::Black => (6, 0),
    };
    let step = us.pawn_push_offset();

    let single = from.wrapping_add_signed(step);
    if occupancy & square_bb(single) == 0 {
        push_pawn_move(from, single, false, last_rank, moves);
        let double = single.wrapping_add_signed(step);
        if rank_of(from) == start_rank && occupancy & square_bb(double) == 0 {
            moves.push(Move::new(from, double, FLAG_DOUBLE_PAWN_PUSH));
        }
    }

    let attacks = pawn_attacks(us, from);
    let mut captures = attacks & enemy;
    while captures != 0 {
        let to = captures.trailing_zeros() as Square;
        captures &= captures - 1;
        push_pawn_move(from, to, true, last_rank, moves);
    }

    if let Some(target) = game_state.en_passant_square() {
        if attacks & square_bb(target) != 0 {
            moves.push(Move::new(from, target, FLAG_EN_PASSANT));
        }
    }
}

fn push_pawn_move(from: Square, to: Square, capture: bool, last_rank: u8, moves: &mut Vec<Move>) {
    if rank_of(to) == last_rank {
        for piece in [
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
        ] {
            moves.push(Move::new(from, to, Move::promotion_flag(piece, capture)));
        }
    } else {
        let flags = if capture { FLAG_CAPTURE } else { FLAG_QUIET };
        moves.push(Move::new(from, to, flags));
    }
}

pub fn game(fen: &str) -> GameState {
    GameState::from_fen(fen).expect("test FEN should parse")
}

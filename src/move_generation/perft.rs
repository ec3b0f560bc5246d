//! Perft: exhaustive legal-move tree walk used to validate the position
//! core against published node counts.
//!
//! Each node filters the generator's candidates through `is_legal_move`,
//! applies, recurses and reverts on one shared `GameState`.

use crate::chess_errors::ChessErrors;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move, revert_move};
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count the leaves of the legal move tree `depth` plies deep.
///
/// The state is restored before returning, also on error.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generator.legal_moves(game_state) {
        total.merge(perft_child(generator, game_state, mv, depth)?);
    }
    Ok(total)
}

/// Leaf count below each legal root move, in generator order.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> Result<Vec<(Move, u64)>, ChessErrors> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    generator
        .legal_moves(game_state)
        .into_iter()
        .map(|mv| Ok((mv, perft_child(generator, game_state, mv, depth)?.nodes)))
        .collect()
}

fn perft_child<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    mv: Move,
    depth: u8,
) -> Result<PerftCounts, ChessErrors> {
    apply_move(game_state, mv)?;

    let counts = if depth == 1 {
        Ok(classify_leaf(generator, game_state, mv))
    } else {
        perft(generator, game_state, depth - 1)
    };

    revert_move(game_state, mv)?;
    counts
}

fn classify_leaf<G: MoveGenerator>(generator: &G, game_state: &GameState, mv: Move) -> PerftCounts {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };

    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant() {
        counts.en_passant += 1;
    }
    if mv.is_castle() {
        counts.castles += 1;
    }
    if mv.is_promotion() {
        counts.promotions += 1;
    }
    if game_state.in_check() {
        counts.checks += 1;
        if generator.legal_moves(game_state).is_empty() {
            counts.checkmates += 1;
        }
    }

    counts
}

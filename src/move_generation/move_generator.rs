use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_legal_move;
use crate::moves::move_descriptions::Move;

/// Source of candidate moves for the side to move.
///
/// Implementors may emit any superset of the legal moves; every candidate is
/// filtered through the legality checker before it is applied.
pub trait MoveGenerator: Send + Sync {
    /// Append pseudo-legal candidates for `game_state` to `moves`.
    fn pseudo_legal_moves(&self, game_state: &GameState, moves: &mut Vec<Move>);

    /// Candidates that pass `is_legal_move`.
    fn legal_moves(&self, game_state: &GameState) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.pseudo_legal_moves(game_state, &mut moves);
        moves.retain(|mv| is_legal_move(game_state, *mv));
        moves
    }
}

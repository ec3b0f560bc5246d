//! Crate root module declarations for the plum_core position engine.
//!
//! Exposes the bitboard attack tables, the 16-bit move codec, the mutable
//! `GameState` with its legality checker and apply/revert executor, Zobrist
//! hashing and the transposition tables a search plugs into.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod shared_transposition_table;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}

pub use chess_errors::{ChessErrors, IllegalMove};
pub use game_state::chess_types::{Bitboard, Color, PieceKind, Square};
pub use game_state::game_state::GameState;
pub use move_generation::legal_move_apply::{apply_move, revert_move};
pub use move_generation::legal_move_checks::{check_move, is_legal_move};
pub use move_generation::move_generator::MoveGenerator;
pub use moves::move_descriptions::Move;
pub use search::transposition_table::{Bound, TTEntry, TranspositionTable};

//! Terminal board renderer for diagnostics.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board with rank 8 at the top, using Unicode piece glyphs.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();
    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        let rank_char = char::from(b'1' + rank);
        out.push(rank_char);
        out.push(' ');

        for file in 0..8u8 {
            out.push(match game_state.piece_on(rank * 8 + file) {
                Some((color, piece)) => piece_to_unicode(color, piece),
                None => '·',
            });
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_char);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    const WHITE: [char; 6] = ['♙', '♘', '♗', '♖', '♕', '♔'];
    const BLACK: [char; 6] = ['♟', '♞', '♝', '♜', '♛', '♚'];

    match color {
        Color::White => WHITE[piece.index()],
        Color::Black => BLACK[piece.index()],
    }
}

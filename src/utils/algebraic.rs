//! Square and bitboard conversions for algebraic coordinates (`e4`).

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{Bitboard, Square};

/// Convert a coordinate such as `"e4"` to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessErrors> {
    let &[file, rank] = square.as_bytes() else {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    };

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

#[inline]
pub fn algebraic_to_bitboard(square: &str) -> Result<Bitboard, ChessErrors> {
    Ok(1u64 << algebraic_to_square(square)?)
}

/// Convert a square index (`0..=63`) to a coordinate such as `"e4"`.
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, ChessErrors> {
    if square > 63 {
        return Err(ChessErrors::SquareOutOfBounds(square));
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    Ok(format!("{file_char}{rank_char}"))
}

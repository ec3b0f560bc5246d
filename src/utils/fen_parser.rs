//! FEN-to-GameState parser.
//!
//! Builds a fully populated state (planes, rights, en-passant target, clocks
//! and Zobrist key) from Forsyth-Edwards Notation. The two counters may be
//! omitted and then default to `0 1`.

use crate::chess_errors::ChessErrors;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::search::zobrist::refresh_zobrist_key;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, ChessErrors> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let [board_part, side_part, castling_part, en_passant_part, counters @ ..] = fields.as_slice()
    else {
        return Err(invalid(format!("expected at least 4 fields, got {}", fields.len())));
    };
    if counters.len() > 2 {
        return Err(invalid("FEN has extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part, &game_state)?;

    if let Some(halfmove_part) = counters.first() {
        game_state.halfmove_clock = halfmove_part
            .parse::<u16>()
            .map_err(|_| invalid(format!("invalid halfmove clock: {halfmove_part}")))?;
    }
    if let Some(fullmove_part) = counters.get(1) {
        game_state.fullmove_number = fullmove_part
            .parse::<u16>()
            .map_err(|_| invalid(format!("invalid fullmove number: {fullmove_part}")))?;
    }

    refresh_zobrist_key(&mut game_state);
    log::debug!("imported position {fen:?} (key {:#018x})", game_state.zobrist_key);

    Ok(game_state)
}

#[inline]
fn invalid(message: impl Into<String>) -> ChessErrors {
    ChessErrors::InvalidFen(message.into())
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid(format!("rank {} has too many files", board_rank + 1)));
                }
                continue;
            }

            let (color, piece) = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(invalid(format!("rank {} has too many files", board_rank + 1)));
            }
            if piece == PieceKind::Pawn && (board_rank == 0 || board_rank == 7) {
                return Err(invalid("pawn on first or last rank"));
            }

            game_state.put_piece(color, piece, board_rank * 8 + file);
            file += 1;
        }

        if file != 8 {
            return Err(invalid(format!("rank {} does not sum to 8 files", board_rank + 1)));
        }
    }

    for color in Color::ALL {
        let kings = game_state.pieces(color, PieceKind::King).count_ones();
        if kings != 1 {
            return Err(invalid(format!("{color:?} must have exactly one king, found {kings}")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessErrors> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessErrors> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid(format!("invalid castling rights character: {ch}"))),
        };
    }

    Ok(rights)
}

/// The target must sit behind a pawn of the side that just moved, on the
/// third or sixth rank as seen from that side.
fn parse_en_passant_square(
    en_passant_part: &str,
    game_state: &GameState,
) -> Result<Option<Square>, ChessErrors> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    let us = game_state.side_to_move;
    let expected_rank = match us {
        Color::White => 5,
        Color::Black => 2,
    };
    if rank_of(square) != expected_rank {
        return Err(invalid(format!("en-passant square {en_passant_part} on wrong rank")));
    }

    let victim = square.wrapping_add_signed(-us.pawn_push_offset());
    let victim_is_pawn =
        game_state.pieces(us.opposite(), PieceKind::Pawn) & square_bb(victim) != 0;
    if !victim_is_pawn || game_state.occupancy() & square_bb(square) != 0 {
        return Err(invalid(format!(
            "en-passant square {en_passant_part} does not follow a double pawn push"
        )));
    }

    Ok(Some(square))
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };

    let piece = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, piece))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move(), Color::White);
        assert_eq!(game_state.castling_rights(), CASTLE_ALL);
        assert_eq!(game_state.fullmove_number(), 1);
        assert_eq!(game_state.halfmove_clock(), 0);
        assert_eq!(game_state.ply(), 0);
        game_state.validate().expect("parsed state should be consistent");
    }

    #[test]
    fn counters_are_optional() {
        let short = parse_fen("4k3/8/8/8/8/8/8/4K3 b - -").expect("four-field FEN should parse");
        assert_eq!(short.halfmove_clock(), 0);
        assert_eq!(short.fullmove_number(), 1);

        let five = parse_fen("4k3/8/8/8/8/8/8/4K3 b - - 12").expect("five-field FEN should parse");
        assert_eq!(five.halfmove_clock(), 12);
        assert_eq!(five.fullmove_number(), 1);
    }

    #[test]
    fn en_passant_target_is_checked() {
        let ok = parse_fen("rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 2")
            .expect("valid en-passant FEN should parse");
        assert_eq!(ok.en_passant_square(), Some(19));

        assert!(parse_fen("rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b KQkq e3 0 2").is_err());
        assert!(parse_fen("rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR w KQkq d3 0 2").is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        let cases = [
            "",
            "8/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w X - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - a 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            "4k3/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K1Z1 w - - 0 1",
            "P3k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
        ];
        for fen in cases {
            assert!(
                matches!(parse_fen(fen), Err(ChessErrors::InvalidFen(_))),
                "{fen:?} should be rejected"
            );
        }
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - z9 0 1"),
            Err(ChessErrors::InvalidAlgebraicString(_))
        ));
    }
}

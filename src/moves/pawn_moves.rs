//! Pawn capture patterns, indexed `[color][square]`.

use crate::game_state::chess_types::{Bitboard, Color, Square};

pub const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    generate_pawn_attacks(Color::White),
    generate_pawn_attacks(Color::Black),
];

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][square as usize]
}

const fn generate_pawn_attacks(color: Color) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        match color {
            Color::White => {
                if rank < 7 {
                    if file > 0 {
                        attacks |= 1u64 << (sq + 7);
                    }
                    if file < 7 {
                        attacks |= 1u64 << (sq + 9);
                    }
                }
            }
            Color::Black => {
                if rank > 0 {
                    if file > 0 {
                        attacks |= 1u64 << (sq - 9);
                    }
                    if file < 7 {
                        attacks |= 1u64 << (sq - 7);
                    }
                }
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{pawn_attacks, PAWN_ATTACKS};
    use crate::game_state::chess_types::Color;

    #[test]
    fn white_pawn_attacks_from_e2() {
        let e2 = 12u8;
        let expected = (1u64 << 19) | (1u64 << 21);
        assert_eq!(PAWN_ATTACKS[0][e2 as usize], expected);
        assert_eq!(pawn_attacks(Color::White, e2), expected);
    }

    #[test]
    fn black_pawn_attacks_from_e7() {
        let e7 = 52u8;
        let expected = (1u64 << 43) | (1u64 << 45);
        assert_eq!(pawn_attacks(Color::Black, e7), expected);
    }

    #[test]
    fn edge_pawns_do_not_wrap() {
        assert_eq!(pawn_attacks(Color::White, 8), 1u64 << 17); // a2 -> b3
        assert_eq!(pawn_attacks(Color::White, 15), 1u64 << 22); // h2 -> g3
        assert_eq!(pawn_attacks(Color::Black, 48), 1u64 << 41); // a7 -> b6
        assert_eq!(pawn_attacks(Color::White, 60), 0); // last rank
    }
}

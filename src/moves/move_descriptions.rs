//! Packed 16-bit move descriptions.
//!
//! Layout: bits 0-5 destination, bits 6-11 origin, bits 12-15 flags.
//! Flag bit 2 marks a capture and flag bit 3 a promotion; the low two bits
//! of a promotion flag select knight, bishop, rook or queen. Every decoder
//! is total over all `u16` values and none of them validate anything.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};

const TO_SHIFT: u16 = 0;
const FROM_SHIFT: u16 = 6;
const FLAGS_SHIFT: u16 = 12;

const SQUARE_MASK: u16 = 0x3F;
const FLAGS_MASK: u16 = 0xF;

pub const FLAG_QUIET: u16 = 0;
pub const FLAG_DOUBLE_PAWN_PUSH: u16 = 1;
pub const FLAG_KING_CASTLE: u16 = 2;
pub const FLAG_QUEEN_CASTLE: u16 = 3;
pub const FLAG_CAPTURE: u16 = 4;
pub const FLAG_EN_PASSANT: u16 = 5;
pub const FLAG_PROMOTE_KNIGHT: u16 = 8;
pub const FLAG_PROMOTE_BISHOP: u16 = 9;
pub const FLAG_PROMOTE_ROOK: u16 = 10;
pub const FLAG_PROMOTE_QUEEN: u16 = 11;
pub const FLAG_PROMOTE_KNIGHT_CAPTURE: u16 = 12;
pub const FLAG_PROMOTE_BISHOP_CAPTURE: u16 = 13;
pub const FLAG_PROMOTE_ROOK_CAPTURE: u16 = 14;
pub const FLAG_PROMOTE_QUEEN_CAPTURE: u16 = 15;

const CAPTURE_BIT: u16 = 0b0100;
const PROMOTION_BIT: u16 = 0b1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// All-zero encoding (`a1a1`, quiet); never legal.
    pub const NULL: Move = Move(0);

    #[inline]
    pub const fn new(from: Square, to: Square, flags: u16) -> Self {
        Move(
            ((flags & FLAGS_MASK) << FLAGS_SHIFT)
                | ((from as u16 & SQUARE_MASK) << FROM_SHIFT)
                | ((to as u16 & SQUARE_MASK) << TO_SHIFT),
        )
    }

    /// Promotion flag for `piece`, with or without capture. Non-promotable
    /// kinds map to the queen.
    #[inline]
    pub const fn promotion_flag(piece: PieceKind, capture: bool) -> u16 {
        let base = match piece {
            PieceKind::Knight => FLAG_PROMOTE_KNIGHT,
            PieceKind::Bishop => FLAG_PROMOTE_BISHOP,
            PieceKind::Rook => FLAG_PROMOTE_ROOK,
            _ => FLAG_PROMOTE_QUEEN,
        };
        if capture {
            base | CAPTURE_BIT
        } else {
            base
        }
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn flags(self) -> u16 {
        (self.0 >> FLAGS_SHIFT) & FLAGS_MASK
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.flags() & CAPTURE_BIT != 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.flags() & PROMOTION_BIT != 0
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flags() == FLAG_EN_PASSANT
    }

    #[inline]
    pub const fn is_double_pawn_push(self) -> bool {
        self.flags() == FLAG_DOUBLE_PAWN_PUSH
    }

    #[inline]
    pub const fn is_kingside_castle(self) -> bool {
        self.flags() == FLAG_KING_CASTLE
    }

    #[inline]
    pub const fn is_queenside_castle(self) -> bool {
        self.flags() == FLAG_QUEEN_CASTLE
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.is_kingside_castle() || self.is_queenside_castle()
    }

    /// Flags 6 and 7 (capture bit plus a castle pattern) have no meaning.
    #[inline]
    pub const fn has_reserved_flags(self) -> bool {
        matches!(self.flags(), 6 | 7)
    }

    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        if !self.is_promotion() {
            return None;
        }
        Some(match self.flags() & 0b11 {
            0 => PieceKind::Knight,
            1 => PieceKind::Bishop,
            2 => PieceKind::Rook,
            _ => PieceKind::Queen,
        })
    }
}

/// Long-algebraic rendering (`e2e4`, `e7e8q`).
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for square in [self.from(), self.to()] {
            write!(
                f,
                "{}{}",
                char::from(b'a' + square % 8),
                char::from(b'1' + square / 8)
            )?;
        }
        if let Some(piece) = self.promotion_piece() {
            let ch = match piece {
                PieceKind::Knight => 'n',
                PieceKind::Bishop => 'b',
                PieceKind::Rook => 'r',
                _ => 'q',
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

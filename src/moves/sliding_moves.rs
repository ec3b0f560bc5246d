//! Sliding-piece attacks through magic bitboards.
//!
//! For every square the relevant blocker mask (rays without their final edge
//! square) is hashed by a multiplicative magic into a slice of one shared
//! attack table. Magics are searched once per process with a fixed-seed RNG,
//! so lookups are O(1) and identical across runs. Reference attacks used to
//! fill the table come from plain ray tracing.

use std::sync::OnceLock;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::game_state::chess_types::{Bitboard, PieceKind, Square};

const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const MAGIC_SEED: u64 = 0x2545_F491_4F6C_DD1D;

/// Bishop (5248) plus rook (102400) relevant-occupancy subsets.
const ATTACK_TABLE_SIZE: usize = 5_248 + 102_400;

#[derive(Debug, Clone, Copy, Default)]
struct Magic {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl Magic {
    #[inline(always)]
    fn index(&self, occupancy: Bitboard) -> usize {
        self.offset + ((occupancy & self.mask).wrapping_mul(self.magic) >> self.shift) as usize
    }
}

#[derive(Debug)]
struct MagicTables {
    bishop: [Magic; 64],
    rook: [Magic; 64],
    attacks: Vec<Bitboard>,
}

static TABLES: OnceLock<MagicTables> = OnceLock::new();

#[inline(always)]
fn tables() -> &'static MagicTables {
    TABLES.get_or_init(build_tables)
}

/// Force table construction up front instead of on the first lookup.
pub fn init_sliding_tables() {
    tables();
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let t = tables();
    t.attacks[t.bishop[(square & 63) as usize].index(occupancy)]
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let t = tables();
    t.attacks[t.rook[(square & 63) as usize].index(occupancy)]
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

/// Attack set of a sliding `piece` on `square`; empty for non-sliders.
#[inline]
pub fn sliding_attacks(piece: PieceKind, square: Square, occupancy: Bitboard) -> Bitboard {
    match piece {
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => 0,
    }
}

fn build_tables() -> MagicTables {
    let mut rng = StdRng::seed_from_u64(MAGIC_SEED);
    let mut attacks = Vec::with_capacity(ATTACK_TABLE_SIZE);

    let bishop = build_piece_magics(&BISHOP_DIRECTIONS, &mut rng, &mut attacks);
    let rook = build_piece_magics(&ROOK_DIRECTIONS, &mut rng, &mut attacks);

    log::debug!(
        "built magic sliding tables: {} attack entries ({} KiB)",
        attacks.len(),
        attacks.len() * std::mem::size_of::<Bitboard>() / 1024
    );

    MagicTables {
        bishop,
        rook,
        attacks,
    }
}

fn build_piece_magics(
    directions: &[(i32, i32); 4],
    rng: &mut StdRng,
    attacks: &mut Vec<Bitboard>,
) -> [Magic; 64] {
    let mut magics = [Magic::default(); 64];

    for (sq, entry) in magics.iter_mut().enumerate() {
        let square = sq as i32;
        let mask = relevant_mask(square, directions);
        let bits = mask.count_ones();
        let size = 1usize << bits;

        let mut occupancies = Vec::with_capacity(size);
        let mut references = Vec::with_capacity(size);
        // Carry-rippler walk over every subset of the mask.
        let mut subset = 0u64;
        loop {
            occupancies.push(subset);
            references.push(ray_attacks(square, directions, subset));
            subset = subset.wrapping_sub(mask) & mask;
            if subset == 0 {
                break;
            }
        }

        let shift = 64 - bits;
        let offset = attacks.len();
        attacks.resize(offset + size, 0);
        let magic = find_magic(
            mask,
            shift,
            &occupancies,
            &references,
            rng,
            &mut attacks[offset..],
        );

        *entry = Magic {
            mask,
            magic,
            shift,
            offset,
        };
    }

    magics
}

/// Search a collision-free magic and leave its filled table in `table`.
fn find_magic(
    mask: Bitboard,
    shift: u32,
    occupancies: &[Bitboard],
    references: &[Bitboard],
    rng: &mut StdRng,
    table: &mut [Bitboard],
) -> u64 {
    let mut epoch = vec![0u32; table.len()];
    let mut attempt = 0u32;

    loop {
        let magic = rng.random::<u64>() & rng.random::<u64>() & rng.random::<u64>();
        if (mask.wrapping_mul(magic) >> 56).count_ones() < 6 {
            continue;
        }

        attempt += 1;
        let mut collision = false;
        for (occupancy, reference) in occupancies.iter().zip(references) {
            let idx = (occupancy.wrapping_mul(magic) >> shift) as usize;
            if epoch[idx] < attempt {
                epoch[idx] = attempt;
                table[idx] = *reference;
            } else if table[idx] != *reference {
                collision = true;
                break;
            }
        }

        if !collision {
            return magic;
        }
    }
}

/// Ray squares that can block, i.e. without the last square of each ray.
fn relevant_mask(square: i32, directions: &[(i32, i32); 4]) -> Bitboard {
    let mut mask = 0u64;

    for &(file_step, rank_step) in directions {
        let mut file = (square % 8) + file_step;
        let mut rank = (square / 8) + rank_step;

        while (0..8).contains(&(file + file_step)) && (0..8).contains(&(rank + rank_step)) {
            mask |= 1u64 << (rank * 8 + file);
            file += file_step;
            rank += rank_step;
        }
    }

    mask
}

fn ray_attacks(square: i32, directions: &[(i32, i32); 4], occupancy: Bitboard) -> Bitboard {
    directions
        .iter()
        .fold(0u64, |acc, &(file_step, rank_step)| {
            acc | trace_ray(square, file_step, rank_step, occupancy)
        })
}

fn trace_ray(square: i32, file_step: i32, rank_step: i32, occupancy: Bitboard) -> Bitboard {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_rays_from_d4_have_fourteen_squares() {
        assert_eq!(rook_attacks(27, 0).count_ones(), 14);
    }

    #[test]
    fn bishop_rays_from_d4_have_thirteen_squares() {
        assert_eq!(bishop_attacks(27, 0).count_ones(), 13);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks(0, blocker_on_a4);

        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
        assert_ne!(attacks & (1u64 << 7), 0);
    }

    #[test]
    fn bishop_blocker_stops_ray() {
        let blocker_on_e3 = 1u64 << 20;
        let attacks = bishop_attacks(2, blocker_on_e3);

        assert_ne!(attacks & (1u64 << 20), 0);
        assert_eq!(attacks & (1u64 << 29), 0);
    }

    #[test]
    fn relevant_masks_have_expected_sizes() {
        assert_eq!(relevant_mask(0, &ROOK_DIRECTIONS).count_ones(), 12);
        assert_eq!(relevant_mask(27, &ROOK_DIRECTIONS).count_ones(), 10);
        assert_eq!(relevant_mask(27, &BISHOP_DIRECTIONS).count_ones(), 9);
        assert_eq!(relevant_mask(0, &BISHOP_DIRECTIONS).count_ones(), 6);
    }

    #[test]
    fn magic_lookup_matches_ray_tracing() {
        let mut rng = StdRng::seed_from_u64(11);
        for sq in 0..64u8 {
            for _ in 0..64 {
                let occupancy = rng.random::<u64>() & rng.random::<u64>();
                let square = i32::from(sq);
                assert_eq!(
                    bishop_attacks(sq, occupancy),
                    ray_attacks(square, &BISHOP_DIRECTIONS, occupancy)
                );
                assert_eq!(
                    rook_attacks(sq, occupancy),
                    ray_attacks(square, &ROOK_DIRECTIONS, occupancy)
                );
            }
        }
    }

    #[test]
    fn sliding_dispatch_by_kind() {
        let occupancy = (1u64 << 43) | (1u64 << 30);
        let d4 = 27u8;
        assert_eq!(
            sliding_attacks(PieceKind::Queen, d4, occupancy),
            bishop_attacks(d4, occupancy) | rook_attacks(d4, occupancy)
        );
        assert_eq!(sliding_attacks(PieceKind::Knight, d4, occupancy), 0);
        assert_eq!(sliding_attacks(PieceKind::Queen, d4, occupancy) & (1u64 << 51), 0);
    }
}

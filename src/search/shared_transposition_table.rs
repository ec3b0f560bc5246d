//! Lock-free transposition table shared by several search workers.
//!
//! Same policy as [`TranspositionTable`](super::transposition_table::TranspositionTable):
//! `key % capacity` slot, always-replace, probe verified by key. Each slot is
//! two atomics holding `key ^ data` and `data`; a torn read (words from two
//! different stores) fails the key check and is reported as a miss.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::moves::move_descriptions::Move;
use crate::search::transposition_table::{Bound, TTEntry, TTStats};

const MOVE_SHIFT: u32 = 0;
const SCORE_SHIFT: u32 = 16;
const DEPTH_SHIFT: u32 = 48;
const BOUND_SHIFT: u32 = 56;
const HAS_MOVE_BIT: u64 = 1 << 58;
const OCCUPIED_BIT: u64 = 1 << 63;

#[derive(Debug, Default)]
struct Slot {
    check: AtomicU64,
    data: AtomicU64,
}

#[derive(Debug)]
pub struct SharedTranspositionTable {
    slots: Vec<Slot>,
    probes: AtomicU64,
    hits: AtomicU64,
    stores: AtomicU64,
    overwrites: AtomicU64,
}

impl SharedTranspositionTable {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        log::debug!("allocating shared transposition table with {capacity} slots");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::default);
        Self {
            slots,
            probes: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            stores: AtomicU64::new(0),
            overwrites: AtomicU64::new(0),
        }
    }

    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        Self::new(bytes / std::mem::size_of::<Slot>())
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Not synchronised with concurrent stores; call between searches.
    pub fn clear(&self) {
        for slot in &self.slots {
            slot.check.store(0, Ordering::Relaxed);
            slot.data.store(0, Ordering::Relaxed);
        }
        for counter in [&self.probes, &self.hits, &self.stores, &self.overwrites] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    pub fn stats(&self) -> TTStats {
        TTStats {
            probes: self.probes.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            overwrites: self.overwrites.load(Ordering::Relaxed),
        }
    }

    #[inline]
    fn slot(&self, key: u64) -> &Slot {
        &self.slots[(key % self.slots.len() as u64) as usize]
    }

    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        self.probes.fetch_add(1, Ordering::Relaxed);
        let slot = self.slot(key);
        let data = slot.data.load(Ordering::Acquire);
        let check = slot.check.load(Ordering::Acquire);

        if data & OCCUPIED_BIT == 0 || check ^ data != key {
            return None;
        }
        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(unpack(key, data))
    }

    pub fn store(&self, entry: TTEntry) {
        self.stores.fetch_add(1, Ordering::Relaxed);
        let slot = self.slot(entry.key);

        let old_data = slot.data.load(Ordering::Relaxed);
        let old_check = slot.check.load(Ordering::Relaxed);
        if old_data & OCCUPIED_BIT != 0 && old_check ^ old_data != entry.key {
            self.overwrites.fetch_add(1, Ordering::Relaxed);
        }

        let data = pack(&entry);
        slot.check.store(entry.key ^ data, Ordering::Release);
        slot.data.store(data, Ordering::Release);
    }
}

fn pack(entry: &TTEntry) -> u64 {
    let (has_move, raw_move) = match entry.best_move {
        Some(mv) => (HAS_MOVE_BIT, u64::from(mv.raw())),
        None => (0, 0),
    };
    let bound = match entry.bound {
        Bound::Exact => 0u64,
        Bound::Lower => 1,
        Bound::Upper => 2,
    };

    OCCUPIED_BIT
        | has_move
        | (raw_move << MOVE_SHIFT)
        | (u64::from(entry.score as u32) << SCORE_SHIFT)
        | (u64::from(entry.depth) << DEPTH_SHIFT)
        | (bound << BOUND_SHIFT)
}

fn unpack(key: u64, data: u64) -> TTEntry {
    let best_move = (data & HAS_MOVE_BIT != 0)
        .then(|| Move::from_raw(((data >> MOVE_SHIFT) & 0xFFFF) as u16));
    let bound = match (data >> BOUND_SHIFT) & 0b11 {
        0 => Bound::Exact,
        1 => Bound::Lower,
        _ => Bound::Upper,
    };

    TTEntry {
        key,
        best_move,
        score: ((data >> SCORE_SHIFT) & 0xFFFF_FFFF) as u32 as i32,
        depth: ((data >> DEPTH_SHIFT) & 0xFF) as u8,
        bound,
    }
}

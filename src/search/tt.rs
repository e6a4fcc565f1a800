use crate::moves::types::Move;

/// Direct-mapped table of 2^20 slots keyed by the low 20 bits of the hash.
pub const TT_BITS: u32 = 20;
const TT_SLOTS: usize = 1 << TT_BITS;
const TT_MASK: u32 = (TT_SLOTS as u32) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Bound {
    Exact,
    /// Score is a lower bound (beta cutoff).
    Lower,
    /// Score is an upper bound (failed low).
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    pub hash: u32,
    pub depth: i32,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
    pub age: u8,
}

pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    age: u8,
}

impl TranspositionTable {
    pub fn new() -> Self {
        TranspositionTable {
            entries: vec![None; TT_SLOTS],
            age: 0,
        }
    }

    /// The table persists across `find_best_move` calls; bumping the age
    /// per call makes entries from earlier searches replaceable.
    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
        self.age = 0;
    }

    #[inline(always)]
    fn index(hash: u32) -> usize {
        (hash & TT_MASK) as usize
    }

    pub fn probe(&self, hash: u32) -> Option<&TtEntry> {
        self.entries[Self::index(hash)]
            .as_ref()
            .filter(|e| e.hash == hash)
    }

    /// Replacement: empty slot, same position, stale age, or a search at
    /// least as deep as the incumbent.
    pub fn save(&mut self, hash: u32, depth: i32, score: i32, bound: Bound, best_move: Option<Move>) {
        let slot = &mut self.entries[Self::index(hash)];
        let replace = match slot {
            None => true,
            Some(e) => e.hash == hash || e.age != self.age || e.depth <= depth,
        };
        if replace {
            // A probe hit without a move should not erase an older move for
            // the same position.
            let best_move = best_move.or_else(|| {
                slot.as_ref()
                    .filter(|e| e.hash == hash)
                    .and_then(|e| e.best_move)
            });
            *slot = Some(TtEntry {
                hash,
                depth,
                score,
                bound,
                best_move,
                age: self.age,
            });
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

//! Bounded transposition table keyed by canonical position signature.
//!
//! Entries live in a hash map; a FIFO of keys remembers insertion order so the
//! oldest entry is evicted once the table is full. Overwriting an existing key
//! keeps its original slot in the FIFO.

use std::collections::{HashMap, VecDeque};

use crate::game_state::corners_types::Move;
use crate::search::position_key::PositionKey;

pub const DEFAULT_TT_CAPACITY: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: PositionKey,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub evictions: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: HashMap<PositionKey, TTEntry>,
    insertion_order: VecDeque<PositionKey>,
    capacity: usize,
    stats: TTStats,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TT_CAPACITY)
    }
}

impl TranspositionTable {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity.min(DEFAULT_TT_CAPACITY)),
            insertion_order: VecDeque::with_capacity(capacity.min(DEFAULT_TT_CAPACITY)),
            capacity,
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    pub fn probe(&mut self, key: PositionKey) -> Option<TTEntry> {
        self.stats.probes += 1;
        let hit = self.entries.get(&key).copied();
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Lookup without touching statistics.
    #[inline]
    pub fn peek(&self, key: &PositionKey) -> Option<&TTEntry> {
        self.entries.get(key)
    }

    /// Insert or refresh an entry. A stored result is only replaced by one
    /// searched at least as deep.
    pub fn store(&mut self, entry: TTEntry) {
        self.stats.stores += 1;

        if let Some(existing) = self.entries.get_mut(&entry.key) {
            if entry.depth >= existing.depth {
                *existing = entry;
            }
            return;
        }

        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.insertion_order.pop_front() else {
                break;
            };
            if self.entries.remove(&oldest).is_some() {
                self.stats.evictions += 1;
            }
        }

        self.insertion_order.push_back(entry.key);
        self.entries.insert(entry.key, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::corners_types::{Coord, CornerShape, Piece, Player};

    fn key(index: usize) -> PositionKey {
        let pieces = [Piece::new(0, Player::A, Coord::from_index(index))];
        PositionKey::from_pieces(&pieces, Player::A, CornerShape::SMALL)
    }

    fn entry(index: usize, depth: u8, score: i32) -> TTEntry {
        TTEntry {
            key: key(index),
            depth,
            score,
            bound: Bound::Exact,
            best_move: None,
        }
    }

    #[test]
    fn store_and_probe_round_trip() {
        let mut tt = TranspositionTable::with_capacity(8);
        let stored = TTEntry {
            best_move: Some(Move::new(Coord::new(0, 0), Coord::new(0, 1))),
            ..entry(3, 4, 42)
        };
        tt.store(stored);

        assert_eq!(tt.probe(key(3)), Some(stored));
        assert_eq!(tt.probe(key(4)), None);
        let stats = tt.stats();
        assert_eq!((stats.probes, stats.hits, stats.stores), (2, 1, 1));
    }

    #[test]
    fn shallower_result_does_not_replace_deeper_one() {
        let mut tt = TranspositionTable::with_capacity(8);
        tt.store(entry(1, 3, 10));
        tt.store(entry(1, 2, 99));
        assert_eq!(tt.peek(&key(1)).map(|e| e.score), Some(10));

        tt.store(entry(1, 5, 7));
        assert_eq!(tt.peek(&key(1)).map(|e| (e.depth, e.score)), Some((5, 7)));
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn full_table_evicts_oldest_insertion() {
        let mut tt = TranspositionTable::with_capacity(3);
        tt.store(entry(0, 1, 0));
        tt.store(entry(1, 1, 1));
        tt.store(entry(2, 1, 2));
        // Refreshing key 0 does not move it to the back of the queue.
        tt.store(entry(0, 2, 5));
        tt.store(entry(3, 1, 3));

        assert_eq!(tt.len(), 3);
        assert!(tt.peek(&key(0)).is_none());
        assert!(tt.peek(&key(1)).is_some());
        assert!(tt.peek(&key(3)).is_some());
        assert_eq!(tt.stats().evictions, 1);
    }

    #[test]
    fn clear_empties_table_and_stats() {
        let mut tt = TranspositionTable::default();
        tt.store(entry(5, 1, 1));
        tt.clear();
        assert!(tt.is_empty());
        assert_eq!(tt.stats(), TTStats::default());
        assert_eq!(tt.capacity(), DEFAULT_TT_CAPACITY);
    }
}

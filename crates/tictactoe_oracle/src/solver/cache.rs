//! Memoization table for solved positions.
//!
//! The key space is tiny (3^9 boards times two movers), so the table is
//! direct-mapped with one slot per key and never evicts. Slots remember the
//! key they were written under and refuse to be written twice.

use super::SolvedEntry;
use crate::types::BOARD_CODES;
use crate::{Board, Player};
use tracing::trace;

/// Cache key for a position: the board together with the side to move.
///
/// Encoded as the mixed-radix integer `board.code() * 2 + side`, with X as 0
/// and O as 1, so equal positions always map to the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoKey(u16);

impl MemoKey {
    /// Number of distinct keys.
    pub const SLOTS: usize = BOARD_CODES as usize * 2;

    /// Builds the key for `board` with `side` to move.
    pub fn new(board: &Board, side: Player) -> Self {
        let side_digit = match side {
            Player::X => 0,
            Player::O => 1,
        };
        Self(board.code() * 2 + side_digit)
    }

    /// Slot index in `0..SLOTS`.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// The side to move encoded in this key.
    pub fn side(self) -> Player {
        if self.0 % 2 == 0 { Player::X } else { Player::O }
    }

    /// The board encoded in this key.
    pub fn board(self) -> Board {
        // Keys are only built from valid boards, so the code is in range.
        Board::from_code(self.0 / 2).unwrap_or_default()
    }
}

impl std::fmt::Display for MemoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.board(), self.side())
    }
}

/// Lookup and store counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls to [`MemoCache::get`].
    pub lookups: u64,
    /// Lookups that found an entry.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries written.
    pub stores: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit, or 0 when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

/// Write-once table of exact solver results keyed by [`MemoKey`].
#[derive(Debug, Clone)]
pub struct MemoCache {
    slots: Vec<Option<(MemoKey, SolvedEntry)>>,
    len: usize,
    stats: CacheStats,
}

impl MemoCache {
    /// Creates an empty cache with every slot allocated.
    pub fn new() -> Self {
        Self {
            slots: vec![None; MemoKey::SLOTS],
            len: 0,
            stats: CacheStats::default(),
        }
    }

    /// Returns the entry stored under `key`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the slot holds an entry written under a different key.
    pub fn get(&mut self, key: MemoKey) -> Option<SolvedEntry> {
        self.stats.lookups += 1;
        match self.slots[key.index()] {
            Some((stored, entry)) => {
                assert_eq!(
                    stored, key,
                    "memo slot {} holds {stored}, probed with {key}",
                    key.index()
                );
                self.stats.hits += 1;
                Some(entry)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Stores the result for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already occupied; entries are never replaced.
    pub fn insert(&mut self, key: MemoKey, entry: SolvedEntry) {
        let slot = &mut self.slots[key.index()];
        if let Some((stored, previous)) = slot {
            panic!("memo slot for {key} already holds {previous:?} (written as {stored}), refusing {entry:?}");
        }
        trace!(%key, ?entry, "memo store");
        *slot = Some((key, entry));
        self.len += 1;
        self.stats.stores += 1;
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Snapshot of the lookup and store counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new()
    }
}

//! Memo table for score states.
//!
//! Within one top-level call the probability parameters are fixed, so a
//! state's value depends on the score pair alone. The recurrences revisit the
//! same pairs along many paths; this table stores each one once.

use rustc_hash::FxHashMap;

/// Score-pair keyed cache of win probabilities.
#[derive(Debug, Clone, Default)]
pub struct StateCache {
    /// (score1, score2) -> probability player one wins from there
    values: FxHashMap<(u32, u32), f64>,

    /// Lookups answered from the table.
    hits: u64,

    /// Lookups that found nothing.
    misses: u64,
}

impl StateCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a state, counting the hit or miss.
    pub fn get(&mut self, score1: u32, score2: u32) -> Option<f64> {
        match self.values.get(&(score1, score2)) {
            Some(&value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store the value of a state.
    pub fn insert(&mut self, score1: u32, score2: u32, value: f64) {
        self.values.insert((score1, score2), value);
    }

    /// Number of stored states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lookups answered from the table.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that found nothing.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop all stored states and reset the counters.
    pub fn clear(&mut self) {
        self.values.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

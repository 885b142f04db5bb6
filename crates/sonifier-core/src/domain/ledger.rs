//! # Seen-Transaction Ledger
//!
//! Bounded, insertion-ordered record of already-emitted transaction hashes.
//! Keeps duplicate fetches (a block observed across two polling ticks) from
//! producing duplicate notes.

use primitive_types::H256;
use std::collections::{HashSet, VecDeque};

/// Dedup ledger over transaction hashes.
///
/// Once the ledger grows past `trim_threshold`, a trim pass truncates it to
/// `retain_size` entries, evicting oldest-inserted hashes first. An evicted
/// hash may be re-emitted if it is ever fetched again.
#[derive(Clone, Debug)]
pub struct SeenLedger {
    seen: HashSet<H256>,
    order: VecDeque<H256>,
    trim_threshold: usize,
    retain_size: usize,
}

impl SeenLedger {
    /// Create a ledger with the given trim threshold and retention size.
    pub fn new(trim_threshold: usize, retain_size: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(trim_threshold + 1),
            order: VecDeque::with_capacity(trim_threshold + 1),
            trim_threshold,
            retain_size,
        }
    }

    /// Whether a hash has already been recorded.
    pub fn contains(&self, hash: &H256) -> bool {
        self.seen.contains(hash)
    }

    /// Record a hash. Recording an already-present hash is a no-op.
    pub fn insert(&mut self, hash: H256) {
        if self.seen.insert(hash) {
            self.order.push_back(hash);
        }
    }

    /// Truncate to `retain_size` entries if the ledger has grown past
    /// `trim_threshold`, evicting oldest-inserted hashes first.
    pub fn trim(&mut self) {
        if self.order.len() <= self.trim_threshold {
            return;
        }
        while self.order.len() > self.retain_size {
            if let Some(old) = self.order.pop_front() {
                self.seen.remove(&old);
            }
        }
    }

    /// Number of recorded hashes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

//! Bounded, insertion-ordered dedup set.

use std::collections::{HashSet, VecDeque};

use super::watch::WatchKey;

/// Size above which the set is compacted.
pub const SEEN_SOFT_CAP: usize = 100;

/// Number of most recent keys kept after compaction.
pub const SEEN_RETAIN: usize = 50;

/// Insertion-ordered set of keys already alerted on.
///
/// Invariant: `len() <= soft_cap`. An insert that pushes the size past the
/// soft cap drops the oldest keys until exactly `retain` remain. Evicted keys
/// can come back as "new" later; that is the price of bounded memory.
#[derive(Debug, Clone)]
pub struct SeenSet {
    order: VecDeque<WatchKey>,
    members: HashSet<WatchKey>,
    soft_cap: usize,
    retain: usize,
}

impl SeenSet {
    #[must_use]
    pub fn new() -> Self {
        Self::with_bounds(SEEN_SOFT_CAP, SEEN_RETAIN)
    }

    /// Custom bounds. `retain` is clamped to `soft_cap`.
    #[must_use]
    pub fn with_bounds(soft_cap: usize, retain: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(soft_cap + 1),
            members: HashSet::with_capacity(soft_cap + 1),
            soft_cap,
            retain: retain.min(soft_cap),
        }
    }

    #[must_use]
    pub fn contains(&self, key: &WatchKey) -> bool {
        self.members.contains(key)
    }

    /// Record a key. Returns `false` if it was already present, in which
    /// case its position is left untouched.
    pub fn insert(&mut self, key: WatchKey) -> bool {
        if !self.members.insert(key.clone()) {
            return false;
        }
        self.order.push_back(key);

        if self.order.len() > self.soft_cap {
            let excess = self.order.len() - self.retain;
            for evicted in self.order.drain(..excess) {
                self.members.remove(&evicted);
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &WatchKey> {
        self.order.iter()
    }
}

impl Default for SeenSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: i64) -> WatchKey {
        WatchKey::new("0xpair", n, 0)
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut seen = SeenSet::new();
        assert!(seen.insert(key(1)));
        assert!(!seen.insert(key(1)));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn stays_full_up_to_soft_cap() {
        let mut seen = SeenSet::new();
        for n in 0..100 {
            seen.insert(key(n));
        }
        assert_eq!(seen.len(), 100);
        assert!(seen.contains(&key(0)));
    }

    #[test]
    fn exceeding_cap_keeps_fifty_most_recent() {
        let mut seen = SeenSet::new();
        for n in 0..101 {
            seen.insert(key(n));
        }
        assert_eq!(seen.len(), 50);
        assert!(!seen.contains(&key(50)));
        assert!(seen.contains(&key(51)));
        assert!(seen.contains(&key(100)));

        let kept: Vec<i64> = seen.iter().map(|k| k.amount_bucket).collect();
        assert_eq!(kept, (51..101).collect::<Vec<_>>());
    }

    #[test]
    fn evicted_key_can_be_inserted_again() {
        let mut seen = SeenSet::new();
        for n in 0..101 {
            seen.insert(key(n));
        }
        assert!(seen.insert(key(0)));
        assert_eq!(seen.len(), 51);
    }

    #[test]
    fn re_inserting_existing_key_does_not_refresh_it() {
        let mut seen = SeenSet::with_bounds(3, 2);
        seen.insert(key(1));
        seen.insert(key(2));
        seen.insert(key(3));
        seen.insert(key(1));
        seen.insert(key(4));
        let kept: Vec<i64> = seen.iter().map(|k| k.amount_bucket).collect();
        assert_eq!(kept, vec![3, 4]);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut seen = SeenSet::new();
        seen.insert(key(1));
        seen.clear();
        assert!(seen.is_empty());
        assert!(!seen.contains(&key(1)));
    }
}

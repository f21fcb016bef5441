//! # Bounded Cache
//!
//! Fixed-capacity key/value store with oldest-entry eviction.
//!
//! Values live in a pre-allocated slot arena recycled through a free list.
//! A hash index maps keys to slots, and an insertion-order queue decides
//! which entry goes when the arena is full. Queue entries for overwritten or
//! removed slots go stale and are skipped lazily.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// One occupied arena slot.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    /// Insertion stamp; matches exactly one live queue entry.
    stamp: u64,
}

/// A cache holding at most `capacity` entries.
///
/// # Thread Safety
///
/// Not thread-safe on its own; [`super::Memo`] wraps one in a mutex.
///
/// # Example
///
/// ```rust
/// use hexlex_core::memory::BoundedCache;
///
/// let mut cache = BoundedCache::new(2);
/// cache.insert("a", 1);
/// cache.insert("b", 2);
/// let evicted = cache.insert("c", 3);
/// assert_eq!(evicted, Some(("a", 1)));
/// assert!(cache.get(&"a").is_none());
/// ```
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    /// The slot arena.
    slots: Box<[Option<Entry<K, V>>]>,
    /// Indices of vacant slots.
    free_list: Vec<usize>,
    /// Key to slot index.
    index: HashMap<K, usize>,
    /// `(slot, stamp)` in insertion order, oldest first.
    order: VecDeque<(usize, u64)>,
    /// Next insertion stamp.
    next_stamp: u64,
}

impl<K: Eq + Hash + Clone, V> BoundedCache<K, V> {
    /// Creates a cache with room for `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        let slots: Vec<Option<Entry<K, V>>> = (0..capacity).map(|_| None).collect();
        Self {
            slots: slots.into_boxed_slice(),
            free_list: (0..capacity).rev().collect(),
            index: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            next_stamp: 0,
        }
    }

    /// Maximum number of entries.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of entries held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if nothing is cached.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns true if `key` is cached.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up a cached value.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.slots[slot].as_ref().map(|entry| &entry.value)
    }

    /// Inserts or replaces a value, returning the entry evicted to make room.
    ///
    /// Replacing an existing key counts as a fresh insertion for eviction
    /// order and never evicts.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        if let Some(&slot) = self.index.get(&key) {
            if let Some(entry) = self.slots[slot].as_mut() {
                entry.value = value;
                entry.stamp = stamp;
            }
            self.push_order(slot, stamp);
            return None;
        }

        let evicted = if self.free_list.is_empty() {
            self.evict_oldest()
        } else {
            None
        };

        // Eviction always frees a slot when the arena is full.
        let slot = self.free_list.pop()?;
        self.slots[slot] = Some(Entry {
            key: key.clone(),
            value,
            stamp,
        });
        self.index.insert(key, slot);
        self.push_order(slot, stamp);
        evicted
    }

    /// Removes a value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        let entry = self.slots[slot].take()?;
        self.free_list.push(slot);
        Some(entry.value)
    }

    /// Removes and returns the oldest live entry.
    pub fn evict_oldest(&mut self) -> Option<(K, V)> {
        while let Some((slot, stamp)) = self.order.pop_front() {
            let live = self.slots[slot]
                .as_ref()
                .is_some_and(|entry| entry.stamp == stamp);
            if !live {
                continue;
            }
            let entry = self.slots[slot].take()?;
            self.index.remove(&entry.key);
            self.free_list.push(slot);
            return Some((entry.key, entry.value));
        }
        None
    }

    /// Drops every entry. The arena is kept.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.free_list.clear();
        self.free_list.extend((0..self.slots.len()).rev());
        self.index.clear();
        self.order.clear();
    }

    /// Iterates over cached entries in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|entry| (&entry.key, &entry.value)))
    }

    fn push_order(&mut self, slot: usize, stamp: u64) {
        self.order.push_back((slot, stamp));
        // Stale stamps pile up under repeated replacement.
        if self.order.len() > self.slots.len() * 2 {
            let slots = &self.slots;
            self.order.retain(|&(slot, stamp)| {
                slots[slot]
                    .as_ref()
                    .is_some_and(|entry| entry.stamp == stamp)
            });
        }
    }
}

//! # Poll-Based Memo
//!
//! A named, bounded memo table whose lookups never block.
//!
//! [`Memo::try_get`] answers `Ready(value)` from the cache or `Pending`, in
//! which case the key joins a request queue. A scheduler later drains the
//! queue with [`Memo::process`], computing values outside the lock so a
//! computation may itself poll other memos.
//!
//! Values are pure functions of their keys: a computation may run twice
//! without harm, and eviction only costs recomputation.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use super::BoundedCache;
use crate::readiness::Readiness;

/// Mutable half of a memo.
#[derive(Debug)]
struct MemoState<K, V> {
    cache: BoundedCache<K, Arc<V>>,
    queue: VecDeque<K>,
    queued: HashSet<K>,
}

/// Bounded memo table keyed by `K`.
#[derive(Debug)]
pub struct Memo<K, V> {
    name: &'static str,
    state: Mutex<MemoState<K, V>>,
}

/// Outcome of one [`Memo::process`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Values computed and stored.
    pub computed: usize,
    /// Requests whose computation reported pending and were re-queued.
    pub deferred: usize,
}

impl<K: Eq + Hash + Clone, V> Memo<K, V> {
    /// Creates an empty memo holding at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            state: Mutex::new(MemoState {
                cache: BoundedCache::new(capacity),
                queue: VecDeque::new(),
                queued: HashSet::new(),
            }),
        }
    }

    /// Name used in diagnostics.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the cached value, or queues a request and reports pending.
    pub fn try_get(&self, key: &K) -> Readiness<Arc<V>> {
        let mut state = self.state.lock();
        if let Some(value) = state.cache.get(key) {
            return Readiness::Ready(Arc::clone(value));
        }
        if state.queued.insert(key.clone()) {
            state.queue.push_back(key.clone());
            tracing::debug!(target: "hexlex::memory", memo = self.name, "queued request");
        }
        Readiness::Pending
    }

    /// Returns the cached value without queueing anything.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.state.lock().cache.get(key).map(Arc::clone)
    }

    /// Stores a computed value and clears any queued request for its key.
    pub fn fulfil(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        let mut state = self.state.lock();
        state.queued.remove(&key);
        if state.cache.insert(key, Arc::clone(&value)).is_some() {
            tracing::debug!(target: "hexlex::memory", memo = self.name, "evicted oldest entry");
        }
        value
    }

    /// Pops the oldest queued request.
    pub fn next_request(&self) -> Option<K> {
        let mut state = self.state.lock();
        let key = state.queue.pop_front()?;
        state.queued.remove(&key);
        Some(key)
    }

    /// Drains up to `budget` queued requests through `compute`.
    ///
    /// `compute` returns `None` when one of its own inputs is still pending;
    /// that request goes back to the end of the queue.
    pub fn process(&self, budget: usize, mut compute: impl FnMut(&K) -> Option<V>) -> ProcessStats {
        let mut stats = ProcessStats::default();
        for _ in 0..budget {
            let Some(key) = self.next_request() else {
                break;
            };
            if self.peek(&key).is_some() {
                continue;
            }
            match compute(&key) {
                Some(value) => {
                    self.fulfil(key, value);
                    stats.computed += 1;
                }
                None => {
                    self.requeue(key);
                    stats.deferred += 1;
                }
            }
        }
        stats
    }

    /// Drops a queued request, if any. Returns true if one was dropped.
    pub fn cancel(&self, key: &K) -> bool {
        let mut state = self.state.lock();
        if !state.queued.remove(key) {
            return false;
        }
        state.queue.retain(|queued| queued != key);
        true
    }

    /// Number of cached values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().cache.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().cache.is_empty()
    }

    /// Number of queued requests.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Drops every cached value and queued request.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.cache.clear();
        state.queue.clear();
        state.queued.clear();
    }

    fn requeue(&self, key: K) {
        let mut state = self.state.lock();
        if state.queued.insert(key.clone()) {
            state.queue.push_back(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_pending_then_ready() {
        let memo: Memo<u32, u64> = Memo::new("squares", 8);
        assert_eq!(memo.try_get(&3), Readiness::Pending);
        assert_eq!(memo.pending_requests(), 1);

        let stats = memo.process(10, |&k| Some(u64::from(k) * u64::from(k)));
        assert_eq!(stats.computed, 1);
        assert_eq!(memo.try_get(&3).ready().as_deref(), Some(&9));
        assert_eq!(memo.pending_requests(), 0);
    }

    #[test]
    fn test_memo_deduplicates_requests() {
        let memo: Memo<u32, u32> = Memo::new("dedup", 8);
        for _ in 0..5 {
            let _ = memo.try_get(&1);
        }
        assert_eq!(memo.pending_requests(), 1);
    }

    #[test]
    fn test_memo_requeues_deferred() {
        let memo: Memo<u32, u32> = Memo::new("deferred", 8);
        let _ = memo.try_get(&1);
        let stats = memo.process(1, |_| None);
        assert_eq!(stats.deferred, 1);
        assert_eq!(memo.pending_requests(), 1);

        let stats = memo.process(1, |&k| Some(k + 1));
        assert_eq!(stats.computed, 1);
        assert_eq!(memo.peek(&1).as_deref(), Some(&2));
    }

    #[test]
    fn test_memo_budget_limits_work() {
        let memo: Memo<u32, u32> = Memo::new("budget", 16);
        for k in 0..10 {
            let _ = memo.try_get(&k);
        }
        let stats = memo.process(4, |&k| Some(k));
        assert_eq!(stats.computed, 4);
        assert_eq!(memo.pending_requests(), 6);
        assert_eq!(memo.len(), 4);
    }

    #[test]
    fn test_memo_compute_may_poll_memo() {
        let memo: Memo<u32, u32> = Memo::new("reentrant", 16);
        let _ = memo.try_get(&2);
        // Computing 2 needs 1, which is not yet known.
        memo.process(8, |&k| {
            if k == 0 {
                return Some(0);
            }
            memo.try_get(&(k - 1)).ready().map(|prev| *prev + 1)
        });
        assert_eq!(memo.peek(&2).as_deref(), Some(&2));
    }

    #[test]
    fn test_memo_eviction_and_cancel() {
        let memo: Memo<u32, u32> = Memo::new("small", 1);
        memo.fulfil(1, 10);
        memo.fulfil(2, 20);
        assert!(memo.peek(&1).is_none());
        assert_eq!(memo.len(), 1);

        let _ = memo.try_get(&5);
        assert!(memo.cancel(&5));
        assert!(!memo.cancel(&5));
        assert_eq!(memo.pending_requests(), 0);
        memo.clear();
        assert!(memo.is_empty());
    }
}

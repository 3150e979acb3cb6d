//! Thread-safe selector handle.
//!
//! A selection is three steps (advance all, scan, settle one) that must
//! not interleave with another caller's. `SharedSelector` runs each call
//! as a single critical section behind a mutex, and takes snapshots
//! under the same lock so observers never see a half-advanced vector.

use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;

use crate::error::{BalancerError, BalancerResult};
use crate::keyed::KeyedSelector;

/// Cloneable, `Send + Sync` handle over a [`KeyedSelector`].
#[derive(Debug)]
pub struct SharedSelector<K> {
    inner: Arc<Mutex<KeyedSelector<K>>>,
}

impl<K> Clone for SharedSelector<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> SharedSelector<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new(selector: KeyedSelector<K>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(selector)),
        }
    }

    /// Pick the next key under the lock.
    pub fn select_next(&self) -> BalancerResult<K> {
        let mut selector = self.lock()?;
        Ok(selector.select_next().clone())
    }

    /// Credit per key, taken under the lock.
    pub fn snapshot(&self) -> BalancerResult<Vec<(K, i64)>> {
        Ok(self.lock()?.snapshot())
    }

    pub fn keys(&self) -> BalancerResult<Vec<K>> {
        Ok(self.lock()?.keys().to_vec())
    }

    pub fn total_weight(&self) -> BalancerResult<i64> {
        Ok(self.lock()?.total_weight())
    }

    /// A poisoned lock means a caller panicked mid-selection and the
    /// credit vector may be torn. That is never recovered from.
    fn lock(&self) -> BalancerResult<MutexGuard<'_, KeyedSelector<K>>> {
        self.inner.lock().map_err(|_| {
            warn!("selector lock poisoned, credit state is no longer trusted");
            BalancerError::InvariantViolation(
                "selector lock poisoned by a panicked caller".to_string(),
            )
        })
    }
}

impl<K> From<KeyedSelector<K>> for SharedSelector<K>
where
    K: Eq + Hash + Clone,
{
    fn from(selector: KeyedSelector<K>) -> Self {
        Self::new(selector)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::thread;

    use super::*;

    fn make_shared(entries: &[(&'static str, i64)]) -> SharedSelector<&'static str> {
        SharedSelector::new(KeyedSelector::new(entries.iter().copied()).unwrap())
    }

    #[test]
    fn matches_unshared_sequence() {
        let shared = make_shared(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let picks: Vec<&str> = (0..10).map(|_| shared.select_next().unwrap()).collect();
        assert_eq!(
            picks,
            vec!["d", "c", "b", "d", "a", "c", "d", "b", "c", "d"]
        );
        assert!(shared.snapshot().unwrap().iter().all(|(_, c)| *c == 0));
    }

    #[test]
    fn clones_share_state() {
        let shared = make_shared(&[("a", 1), ("b", 1)]);
        let other = shared.clone();
        assert_eq!(shared.select_next().unwrap(), "a");
        assert_eq!(other.select_next().unwrap(), "b");
        assert_eq!(other.keys().unwrap(), vec!["a", "b"]);
        assert_eq!(other.total_weight().unwrap(), 2);
    }

    #[test]
    fn concurrent_callers_preserve_fairness() {
        let shared = make_shared(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let mut handles = vec![];

        // 8 threads x 50 calls = 40 full cycles.
        for _ in 0..8 {
            let shared = shared.clone();
            handles.push(thread::spawn(move || {
                let mut results = Vec::new();
                for _ in 0..50 {
                    results.push(shared.select_next().unwrap());
                }
                results
            }));
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for h in handles {
            for key in h.join().unwrap() {
                *counts.entry(key).or_default() += 1;
            }
        }

        assert_eq!(counts["a"], 40);
        assert_eq!(counts["b"], 80);
        assert_eq!(counts["c"], 120);
        assert_eq!(counts["d"], 160);

        let snapshot = shared.snapshot().unwrap();
        assert_eq!(snapshot, vec![("a", 0), ("b", 0), ("c", 0), ("d", 0)]);
    }

    #[test]
    fn poisoned_lock_is_an_invariant_violation() {
        let shared = make_shared(&[("a", 1)]);
        let poisoner = shared.clone();

        let _ = thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison the selector lock");
        })
        .join();

        assert!(matches!(
            shared.select_next(),
            Err(BalancerError::InvariantViolation(_))
        ));
        assert!(matches!(
            shared.snapshot(),
            Err(BalancerError::InvariantViolation(_))
        ));
    }
}

//! Selection over opaque keys (backend addresses, worker ids, shard names).

use std::collections::HashSet;
use std::hash::Hash;

use swrr_core::PoolSpec;
use tracing::debug;

use crate::error::{BalancerError, BalancerResult};
use crate::selector::Selector;

/// A [`Selector`] whose candidates are identified by key instead of index.
///
/// Keys are unique within a selector and keep the order they were given
/// in, which is also the tie-break order.
#[derive(Debug, Clone)]
pub struct KeyedSelector<K> {
    keys: Vec<K>,
    selector: Selector,
}

impl<K> KeyedSelector<K>
where
    K: Eq + Hash + Clone,
{
    /// Build from ordered `(key, weight)` pairs.
    ///
    /// Fails on anything [`Selector::new`] rejects, and on duplicate keys.
    pub fn new(entries: impl IntoIterator<Item = (K, i64)>) -> BalancerResult<Self> {
        let (keys, weights): (Vec<K>, Vec<i64>) = entries.into_iter().unzip();

        let mut seen = HashSet::with_capacity(keys.len());
        for (idx, key) in keys.iter().enumerate() {
            if !seen.insert(key) {
                return Err(BalancerError::InvalidConfiguration(format!(
                    "duplicate key at index {idx}"
                )));
            }
        }

        let selector = Selector::new(&weights)?;
        Ok(Self { keys, selector })
    }

    /// Pick the next key. See [`Selector::select_next`].
    pub fn select_next(&mut self) -> &K {
        let idx = self.selector.select_next();
        &self.keys[idx]
    }

    /// Pick the next candidate and return its index into [`keys`](Self::keys).
    pub fn select_next_index(&mut self) -> usize {
        self.selector.select_next()
    }

    /// Current credit per key, in construction order.
    pub fn snapshot(&self) -> Vec<(K, i64)> {
        self.keys
            .iter()
            .cloned()
            .zip(self.selector.snapshot())
            .collect()
    }

    pub fn check_invariant(&self) -> BalancerResult<()> {
        self.selector.check_invariant()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Index of `key` in construction order.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn total_weight(&self) -> i64 {
        self.selector.total_weight()
    }
}

impl KeyedSelector<String> {
    /// Build a selector for a configured pool, keyed by backend key.
    pub fn from_pool(name: &str, pool: &PoolSpec) -> BalancerResult<Self> {
        let selector = Self::new(pool.entries()).map_err(|e| match e {
            BalancerError::InvalidConfiguration(msg) => {
                BalancerError::InvalidConfiguration(format!("pool {name}: {msg}"))
            }
            other => other,
        })?;
        debug!(
            pool = name,
            backends = selector.len(),
            total_weight = selector.total_weight(),
            "built pool selector"
        );
        Ok(selector)
    }
}

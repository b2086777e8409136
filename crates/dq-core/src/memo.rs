//! Single-slot memoized values.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::fingerprint::Fingerprint;

/// Cache hit and miss counts of one memo node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// A derived value cached under the fingerprint of the inputs it was
/// computed from.
///
/// The node holds at most one value. A lookup under a different fingerprint
/// drops it and recomputes; a failed computation leaves the node empty.
#[derive(Debug)]
pub struct Memo<T> {
    name: &'static str,
    slot: Option<(Fingerprint, Arc<T>)>,
    stats: MemoStats,
}

impl<T> Memo<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: None,
            stats: MemoStats::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Return the cached value for `key`, computing it on a miss.
    pub fn get_or_try_compute<E, F>(&mut self, key: &Fingerprint, compute: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some((cached, value)) = &self.slot
            && cached == key
        {
            self.stats.hits += 1;
            trace!(node = self.name, key = key.short(), "memo hit");
            return Ok(Arc::clone(value));
        }

        self.stats.misses += 1;
        self.slot = None;
        let value = Arc::new(compute()?);
        debug!(node = self.name, key = key.short(), "recomputed");
        self.slot = Some((key.clone(), Arc::clone(&value)));
        Ok(value)
    }

    /// The cached value, if any, without touching the counters.
    pub fn peek(&self) -> Option<&Arc<T>> {
        self.slot.as_ref().map(|(_, value)| value)
    }

    /// Fingerprint of the cached value's inputs.
    pub fn key(&self) -> Option<&Fingerprint> {
        self.slot.as_ref().map(|(key, _)| key)
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: u32) -> Fingerprint {
        Fingerprint::of(&value).unwrap()
    }

    #[test]
    fn equal_key_is_a_hit() {
        let mut memo: Memo<u32> = Memo::new("square");
        let first = memo.get_or_try_compute(&key(3), || Ok::<_, ()>(9)).unwrap();
        let second = memo
            .get_or_try_compute(&key(3), || -> Result<u32, ()> { panic!("recomputed") })
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(memo.stats(), MemoStats { hits: 1, misses: 1 });
    }

    #[test]
    fn changed_key_recomputes() {
        let mut memo: Memo<u32> = Memo::new("square");
        memo.get_or_try_compute(&key(3), || Ok::<_, ()>(9)).unwrap();
        let value = memo.get_or_try_compute(&key(4), || Ok::<_, ()>(16)).unwrap();
        assert_eq!(*value, 16);
        assert_eq!(memo.stats().misses, 2);
        assert_eq!(memo.key(), Some(&key(4)));
    }

    #[test]
    fn failure_leaves_node_empty() {
        let mut memo: Memo<u32> = Memo::new("square");
        memo.get_or_try_compute(&key(3), || Ok::<_, &str>(9)).unwrap();
        let err = memo.get_or_try_compute(&key(5), || Err("boom")).unwrap_err();
        assert_eq!(err, "boom");
        assert!(memo.peek().is_none());
        assert!(memo.key().is_none());
    }
}

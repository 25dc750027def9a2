//! Keyed lock table serializing work on one token identity.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tokenbridge_primitives::supply::SupplyKey;

/// One mutex per supply counter. Work on unrelated tokens never contends.
///
/// Entries only live while somebody holds or waits for them, so the table
/// stays small no matter how many instances pass through it.
#[derive(Debug, Default)]
pub struct TokenLocks {
    inner: DashMap<SupplyKey, Arc<Mutex<()>>>,
}

impl TokenLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock of `key`.
    pub fn with<R>(&self, key: SupplyKey, f: impl FnOnce() -> R) -> R {
        // The map shard is released before locking, so waiting here never
        // blocks lookups of other keys.
        let lock = self.inner.entry(key).or_default().clone();
        let res = {
            let _guard = lock.lock();
            f()
        };
        drop(lock);
        self.release(key);
        res
    }

    /// Drops the entry of `key` unless another caller still has a handle.
    fn release(&self, key: SupplyKey) {
        self.inner
            .remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<Mutex<()>>>;

/// Per-username mutual exclusion.
///
/// Each key maps to its own async mutex, so mutations of one account run one
/// at a time while different accounts proceed in parallel. Keys are compared
/// case-insensitively, matching how usernames are looked up.
///
/// An entry lives only while someone holds or waits for it. The map itself
/// sits behind a std mutex: it is never held across an `.await`, and the
/// guard has to prune its entry from a synchronous `Drop`.
pub(crate) struct UserLocks {
    locks: Arc<StdMutex<LockMap>>,
}

/// Holds the lock for one username. Releasing it drops the map entry when no
/// other task is waiting on the same key.
pub(crate) struct UserLockGuard {
    key: String,
    lock: Arc<Mutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<StdMutex<LockMap>>,
}

impl UserLocks {
    pub(crate) fn new() -> Self {
        Self {
            locks: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    /// Waits for exclusive access to `username`.
    pub(crate) async fn acquire(&self, username: &str) -> UserLockGuard {
        let key = username.trim().to_lowercase();
        let lock = lock_map(&self.locks).entry(key.clone()).or_default().clone();

        let guard = lock.clone().lock_owned().await;
        UserLockGuard {
            key,
            lock,
            guard: Some(guard),
            locks: self.locks.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        lock_map(&self.locks).len()
    }
}

impl Default for UserLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for UserLockGuard {
    fn drop(&mut self) {
        self.guard.take();

        // Waiters clone the entry under the map lock, so two references
        // (the map's and ours) means nobody else wants this key.
        let mut locks = lock_map(&self.locks);
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.key);
        }
    }
}

/// A panic while holding the map lock cannot leave the map inconsistent.
fn lock_map(locks: &StdMutex<LockMap>) -> MutexGuard<'_, LockMap> {
    locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

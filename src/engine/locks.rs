// src/engine/locks.rs

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async mutex per session id.
///
/// Answer submission and finalization of the same session hold this lock
/// across their read-then-write steps. Different sessions never contend.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, session_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(session_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drops the entry for `session_id` if nobody else holds or waits on it.
    ///
    /// Call after releasing your own guard. The count is checked under the map
    /// lock, and `acquire` clones under the same lock, so an entry that a
    /// waiter still references is never replaced by a fresh mutex.
    pub fn release_if_idle(&self, session_id: i64) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if locks
            .get(&session_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&session_id);
        }
    }

    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

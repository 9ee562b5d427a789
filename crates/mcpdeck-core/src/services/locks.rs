//! Per-target mutual exclusion for lifecycle operations.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::CoreError;

/// Set of targets with an operation in flight.
///
/// Keys are compared case-insensitively, matching how instance names are
/// correlated. A second operation on a busy target is rejected, not queued.
#[derive(Debug, Clone, Default)]
pub struct TargetLocks {
    busy: Arc<Mutex<HashSet<String>>>,
}

impl TargetLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self) -> MutexGuard<'_, HashSet<String>> {
        self.busy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim `target` until the returned guard is dropped.
    pub fn try_acquire(&self, target: &str) -> Result<TargetGuard, CoreError> {
        let key = target.to_lowercase();
        if !self.set().insert(key.clone()) {
            return Err(CoreError::TargetBusy(target.to_string()));
        }
        Ok(TargetGuard {
            busy: Arc::clone(&self.busy),
            key,
        })
    }

    pub fn is_busy(&self, target: &str) -> bool {
        self.set().contains(&target.to_lowercase())
    }
}

/// Releases its target on drop.
#[derive(Debug)]
pub struct TargetGuard {
    busy: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for TargetGuard {
    fn drop(&mut self) {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

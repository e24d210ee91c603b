//! Per-target-name serialization of mutating operations.
//!
//! Two concurrent create requests can render the same canonical name; the
//! conflict check and the mutation must run under the same lock or both
//! would pass pre-flight and race the renames.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of one async mutex per canonical target name.
///
/// Cloning shares the registry. Entries persist for the process lifetime;
/// the set of names a single operator produces stays small.
#[derive(Debug, Clone, Default)]
pub struct TargetLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl TargetLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a target name, waiting behind any in-flight
    /// operation on the same name.
    pub async fn acquire(&self, name: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(name.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

//! Result caching keyed by endpoint.
//!
//! Holds the most recent successful [`EndpointResult`] for each endpoint. Entries
//! are read and written through an [`EndpointLock`], which serializes everything
//! done to one endpoint: a caller that holds the lock can check the cache, test
//! operations and commit without another caller observing or duplicating that work.
//! Different endpoints are locked independently. A lock slot only lives while
//! some caller holds or waits on it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use prober_service::EndpointResult;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Caches endpoint results between test runs.
#[derive(Default)]
pub struct ResultCache {
  entries: RwLock<HashMap<String, EndpointResult>>,
  locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl ResultCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Take exclusive access to one endpoint's entry.
  ///
  /// Waits until no other caller holds the lock for `endpoint_id`.
  pub async fn lock(&self, endpoint_id: &str) -> EndpointLock<'_> {
    let slot = {
      let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
      locks.entry(endpoint_id.to_string()).or_default().clone()
    };

    let guard = slot.lock_owned().await;

    EndpointLock {
      cache: self,
      endpoint_id: endpoint_id.to_string(),
      _guard: guard,
    }
  }

  /// Drop the lock slot for `endpoint_id` if nobody but the map refers to it.
  ///
  /// `held` is the number of references the caller itself owns.
  fn release_slot(&self, endpoint_id: &str, held: usize) {
    let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
    if locks
      .get(endpoint_id)
      .is_some_and(|slot| Arc::strong_count(slot) == held + 1)
    {
      locks.remove(endpoint_id);
    }
  }

  /// Forget lock slots no caller holds or waits on.
  fn prune_idle_locks(&self) {
    let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
    locks.retain(|_, slot| Arc::strong_count(slot) > 1);
  }

  /// Get a copy of the cached result for an endpoint.
  pub fn get(&self, endpoint_id: &str) -> Option<EndpointResult> {
    let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
    entries.get(endpoint_id).cloned()
  }

  /// Insert or overwrite the entry for `result.endpoint_id`.
  pub fn insert(&self, result: EndpointResult) {
    let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
    entries.insert(result.endpoint_id.clone(), result);
  }

  /// Remove and return the entry for an endpoint.
  pub fn remove(&self, endpoint_id: &str) -> Option<EndpointResult> {
    let removed = {
      let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
      entries.remove(endpoint_id)
    };
    self.release_slot(endpoint_id, 0);
    removed
  }

  /// Ids of all cached endpoints, sorted.
  pub fn endpoint_ids(&self) -> Vec<String> {
    let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
    let mut ids: Vec<String> = entries.keys().cloned().collect();
    ids.sort();
    ids
  }

  pub fn len(&self) -> usize {
    self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Clear the cache.
  pub fn clear(&self) {
    {
      let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
      entries.clear();
    }
    self.prune_idle_locks();
  }
}

/// Exclusive access to one endpoint's cache entry. Released on drop.
pub struct EndpointLock<'a> {
  cache: &'a ResultCache,
  endpoint_id: String,
  _guard: OwnedMutexGuard<()>,
}

impl EndpointLock<'_> {
  pub fn endpoint_id(&self) -> &str {
    &self.endpoint_id
  }

  /// Copy of the cached entry, if any.
  pub fn get(&self) -> Option<EndpointResult> {
    self.cache.get(&self.endpoint_id)
  }

  /// Store `result` as the entry for this endpoint, replacing any previous one.
  pub fn commit(&self, mut result: EndpointResult) {
    result.endpoint_id = self.endpoint_id.clone();
    self.cache.insert(result);
  }

  /// Drop the entry for this endpoint.
  pub fn evict(&self) {
    self.cache.remove(&self.endpoint_id);
  }
}

impl Drop for EndpointLock<'_> {
  fn drop(&mut self) {
    // The guard still holds one reference to the slot.
    self.cache.release_slot(&self.endpoint_id, 1);
  }
}

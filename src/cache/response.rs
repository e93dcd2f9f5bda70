//! In-memory TTL cache for GET response bodies.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Cache lifetimes by endpoint prefix, checked in order.
pub const CACHE_TTLS: &[(&str, Duration)] = &[
  ("/api/groups", Duration::from_secs(60)),
  ("/api/mood-definitions", Duration::from_secs(300)),
  ("/api/statistics", Duration::from_secs(30)),
  ("/api/moods", Duration::from_secs(10)),
  ("/api/analytics/batch", Duration::from_secs(30)),
  ("/api/streak", Duration::from_secs(30)),
];

/// Default entry bound when none is configured.
pub const DEFAULT_MAX_ENTRIES: usize = 256;

/// Lifetime for responses of `endpoint`; zero means "do not cache".
pub fn ttl_for(endpoint: &str) -> Duration {
  CACHE_TTLS
    .iter()
    .find(|(prefix, _)| endpoint.starts_with(prefix))
    .map(|(_, ttl)| *ttl)
    .unwrap_or(Duration::ZERO)
}

#[derive(Debug, Clone)]
struct CacheEntry {
  data: Value,
  stored_at: Instant,
  ttl: Duration,
}

impl CacheEntry {
  fn is_expired(&self, now: Instant) -> bool {
    now.saturating_duration_since(self.stored_at) > self.ttl
  }
}

/// Response cache keyed by `METHOD:URL`.
///
/// Entries expire `ttl` after they were stored; reads never extend that.
/// With `max_entries` set, inserting a new key into a full cache drops
/// expired entries and then the oldest one.
#[derive(Debug)]
pub struct ResponseCache {
  entries: Mutex<HashMap<String, CacheEntry>>,
  max_entries: Option<usize>,
}

impl Default for ResponseCache {
  fn default() -> Self {
    Self::new(Some(DEFAULT_MAX_ENTRIES))
  }
}

impl ResponseCache {
  pub fn new(max_entries: Option<usize>) -> Self {
    Self {
      entries: Mutex::new(HashMap::new()),
      max_entries,
    }
  }

  pub fn unbounded() -> Self {
    Self::new(None)
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Cached value for `key`, evicting it if it has expired.
  pub fn get(&self, key: &str) -> Option<Value> {
    let mut entries = self.lock();
    if entries.get(key)?.is_expired(Instant::now()) {
      entries.remove(key);
      return None;
    }
    entries.get(key).map(|entry| entry.data.clone())
  }

  pub fn set(&self, key: &str, data: Value, ttl: Duration) {
    let mut entries = self.lock();

    if let Some(max) = self.max_entries {
      if !entries.contains_key(key) && entries.len() >= max {
        let now = Instant::now();
        entries.retain(|_, e| !e.is_expired(now));

        while entries.len() >= max {
          let oldest = entries
            .iter()
            .min_by_key(|(_, e)| e.stored_at)
            .map(|(k, _)| k.clone());
          match oldest {
            Some(k) => {
              entries.remove(&k);
            }
            None => break,
          }
        }
      }
    }

    entries.insert(
      key.to_string(),
      CacheEntry {
        data,
        stored_at: Instant::now(),
        ttl,
      },
    );
  }

  pub fn has(&self, key: &str) -> bool {
    self.get(key).is_some()
  }

  /// Drop every key containing `pattern`, or everything when `None`.
  pub fn invalidate(&self, pattern: Option<&str>) {
    let mut entries = self.lock();
    match pattern {
      Some(p) if !p.is_empty() => entries.retain(|key, _| !key.contains(p)),
      _ => entries.clear(),
    }
  }

  pub fn clear(&self) {
    self.lock().clear();
  }

  /// Number of stored entries, expired or not.
  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

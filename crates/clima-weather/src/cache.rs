//! Bounded in-memory cache for normalized weather records.
//!
//! Entries expire lazily after the configured TTL and are evicted
//! oldest-inserted-first (FIFO) once the entry count hits the cap.
//! Memory-only: nothing survives a process restart.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::types::WeatherData;

/// Cache observability snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
}

struct CacheEntry {
    data: WeatherData,
    stored_at: Instant,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    /// Insertion order; a key appears at most once (overwrites keep the
    /// original position, matching FIFO on first insertion).
    order: VecDeque<String>,
}

/// Bounded, time-expiring map from cache key to weather record.
pub struct WeatherCache {
    ttl: Duration,
    max_entries: usize,
    inner: Mutex<CacheInner>,
}

impl WeatherCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Look up a record. An entry older than the TTL is deleted as a side
    /// effect of the read and reported absent. The check-expire-delete
    /// sequence runs under a single lock.
    pub fn get(&self, key: &str) -> Option<WeatherData> {
        let mut inner = self.inner.lock();

        let expired = match inner.entries.get(key) {
            None => return None,
            Some(entry) => entry.stored_at.elapsed() > self.ttl,
        };

        if expired {
            inner.entries.remove(key);
            inner.order.retain(|k| k != key);
            tracing::debug!(key, "Cache entry expired");
            return None;
        }

        inner.entries.get(key).map(|e| e.data.clone())
    }

    /// Insert or overwrite a record with the current timestamp. When the
    /// cache is full and the key is new, the oldest-inserted entry is
    /// evicted first. Check-capacity-evict-insert runs under a single lock.
    pub fn set(&self, key: &str, data: WeatherData) {
        let mut inner = self.inner.lock();

        if !inner.entries.contains_key(key) {
            if inner.entries.len() >= self.max_entries {
                if let Some(oldest) = inner.order.pop_front() {
                    inner.entries.remove(&oldest);
                    tracing::debug!(evicted = %oldest, "Cache full, evicted oldest entry");
                }
            }
            inner.order.push_back(key.to_string());
        }

        inner.entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                stored_at: Instant::now(),
            },
        );
    }

    /// Remove all entries.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
        tracing::debug!("Cache cleared");
    }

    /// Current size against the configured cap. No side effects.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            size: inner.entries.len(),
            max_size: self.max_entries,
        }
    }
}

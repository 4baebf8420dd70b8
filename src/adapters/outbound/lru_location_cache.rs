//! LRU Location Cache
//!
//! Implements LocationCache with a bounded least-recently-used map.

use crate::domain::entities::LocationRecord;
use crate::domain::ports::LocationCache;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Bounded LRU cache of location records keyed by address string.
///
/// A single mutex guards the map: every `get` reorders recency, so reads
/// need exclusive access too. Lookups are short compared to request I/O.
/// A capacity of zero or less disables storage entirely.
pub struct LruLocationCache {
    entries: Option<Mutex<LruCache<String, Arc<LocationRecord>>>>,
}

impl LruLocationCache {
    /// Create a cache holding at most `capacity` records (≤ 0 disables it).
    pub fn new(capacity: i64) -> Self {
        let entries = usize::try_from(capacity)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(|cap| Mutex::new(LruCache::new(cap)));
        Self { entries }
    }

    /// Create a cache that never stores anything.
    pub fn disabled() -> Self {
        Self { entries: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    /// Whether `ip` is cached, without touching its recency.
    pub fn contains(&self, ip: &str) -> bool {
        self.entries
            .as_ref()
            .is_some_and(|entries| entries.lock().contains(ip))
    }

    /// Drop every cached record.
    pub fn clear(&self) {
        if let Some(entries) = &self.entries {
            entries.lock().clear();
        }
    }
}

impl LocationCache for LruLocationCache {
    fn get(&self, ip: &str) -> Option<Arc<LocationRecord>> {
        let entries = self.entries.as_ref()?;
        let hit = entries.lock().get(ip).cloned();
        tracing::trace!("location cache {} for {}", if hit.is_some() { "hit" } else { "miss" }, ip);
        hit
    }

    fn put(&self, ip: String, record: Arc<LocationRecord>) {
        let Some(entries) = &self.entries else {
            return;
        };
        // push also hands back the old pair when `ip` was already cached
        let inserted = ip.clone();
        if let Some((evicted, _)) = entries.lock().push(ip, record) {
            if evicted != inserted {
                tracing::trace!("location cache displaced {}", evicted);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |entries| entries.lock().len())
    }

    fn capacity(&self) -> usize {
        self.entries
            .as_ref()
            .map_or(0, |entries| entries.lock().cap().get())
    }
}

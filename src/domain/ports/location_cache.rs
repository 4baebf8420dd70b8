//! Location Cache Port
//!
//! Defines the interface for caching resolved records by address string.

use crate::domain::entities::LocationRecord;
use std::sync::Arc;

/// Bounded cache from address string to location record.
///
/// Implementations must tolerate concurrent `get`/`put` from many requests.
/// Cache operations never fail: a disabled cache always misses and
/// a full cache evicts before inserting.
pub trait LocationCache: Send + Sync {
    /// Get a cached record. A hit counts as a use.
    fn get(&self, ip: &str) -> Option<Arc<LocationRecord>>;

    /// Insert or replace a record.
    fn put(&self, ip: String, record: Arc<LocationRecord>);

    /// Number of cached records.
    fn len(&self) -> usize;

    /// Maximum number of records; 0 when caching is disabled.
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

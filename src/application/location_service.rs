//! Location Service - Main application use case
//!
//! Orchestrates resolution: address extraction, cache lookup, store
//! fallback and locale normalization. This is the primary interface for
//! the inbound adapter.

use crate::domain::entities::{LocationInfo, LocationRecord, NamedValue};
use crate::domain::errors::{LookupError, ResolveError};
use crate::domain::ports::{LocationCache, LocationStore};
use crate::domain::request::RequestContext;
use crate::domain::services::{AddressExtractor, HeaderFilter};
use chrono::Utc;
use std::net::IpAddr;
use std::sync::Arc;

/// Location service - main application use case.
///
/// Holds the process-wide state (store handle, cache, ignore set, trusted
/// header) constructed once at startup and shared by reference.
pub struct LocationService {
    store: Arc<dyn LocationStore>,
    cache: Arc<dyn LocationCache>,
    extractor: AddressExtractor,
    filter: HeaderFilter,
}

impl LocationService {
    /// Create a new location service.
    pub fn new(
        store: Arc<dyn LocationStore>,
        cache: Arc<dyn LocationCache>,
        extractor: AddressExtractor,
        filter: HeaderFilter,
    ) -> Self {
        Self {
            store,
            cache,
            extractor,
            filter,
        }
    }

    /// Resolve the caller of `request` to a normalized location.
    ///
    /// 1. Extracts the caller address (errors propagate unchanged)
    /// 2. Reads the record from the cache, or from the store on a miss
    /// 3. Picks one locale and builds the [`LocationInfo`]
    pub fn resolve(&self, request: &RequestContext) -> Result<LocationInfo, ResolveError> {
        let ip = self.extractor.extract(request)?;
        let record = self.record(&ip)?;
        Ok(LocationInfo::from_record(ip, &record, Utc::now()))
    }

    /// Raw record for an address string, through the cache.
    ///
    /// Store failures are returned as-is; they are neither retried nor
    /// cached.
    pub fn record(&self, ip: &str) -> Result<Arc<LocationRecord>, LookupError> {
        if let Some(record) = self.cache.get(ip) {
            return Ok(record);
        }

        let addr: IpAddr = ip
            .parse()
            .map_err(|_| LookupError::InvalidAddress(ip.to_string()))?;
        let record = Arc::new(self.store.lookup(addr)?);
        self.cache.put(ip.to_string(), Arc::clone(&record));
        Ok(record)
    }

    /// Request headers minus the ignore set, sorted by name.
    pub fn headers(&self, request: &RequestContext) -> Vec<NamedValue> {
        self.filter.headers(request)
    }

    /// Request parameters, sorted by name.
    pub fn params(&self, request: &RequestContext) -> Vec<NamedValue> {
        self.filter.params(request)
    }

    /// Number of cached records.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity()
    }
}

//! Location Store Port
//!
//! Defines the interface for resolving IP addresses to raw location records.

use crate::domain::entities::LocationRecord;
use crate::domain::errors::LookupError;
use std::net::IpAddr;

/// Backing geolocation database.
///
/// This is an outbound port that abstracts the GeoIP database.
/// Implementations may use MaxMind GeoLite2, an in-memory fixture, or
/// another database. Handles must be safe for concurrent reads; the
/// store is released when its last owner drops it.
pub trait LocationStore: Send + Sync {
    /// Look up the raw record for an address.
    ///
    /// Fails with [`LookupError::NotFound`] for unknown addresses and
    /// [`LookupError::Corrupt`] when the database cannot be decoded.
    fn lookup(&self, ip: IpAddr) -> Result<LocationRecord, LookupError>;
}

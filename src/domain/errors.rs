//! Domain Errors
//!
//! Every failure the resolution core can report. All of them are terminal
//! for the current request; nothing here is retried.

/// Failure to derive the caller's address from a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Transport peer address is not a `host:port` pair.
    #[error("malformed peer address: {0}")]
    Parse(String),
    /// The configured trusted header is missing or empty.
    #[error("not real ip header: {0}")]
    NoTrustedHeader(String),
}

/// Failure reported by a location store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The address string is not a valid IPv4/IPv6 address.
    #[error("invalid ip address: {0}")]
    InvalidAddress(String),
    /// The database has no record for the address.
    #[error("address not found: {0}")]
    NotFound(String),
    /// The database is unreadable or the record could not be decoded.
    #[error("location database error: {0}")]
    Corrupt(String),
}

/// Failure of a full resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

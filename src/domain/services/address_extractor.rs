//! Address Extractor - Domain service
//!
//! Derives the caller's IP address string from a request, either from
//! the transport peer address or from a configured trusted header.

use crate::domain::errors::AddressError;
use crate::domain::request::{canonical_header_name, RequestContext};

/// Caller address extraction.
///
/// A pure function of the request and the configured trusted header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressExtractor {
    trusted_header: Option<String>,
}

impl AddressExtractor {
    /// Create an extractor. A blank header name means "use the peer address".
    pub fn new(trusted_header: Option<String>) -> Self {
        let trusted_header = trusted_header
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .map(|h| canonical_header_name(&h));
        Self { trusted_header }
    }

    /// Configured trusted header, in canonical form.
    pub fn trusted_header(&self) -> Option<&str> {
        self.trusted_header.as_deref()
    }

    /// Extract the caller address.
    ///
    /// With a trusted header only its first value is used; there is no
    /// concatenation and no X-Forwarded-For chain parsing.
    pub fn extract(&self, request: &RequestContext) -> Result<String, AddressError> {
        match &self.trusted_header {
            None => split_host(request.remote_addr()).map(str::to_string),
            Some(header) => request
                .header_values(header)
                .and_then(|values| values.first())
                .filter(|value| !value.is_empty())
                .cloned()
                .ok_or_else(|| AddressError::NoTrustedHeader(header.clone())),
        }
    }
}

/// Host part of a `host:port` or `[host]:port` address.
fn split_host(addr: &str) -> Result<&str, AddressError> {
    let err = |reason: &str| AddressError::Parse(format!("address {}: {}", addr, reason));

    if let Some(rest) = addr.strip_prefix('[') {
        let end = rest.find(']').ok_or_else(|| err("missing ']' in address"))?;
        return match rest[end + 1..].strip_prefix(':') {
            Some(_) => Ok(&rest[..end]),
            None => Err(err("missing port in address")),
        };
    }

    let (host, _port) = addr
        .rsplit_once(':')
        .ok_or_else(|| err("missing port in address"))?;
    if host.contains(':') {
        return Err(err("too many colons in address"));
    }
    Ok(host)
}

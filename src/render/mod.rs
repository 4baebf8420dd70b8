//! Renderers
//!
//! Turn a resolved [`LocationInfo`](crate::domain::entities::LocationInfo)
//! into response bodies.

pub mod text;
pub mod xml;

use serde::Serialize;

/// Build metadata reported by the version endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: String,
    pub revision: String,
    pub build_date: String,
}

impl BuildInfo {
    /// Metadata baked in at compile time.
    ///
    /// `IPINFO_REVISION` and `IPINFO_BUILD_DATE` are read from the build
    /// environment; unset values render as "-".
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            revision: option_env!("IPINFO_REVISION").unwrap_or("-").to_string(),
            build_date: option_env!("IPINFO_BUILD_DATE").unwrap_or("-").to_string(),
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}

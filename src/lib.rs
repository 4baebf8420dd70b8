//! ipinfo Library
//!
//! Resolves the caller's IP address to a geographic location and serves
//! it over HTTP. Exposed as a library for integration tests and embedding.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod render;

// Re-export commonly used types
pub use application::LocationService;
pub use config::{load_config, Config};
pub use domain::entities::{LocationInfo, LocationRecord, NamedValue};
pub use domain::errors::{AddressError, LookupError, ResolveError};
pub use domain::ports::{LocationCache, LocationStore};
pub use domain::request::RequestContext;
pub use domain::services::{AddressExtractor, HeaderFilter};
pub use domain::value_objects::{IgnoreSet, Locale};

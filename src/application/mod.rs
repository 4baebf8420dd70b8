//! Application Layer
//!
//! Use cases that orchestrate domain services and ports.

mod location_service;

pub use location_service::LocationService;

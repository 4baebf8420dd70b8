//! Adapters Layer
//!
//! Inbound adapters drive the application (HTTP); outbound adapters
//! implement the domain ports (MaxMind database, in-memory store, LRU cache).

pub mod inbound;
pub mod outbound;

mod location_cache;
mod location_store;

pub use location_cache::LocationCache;
pub use location_store::LocationStore;

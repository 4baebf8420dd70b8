mod lru_location_cache;
mod maxmind_location_store;
mod memory_location_store;

pub use lru_location_cache::LruLocationCache;
pub use maxmind_location_store::MaxMindLocationStore;
pub use memory_location_store::MemoryLocationStore;

mod address_extractor;
mod header_filter;

pub use address_extractor::AddressExtractor;
pub use header_filter::{HeaderFilter, VALUE_SEPARATOR};

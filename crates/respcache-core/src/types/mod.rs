//! Core types for cache operations

mod entry;
mod key;
mod lookup;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use lookup::Lookup;

//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and tag-based invalidation.

pub mod global;
mod item;
mod options;
mod store;


// Re-export public types
pub(crate) use item::CacheItem;
pub use options::SetOptions;
pub use store::Store;

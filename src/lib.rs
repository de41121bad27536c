//! Cachestore - An in-process TTL key/value cache
//!
//! Stores values of any type under string keys, with optional expiry, tag-based
//! bulk invalidation, a disable switch and a background GC sweep.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{SetOptions, Store};
pub use config::StoreConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_gc_sweep;

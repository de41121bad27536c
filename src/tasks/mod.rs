//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - GC Sweep: Removes expired cache items at a configured interval

mod sweep;

pub use sweep::{run_gc_sweep, spawn_gc_sweep};

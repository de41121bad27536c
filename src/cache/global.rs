//! Process-wide Store
//!
//! A lazily built default `Store` plus free functions mirroring its methods,
//! for hosts that want one cache per process without threading a handle
//! through their code.
//!
//! ```
//! use cachestore::cache::global;
//!
//! global::set("config", 3u8, None);
//! assert_eq!(*global::get::<u8>("config").unwrap(), 3);
//! global::delete("config");
//! ```

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use tokio_util::sync::CancellationToken;

use crate::cache::{SetOptions, Store};
use crate::config::StoreConfig;
use crate::error::Result;

/// Built on first use; `CACHESTORE_DISABLED` sets its initial switch state.
static DEFAULT_STORE: Lazy<Store> = Lazy::new(|| Store::with_config(&StoreConfig::from_env()));

/// Returns the process-wide store.
pub fn default_store() -> &'static Store {
    &DEFAULT_STORE
}

/// Flips the process-wide disable switch.
pub fn set_disabled(disabled: bool) {
    DEFAULT_STORE.set_disabled(disabled);
}

/// Returns true while the process-wide store is disabled.
pub fn is_disabled() -> bool {
    DEFAULT_STORE.is_disabled()
}

/// Stores a value in the process-wide store.
pub fn set<T>(key: impl Into<String>, value: T, options: Option<SetOptions>)
where
    T: Any + Send + Sync,
{
    DEFAULT_STORE.set(key, value, options);
}

/// Reads a non-expired value from the process-wide store.
pub fn get<T>(key: &str) -> Result<Arc<T>>
where
    T: Any + Send + Sync,
{
    DEFAULT_STORE.get(key)
}

/// Reads a value from the process-wide store, ignoring expiry.
pub fn get_stale<T>(key: &str) -> Result<Arc<T>>
where
    T: Any + Send + Sync,
{
    DEFAULT_STORE.get_stale(key)
}

/// Removes one key from the process-wide store.
pub fn delete(key: &str) -> bool {
    DEFAULT_STORE.delete(key)
}

/// Removes every item with `tag` from the process-wide store.
pub fn delete_tag(tag: &str) -> usize {
    DEFAULT_STORE.delete_tag(tag)
}

/// Removes every item from the process-wide store.
pub fn clear() -> usize {
    DEFAULT_STORE.clear()
}

/// Reclaims expired items in the process-wide store.
pub fn gc() -> usize {
    DEFAULT_STORE.gc()
}

/// Runs the GC sweep over the process-wide store until `cancel` fires.
pub async fn run_gc_sweep(cancel: CancellationToken, interval: Duration) {
    DEFAULT_STORE.run_gc_sweep(cancel, interval).await;
}

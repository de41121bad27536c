//! Cache Store Module
//!
//! Main cache engine: a sharded concurrent map of items with TTL expiry,
//! tag-based invalidation and a disable switch.

use std::any::{type_name, Any};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::{CacheItem, SetOptions};
use crate::config::StoreConfig;
use crate::error::{CacheError, Result};
use crate::tasks;

/// Shared state behind every clone of a `Store`
#[derive(Debug)]
struct StoreInner {
    /// Key-item storage
    items: DashMap<String, CacheItem>,
    /// Disable switch consulted by `set`, `get` and `get_stale`
    disabled: AtomicBool,
}

// == Cache Store ==
/// Thread-safe in-memory cache with TTL, tags and a disable switch.
///
/// Cloning is cheap and yields a handle onto the same storage, so one clone
/// can be moved into the GC sweep while callers keep using another.
///
/// # Example
/// ```
/// use cachestore::{SetOptions, Store};
/// use std::time::Duration;
///
/// let store = Store::new();
/// store.set("user:1", String::from("Ada"), Some(SetOptions::tagged("users")));
/// store.set("motd", "hello", Some(SetOptions::expiring(Duration::from_secs(30))));
///
/// assert_eq!(*store.get::<String>("user:1").unwrap(), "Ada");
/// assert_eq!(store.delete_tag("users"), 1);
/// assert!(store.get::<String>("user:1").unwrap_err().is_not_found());
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    // == Constructor ==
    /// Creates an empty, enabled store.
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// Creates an empty store whose disable switch starts as configured.
    ///
    /// The GC interval is not used here; pass it to `run_gc_sweep`.
    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                items: DashMap::new(),
                disabled: AtomicBool::new(config.disabled),
            }),
        }
    }

    // == Disable Switch ==
    /// Turns caching off or back on.
    ///
    /// While disabled, `set` stores nothing and reads report not found.
    /// Existing items are kept and become visible again once re-enabled.
    pub fn set_disabled(&self, disabled: bool) {
        let previous = self.inner.disabled.swap(disabled, Ordering::SeqCst);
        if previous != disabled {
            info!(
                "Cache store {}",
                if disabled { "disabled" } else { "enabled" }
            );
        }
    }

    /// Returns true while the store is disabled.
    pub fn is_disabled(&self) -> bool {
        self.inner.disabled.load(Ordering::SeqCst)
    }

    // == Set ==
    /// Stores a value under `key`, replacing whatever item was there.
    ///
    /// Without options the item is untagged and never expires.
    /// Does nothing while the store is disabled.
    pub fn set<T>(&self, key: impl Into<String>, value: T, options: Option<SetOptions>)
    where
        T: Any + Send + Sync,
    {
        if self.is_disabled() {
            return;
        }
        let item = CacheItem::new(Arc::new(value), options.as_ref());
        self.inner.items.insert(key.into(), item);
    }

    // == Get ==
    /// Retrieves the value under `key` if present and not expired.
    ///
    /// Expired items are reported as not found but left in place for GC.
    pub fn get<T>(&self, key: &str) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.lookup(key, false)
    }

    // == Get Stale ==
    /// Retrieves the value under `key` regardless of expiry.
    pub fn get_stale<T>(&self, key: &str) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.lookup(key, true)
    }

    fn lookup<T>(&self, key: &str, allow_stale: bool) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        if self.is_disabled() {
            return Err(CacheError::NotFound(key.to_string()));
        }

        let item = self
            .inner
            .items
            .get(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;
        if !allow_stale && item.is_expired() {
            return Err(CacheError::NotFound(key.to_string()));
        }

        item.downcast::<T>().ok_or_else(|| CacheError::TypeMismatch {
            key: key.to_string(),
            expected: type_name::<T>(),
        })
    }

    // == Delete ==
    /// Removes the item under `key`.
    ///
    /// Returns true if an item (expired or not) was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.items.remove(key).is_some()
    }

    // == Delete Tag ==
    /// Removes every item tagged `tag` that existed when the call began.
    ///
    /// An empty `tag` matches untagged items. Returns the number removed.
    pub fn delete_tag(&self, tag: &str) -> usize {
        self.delete_tag_since(tag, Instant::now())
    }

    pub(crate) fn delete_tag_since(&self, tag: &str, start: Instant) -> usize {
        let removed = self.invalidate(start, |item| item.tag().unwrap_or("") == tag);
        debug!("Delete tag {:?}: removed {} items", tag, removed);
        removed
    }

    // == Clear ==
    /// Removes every item that existed when the call began.
    ///
    /// Returns the number removed.
    pub fn clear(&self) -> usize {
        self.clear_since(Instant::now())
    }

    pub(crate) fn clear_since(&self, start: Instant) -> usize {
        let removed = self.invalidate(start, |_| true);
        debug!("Clear: removed {} items", removed);
        removed
    }

    /// Bulk removal shared by `delete_tag` and `clear`.
    ///
    /// Items created after `start` were written concurrently with the
    /// invalidation and always survive it.
    fn invalidate<F>(&self, start: Instant, matches: F) -> usize
    where
        F: Fn(&CacheItem) -> bool,
    {
        let mut removed = 0;
        self.inner.items.retain(|_, item| {
            if item.created_after(start) || !matches(item) {
                return true;
            }
            removed += 1;
            false
        });
        removed
    }

    // == GC ==
    /// Removes all expired items.
    ///
    /// Returns the number of items removed.
    pub fn gc(&self) -> usize {
        let mut removed = 0;
        self.inner.items.retain(|_, item| {
            if item.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    // == GC Sweep ==
    /// Runs `gc` once per `interval` until `cancel` fires.
    ///
    /// Returns immediately when `interval` is zero.
    pub async fn run_gc_sweep(&self, cancel: CancellationToken, interval: Duration) {
        tasks::run_gc_sweep(self.clone(), cancel, interval).await;
    }

    // == Length ==
    /// Returns the number of stored items, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.inner.items.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.items.is_empty()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

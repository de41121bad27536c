//! Cache Item Module
//!
//! Defines the structure for individual cache items with tag and TTL support.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::cache::SetOptions;

/// Type-erased payload shared between the store and its readers
pub(crate) type Payload = Arc<dyn Any + Send + Sync>;

// == Cache Item ==
/// A single stored value with its metadata.
///
/// Items are immutable once built. Overwriting a key installs a new item;
/// nothing ever edits one in place.
pub(crate) struct CacheItem {
    value: Payload,
    tag: Option<String>,
    created_at: Instant,
    expires_at: Option<Instant>,
}

impl CacheItem {
    // == Constructor ==
    /// Creates a new item stamped with the current monotonic time.
    pub(crate) fn new(value: Payload, options: Option<&SetOptions>) -> Self {
        Self::new_at(value, options, Instant::now())
    }

    /// Creates an item with an explicit creation instant.
    ///
    /// `expires_at` is `created_at + ttl`; a zero TTL, or one that overflows
    /// the clock, leaves the item without an expiry.
    pub(crate) fn new_at(value: Payload, options: Option<&SetOptions>, now: Instant) -> Self {
        let tag = options
            .and_then(|o| o.tag.as_deref())
            .filter(|t| !t.is_empty())
            .map(str::to_owned);
        let expires_at = options
            .and_then(|o| o.ttl)
            .filter(|ttl| !ttl.is_zero())
            .and_then(|ttl| now.checked_add(ttl));

        Self {
            value,
            tag,
            created_at: now,
            expires_at,
        }
    }

    // == Accessors ==
    /// Returns the group tag, if any.
    pub(crate) fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns the payload as `T`, or None if it holds another type.
    pub(crate) fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    // == Expiry ==
    /// Checks if the item has expired.
    pub(crate) fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expired iff an expiry is set and `now` is strictly past it.
    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    // == Race Guard ==
    /// True if the item was inserted strictly after `start`.
    ///
    /// Bulk invalidations leave such items alone.
    pub(crate) fn created_after(&self, start: Instant) -> bool {
        self.created_at > start
    }
}

impl fmt::Debug for CacheItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheItem")
            .field("tag", &self.tag)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn payload<T: Any + Send + Sync>(value: T) -> Payload {
        Arc::new(value)
    }

    #[test]
    fn test_item_creation_no_options() {
        let item = CacheItem::new(payload("value"), None);

        assert!(item.tag().is_none());
        assert!(item.expires_at.is_none());
        assert!(!item.is_expired());
    }

    #[test]
    fn test_item_creation_with_ttl() {
        let opts = SetOptions::expiring(Duration::from_secs(60));
        let item = CacheItem::new(payload(1u32), Some(&opts));

        assert_eq!(
            item.expires_at,
            Some(item.created_at + Duration::from_secs(60))
        );
        assert!(!item.is_expired());
    }

    #[test]
    fn test_tag_only_options_never_expire() {
        let opts = SetOptions::tagged("users");
        let item = CacheItem::new(payload(1u32), Some(&opts));

        assert_eq!(item.tag(), Some("users"));
        assert!(item.expires_at.is_none());
    }

    #[test]
    fn test_raw_zero_ttl_and_empty_tag_are_ignored() {
        let opts = SetOptions {
            tag: Some(String::new()),
            ttl: Some(Duration::ZERO),
        };
        let item = CacheItem::new(payload(1u32), Some(&opts));

        assert!(item.tag().is_none());
        assert!(item.expires_at.is_none());
    }

    #[test]
    fn test_overflowing_ttl_never_expires() {
        let opts = SetOptions::expiring(Duration::MAX);
        let item = CacheItem::new(payload(1u32), Some(&opts));

        assert!(item.expires_at.is_none());
        assert!(!item.is_expired());
    }

    #[test]
    fn test_item_expiration() {
        let opts = SetOptions::expiring(Duration::from_millis(10));
        let item = CacheItem::new(payload("v"), Some(&opts));

        assert!(!item.is_expired());
        sleep(Duration::from_millis(20));
        assert!(item.is_expired());
    }

    #[test]
    fn test_expiration_boundary_is_strict() {
        let now = Instant::now();
        let opts = SetOptions::expiring(Duration::from_millis(5));
        let item = CacheItem::new_at(payload(1u8), Some(&opts), now);
        let expires = item.expires_at.unwrap();

        assert!(!item.is_expired_at(expires), "not expired exactly at expiry");
        assert!(item.is_expired_at(expires + Duration::from_nanos(1)));
    }

    #[test]
    fn test_created_after_is_strict() {
        let start = Instant::now();
        let same = CacheItem::new_at(payload(1u8), None, start);
        let later = CacheItem::new_at(payload(1u8), None, start + Duration::from_nanos(1));

        assert!(!same.created_after(start));
        assert!(later.created_after(start));
    }

    #[test]
    fn test_downcast() {
        let item = CacheItem::new(payload(String::from("hello")), None);

        assert_eq!(item.downcast::<String>().as_deref().map(String::as_str), Some("hello"));
        assert!(item.downcast::<u64>().is_none());
    }
}

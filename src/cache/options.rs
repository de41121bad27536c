//! Set Options Module
//!
//! Optional tag and TTL attached to an item when it is written.

use std::time::Duration;

// == Set Options ==
/// Options recognised by `Store::set`.
///
/// An empty tag means "untagged"; an absent or zero TTL means the item
/// never expires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Group label used by `delete_tag`
    pub tag: Option<String>,
    /// Time-to-live measured from insertion
    pub ttl: Option<Duration>,
}

impl SetOptions {
    /// Creates empty options: untagged, never expires.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for options carrying only a tag.
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self::new().with_tag(tag)
    }

    /// Shortcut for options carrying only a TTL.
    pub fn expiring(ttl: Duration) -> Self {
        Self::new().with_ttl(ttl)
    }

    /// Sets the tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tag = if tag.is_empty() { None } else { Some(tag) };
        self
    }

    /// Sets the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = if ttl.is_zero() { None } else { Some(ttl) };
        self
    }
}

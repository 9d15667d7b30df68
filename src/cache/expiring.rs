//! Single-slot cache with an absolute expiry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::trace;

use super::CacheConfig;

/// A value together with the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expiry: Instant,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, expiry: Instant) -> Self {
        Self { value, expiry }
    }

    /// Whether the entry is still valid at `now`.
    #[inline]
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now < self.expiry
    }

    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Instant::now())
    }
}

/// Thread-safe cache holding exactly one value.
///
/// This cache is:
/// - Single-slot: every `set` replaces the previous value, there are no keys
/// - Lazily expiring: expiry is checked on read, nothing runs in the background
/// - Read/write locked: readers share the lock, a writer excludes everyone
///
/// Callers that need one value per key wrap the key into `T` or keep one
/// instance per key.
pub struct ExpiringCache<T> {
    slot: RwLock<Option<CacheEntry<T>>>,
    ttl: Duration,
    name: Arc<str>,
}

impl<T> ExpiringCache<T> {
    /// Create an empty cache with the given name and config.
    pub fn new(name: impl Into<Arc<str>>, config: CacheConfig) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl: config.ttl,
            name: name.into(),
        }
    }

    /// Get the name of this cache.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time-to-live applied by [`insert`](Self::insert).
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Replace the stored value and its expiry.
    pub fn set(&self, value: T, expiry: Instant) {
        *self.slot.write() = Some(CacheEntry::new(value, expiry));
        trace!(cache = %self.name, "slot replaced");
    }

    /// Store a value that expires one TTL from now.
    pub fn insert(&self, value: T) {
        self.set(value, Instant::now() + self.ttl);
    }

    /// Whether the slot currently holds an unexpired value.
    pub fn is_fresh(&self) -> bool {
        self.slot.read().as_ref().is_some_and(CacheEntry::is_fresh)
    }

    /// Run `f` against the stored value if it is unexpired.
    ///
    /// The shared lock is held while `f` runs, so keep it short.
    pub fn with_fresh<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let slot = self.slot.read();
        match slot.as_ref() {
            Some(entry) if entry.is_fresh() => Some(f(&entry.value)),
            _ => None,
        }
    }
}

impl<T: Clone> ExpiringCache<T> {
    /// Get the stored value.
    ///
    /// Returns `Some(value)` only if the slot was set and hasn't expired.
    pub fn get(&self) -> Option<T> {
        self.with_fresh(T::clone)
    }
}

impl<T> std::fmt::Debug for ExpiringCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .field("fresh", &self.is_fresh())
            .finish()
    }
}

//! Cache module - expiring single-slot caches.
//!
//! The primitive here is [`ExpiringCache`], a read/write locked slot with an
//! absolute expiry. The decorators built on it live next to the backends
//! they wrap:
//! - `fetch::CachedFetcher` - document fetching
//! - `raid::CachedRaidRepository` - raid persistence
//! - `kiosk::KioskCache` - in-memory kiosk manager
//!
//! ## Usage
//!
//! ```rust
//! use wizlib::cache::{CacheConfig, ExpiringCache};
//!
//! let cache = ExpiringCache::new("rankings", CacheConfig::default());
//! cache.insert(42u32);
//! assert_eq!(cache.get(), Some(42));
//! ```

mod config;
mod expiring;

pub use config::CacheConfig;
pub use expiring::{CacheEntry, ExpiringCache};

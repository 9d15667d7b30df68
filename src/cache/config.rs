//! Cache configuration.

use std::time::Duration;

/// Configuration for an expiring cache instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a stored value stays valid after it is written.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300), // 5 minutes
        }
    }
}

impl CacheConfig {
    /// Create a config with the given time-to-live.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Set time-to-live (builder pattern).
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = duration;
        self
    }

    /// Config for raid rosters.
    /// Rosters change on member commands, which write through anyway.
    pub fn raids() -> Self {
        Self {
            ttl: Duration::from_secs(300), // 5 minutes
        }
    }

    /// Config for the kiosk snapshot.
    /// Short TTL, reads fall back to the manager which is in memory.
    pub fn kiosk() -> Self {
        Self {
            ttl: Duration::from_secs(60), // 1 minute
        }
    }
}

//! Kiosk manager behind an expiring snapshot.

use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use super::manager::KioskManager;
use super::models::{Kiosk, KioskItem};
use crate::cache::{CacheConfig, CacheEntry};
use crate::error::Result;

/// Manager and snapshot share one lock.
struct KioskState {
    manager: KioskManager,
    snapshot: Option<CacheEntry<Kiosk>>,
}

impl KioskState {
    fn fresh(&self) -> Option<&Kiosk> {
        self.snapshot
            .as_ref()
            .filter(|entry| entry.is_fresh())
            .map(|entry| &entry.value)
    }

    fn refresh(&mut self, ttl: Duration) -> &Kiosk {
        let entry = self
            .snapshot
            .insert(CacheEntry::new(self.manager.kiosk(), Instant::now() + ttl));
        &entry.value
    }
}

/// Thread-safe kiosk with cached reads.
///
/// The snapshot is a bare [`CacheEntry`] rather than an `ExpiringCache`:
/// the manager mutation and the snapshot refresh must happen under the same
/// lock, and `ExpiringCache` owns its lock.
///
/// Writes take the lock exclusively, mutate the manager and replace the
/// snapshot, so a read after a write never sees the old state. Reads take
/// the lock shared and are served from the snapshot while it is fresh.
pub struct KioskCache {
    state: RwLock<KioskState>,
    ttl: Duration,
}

impl KioskCache {
    /// Wrap a manager. The snapshot starts cold.
    pub fn new(manager: KioskManager, config: CacheConfig) -> Self {
        Self {
            state: RwLock::new(KioskState {
                manager,
                snapshot: None,
            }),
            ttl: config.ttl,
        }
    }

    /// Add or replace an item, returning the stored listing.
    /// On error the snapshot is left as it was.
    pub fn add_item(&self, name: &str, item_type: &str, item: KioskItem) -> Result<KioskItem> {
        let mut state = self.state.write();
        let stored = state.manager.add_item(name, item_type, item)?;
        state.refresh(self.ttl);
        Ok(stored)
    }

    /// Remove an item. On error the snapshot is left as it was.
    pub fn remove_item(&self, name: &str, item_type: &str) -> Result<()> {
        let mut state = self.state.write();
        state.manager.remove_item(name, item_type)?;
        state.refresh(self.ttl);
        Ok(())
    }

    /// Look an item up, from the snapshot if it has it, else from the manager.
    pub fn get_item(&self, name: &str) -> Result<KioskItem> {
        {
            let state = self.state.read();
            if let Some(item) = state.fresh().and_then(|k| k.find_item(name)) {
                debug!("Kiosk cache hit for {}", name);
                return Ok(item.clone());
            }
        }

        let mut state = self.state.write();
        let result = state.manager.get_item(name);
        state.refresh(self.ttl);
        result
    }

    /// Current kiosk, from the snapshot while fresh.
    pub fn kiosk(&self) -> Kiosk {
        {
            let state = self.state.read();
            if let Some(kiosk) = state.fresh() {
                return kiosk.clone();
            }
        }

        let mut state = self.state.write();
        // Another writer may have refreshed while we waited.
        if let Some(kiosk) = state.fresh() {
            return kiosk.clone();
        }
        debug!("Kiosk cache refreshed");
        state.refresh(self.ttl).clone()
    }

    /// `last_updated` of the cached snapshot, or 0 if the cache is cold.
    ///
    /// Only reads the snapshot; an expired snapshot yields 0 even though
    /// the manager has a value.
    pub fn last_updated(&self) -> i64 {
        self.state
            .read()
            .fresh()
            .map_or(0, |kiosk| kiosk.last_updated)
    }
}

impl std::fmt::Debug for KioskCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("KioskCache")
            .field("kiosk", &state.manager.id())
            .field("ttl", &self.ttl)
            .field("fresh", &state.fresh().is_some())
            .finish()
    }
}

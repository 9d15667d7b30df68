//! Raid persistence contract and its caching decorator.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::models::Raid;
use crate::cache::{CacheConfig, ExpiringCache};
use crate::error::Result;

/// Storage for raids, one per guild.
#[async_trait]
pub trait RaidRepository: Send + Sync {
    async fn get_raid(&self, guild_id: &str) -> Result<Raid>;

    async fn save_raid(&self, raid: &Raid) -> Result<()>;
}

#[async_trait]
impl<R: RaidRepository + ?Sized> RaidRepository for Arc<R> {
    async fn get_raid(&self, guild_id: &str) -> Result<Raid> {
        (**self).get_raid(guild_id).await
    }

    async fn save_raid(&self, raid: &Raid) -> Result<()> {
        (**self).save_raid(raid).await
    }
}

/// Read-through, write-through cache in front of a [`RaidRepository`].
///
/// The slot holds the last raid read or saved. A lookup for another guild
/// misses and the result takes over the slot.
pub struct CachedRaidRepository<R> {
    inner: R,
    cache: ExpiringCache<Raid>,
}

impl<R: RaidRepository> CachedRaidRepository<R> {
    pub fn new(inner: R, config: CacheConfig) -> Self {
        Self {
            inner,
            cache: ExpiringCache::new("raids", config),
        }
    }

    /// The wrapped repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn cached(&self, guild_id: &str) -> Option<Raid> {
        self.cache
            .with_fresh(|raid| (raid.guild_id == guild_id).then(|| raid.clone()))
            .flatten()
    }
}

#[async_trait]
impl<R: RaidRepository> RaidRepository for CachedRaidRepository<R> {
    async fn get_raid(&self, guild_id: &str) -> Result<Raid> {
        if let Some(raid) = self.cached(guild_id) {
            debug!("Raid cache hit for guild {}", guild_id);
            return Ok(raid);
        }

        let raid = self.inner.get_raid(guild_id).await?;
        self.cache.insert(raid.clone());
        debug!("Raid cache refreshed for guild {}", guild_id);

        Ok(raid)
    }

    async fn save_raid(&self, raid: &Raid) -> Result<()> {
        self.inner.save_raid(raid).await?;

        self.cache.insert(raid.clone());
        debug!("Raid cache written through for guild {}", raid.guild_id);

        Ok(())
    }
}

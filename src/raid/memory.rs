//! In-process raid store for development and tests.

use async_trait::async_trait;
use dashmap::DashMap;

use super::models::Raid;
use super::repository::RaidRepository;
use crate::error::Result;

/// Raid repository backed by a concurrent map.
///
/// Unknown guilds yield an empty raid, matching the MongoDB repository.
#[derive(Debug, Default)]
pub struct MemoryRaidRepository {
    raids: DashMap<String, Raid>,
}

impl MemoryRaidRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of guilds with a stored raid.
    pub fn len(&self) -> usize {
        self.raids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raids.is_empty()
    }
}

#[async_trait]
impl RaidRepository for MemoryRaidRepository {
    async fn get_raid(&self, guild_id: &str) -> Result<Raid> {
        Ok(self
            .raids
            .get(guild_id)
            .map(|r| r.value().clone())
            .unwrap_or_else(|| Raid::new(guild_id)))
    }

    async fn save_raid(&self, raid: &Raid) -> Result<()> {
        self.raids.insert(raid.guild_id.clone(), raid.clone());
        Ok(())
    }
}

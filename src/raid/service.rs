//! Raid operations on top of a repository.
//!
//! Every mutation loads the guild's raid, edits it and saves it back. With a
//! [`CachedRaidRepository`](super::CachedRaidRepository) underneath, the load
//! is usually a cache hit and the save refreshes the cache.

use tracing::debug;

use super::models::{Raid, RaidMember};
use super::repository::RaidRepository;
use crate::error::Result;

/// Raid use cases for one repository.
pub struct RaidService<R> {
    repository: R,
}

impl<R: RaidRepository> RaidService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn get_raid(&self, guild_id: &str) -> Result<Raid> {
        self.repository.get_raid(guild_id).await
    }

    pub async fn save_raid(&self, raid: &Raid) -> Result<()> {
        self.repository.save_raid(raid).await
    }

    /// Add a gate for `date`. Saves only if the gate is new.
    ///
    /// Returns the raid as stored afterwards.
    pub async fn add_gate(&self, guild_id: &str, date: &str) -> Result<Raid> {
        let mut raid = self.get_raid(guild_id).await?;

        if raid.add_gate(date) {
            self.save_raid(&raid).await?;
            debug!("Added gate {} to raid {}", date, guild_id);
        }

        Ok(raid)
    }

    /// Sign a user up for gate `gate_num` (1-based).
    pub async fn join_gate(
        &self,
        guild_id: &str,
        gate_num: usize,
        user_id: &str,
        raid_position: &str,
        backup: bool,
    ) -> Result<()> {
        let mut raid = self.get_raid(guild_id).await?;
        raid.gate_by_number_mut(gate_num)?
            .add_member(user_id, raid_position, backup);

        self.save_raid(&raid).await
    }

    /// Remove a user from gate `gate_num`.
    ///
    /// Returns the removed sign-up, or `None` if the user wasn't in the gate.
    pub async fn leave_gate(
        &self,
        guild_id: &str,
        gate_num: usize,
        user_id: &str,
    ) -> Result<Option<RaidMember>> {
        let mut raid = self.get_raid(guild_id).await?;
        let removed = raid.gate_by_number_mut(gate_num)?.remove_member(user_id);

        if removed.is_some() {
            self.save_raid(&raid).await?;
        }

        Ok(removed)
    }

    /// Set the status code of gate `gate_num`.
    pub async fn set_gate_status(&self, guild_id: &str, gate_num: usize, status: i64) -> Result<()> {
        let mut raid = self.get_raid(guild_id).await?;
        raid.gate_by_number_mut(gate_num)?.status = status;

        self.save_raid(&raid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::error::Error;
    use crate::raid::{CachedRaidRepository, MemoryRaidRepository, DEFAULT_GATE_STATUS};
    use std::sync::Arc;

    fn service() -> RaidService<CachedRaidRepository<Arc<MemoryRaidRepository>>> {
        let store = Arc::new(MemoryRaidRepository::new());
        RaidService::new(CachedRaidRepository::new(store, CacheConfig::raids()))
    }

    #[tokio::test]
    async fn test_add_gate_once() {
        let svc = service();

        svc.add_gate("g1", "2024-01-01").await.unwrap();
        let raid = svc.add_gate("g1", "2024-01-01").await.unwrap();

        assert_eq!(raid.gates.len(), 1);
        assert_eq!(raid.gates[0].status, DEFAULT_GATE_STATUS);

        let stored = svc.repository().inner().get_raid("g1").await.unwrap();
        assert_eq!(stored, raid);
    }

    #[tokio::test]
    async fn test_join_and_leave() {
        let svc = service();
        svc.add_gate("g1", "2024-01-01").await.unwrap();

        svc.join_gate("g1", 1, "u1", "healer", false).await.unwrap();
        let raid = svc.get_raid("g1").await.unwrap();
        let gate = raid.gate_by_number(1).unwrap();
        assert_eq!(gate.member("u1"), Some(&RaidMember::new("healer", false)));

        let removed = svc.leave_gate("g1", 1, "u1").await.unwrap();
        assert_eq!(removed, Some(RaidMember::new("healer", false)));

        let raid = svc.get_raid("g1").await.unwrap();
        assert_eq!(raid.gate_by_number(1).unwrap().member("u1"), None);

        assert_eq!(svc.leave_gate("g1", 1, "u1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_join_missing_gate() {
        let svc = service();

        let err = svc.join_gate("g1", 2, "u1", "tank", true).await.unwrap_err();
        assert!(err.is_not_found());

        let err = svc.join_gate("g1", 9, "u1", "tank", true).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        assert!(svc.repository().inner().is_empty());
    }

    #[tokio::test]
    async fn test_set_gate_status() {
        let svc = service();
        svc.add_gate("g1", "a").await.unwrap();
        svc.set_gate_status("g1", 1, 0x00FF00).await.unwrap();

        let stored = svc.repository().inner().get_raid("g1").await.unwrap();
        assert_eq!(stored.gates[0].status, 0x00FF00);
    }
}

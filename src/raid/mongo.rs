//! MongoDB-backed raid repository.

use anyhow::Context;
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ReplaceOptions;
use mongodb::Collection;
use tracing::debug;

use super::models::Raid;
use super::repository::RaidRepository;
use crate::database::Database;
use crate::error::Result;

/// Raids stored one document per guild in the `raids` collection.
pub struct MongoRaidRepository {
    collection: Collection<Raid>,
}

impl MongoRaidRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("raids"),
        }
    }
}

#[async_trait]
impl RaidRepository for MongoRaidRepository {
    /// Load a guild's raid, or an empty one if the guild has none yet.
    async fn get_raid(&self, guild_id: &str) -> Result<Raid> {
        let filter = doc! { "guild_id": guild_id };
        let result = self
            .collection
            .find_one(filter)
            .await
            .with_context(|| format!("failed to load raid for guild {guild_id}"))?;

        debug!("DB get raid for {}: {:?}", guild_id, result.is_some());
        Ok(result.unwrap_or_else(|| Raid::new(guild_id)))
    }

    /// Save a raid (upsert).
    async fn save_raid(&self, raid: &Raid) -> Result<()> {
        let filter = doc! { "guild_id": raid.guild_id.as_str() };
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(filter, raid)
            .with_options(options)
            .await
            .with_context(|| format!("failed to save raid for guild {}", raid.guild_id))?;

        debug!("Saved raid for {}", raid.guild_id);
        Ok(())
    }
}

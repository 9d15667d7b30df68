//! Executes console commands against the raid service and kiosk.

use anyhow::Context;

use super::parser::{Command, USAGE};
use crate::error::Result;
use crate::kiosk::{KioskCache, KioskItem};
use crate::raid::{RaidRepository, RaidService};

/// One console session: a raid service and the session's kiosk.
pub struct Session<R> {
    raids: RaidService<R>,
    kiosk: KioskCache,
}

impl<R: RaidRepository> Session<R> {
    pub fn new(raids: RaidService<R>, kiosk: KioskCache) -> Self {
        Self { raids, kiosk }
    }

    pub fn kiosk(&self) -> &KioskCache {
        &self.kiosk
    }

    /// Run a command and render its result as text.
    pub async fn execute(&self, command: Command) -> Result<String> {
        match command {
            Command::Help => Ok(USAGE.to_string()),
            Command::Quit => Ok("bye".to_string()),

            Command::RaidShow { guild_id } => {
                let raid = self.raids.get_raid(&guild_id).await?;
                render(&raid)
            }
            Command::RaidAddGate { guild_id, date } => {
                let raid = self.raids.add_gate(&guild_id, &date).await?;
                Ok(format!("raid {} has {} gate(s)", guild_id, raid.gates.len()))
            }
            Command::RaidJoin {
                guild_id,
                gate,
                user_id,
                position,
                backup,
            } => {
                self.raids
                    .join_gate(&guild_id, gate, &user_id, &position, backup)
                    .await?;
                let role = if backup { "backup " } else { "" };
                Ok(format!("{user_id} joined gate {gate} as {role}{position}"))
            }
            Command::RaidLeave {
                guild_id,
                gate,
                user_id,
            } => match self.raids.leave_gate(&guild_id, gate, &user_id).await? {
                Some(_) => Ok(format!("{user_id} left gate {gate}")),
                None => Ok(format!("{user_id} was not in gate {gate}")),
            },
            Command::RaidStatus {
                guild_id,
                gate,
                status,
            } => {
                self.raids.set_gate_status(&guild_id, gate, status).await?;
                Ok(format!("gate {gate} status set to {status:#08X}"))
            }

            Command::KioskAdd {
                item_type,
                name,
                price,
                stock,
            } => {
                let item = self
                    .kiosk
                    .add_item(&name, &item_type, KioskItem::new(price, stock))?;
                Ok(format!("{name}: {} in stock at {}", item.stock, item.price))
            }
            Command::KioskGet { name } => {
                let item = self.kiosk.get_item(&name)?;
                render(&item)
            }
            Command::KioskRemove { item_type, name } => {
                self.kiosk.remove_item(&name, &item_type)?;
                Ok(format!("removed {name} from {item_type}"))
            }
            Command::KioskShow => render(&self.kiosk.kiosk()),
            Command::KioskUpdated => Ok(self.kiosk.last_updated().to_string()),
        }
    }
}

fn render<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value).context("failed to render output")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::error::Error;
    use crate::kiosk::KioskManager;
    use crate::raid::{CachedRaidRepository, MemoryRaidRepository, Raid};

    type TestSession = Session<CachedRaidRepository<MemoryRaidRepository>>;

    fn session() -> TestSession {
        let raids = RaidService::new(CachedRaidRepository::new(
            MemoryRaidRepository::new(),
            CacheConfig::raids(),
        ));
        let kiosk = KioskCache::new(KioskManager::new("u1", "Stand"), CacheConfig::kiosk());
        Session::new(raids, kiosk)
    }

    async fn run(s: &TestSession, line: &str) -> Result<String> {
        let cmd = Command::parse(line)?.expect("non-blank line");
        s.execute(cmd).await
    }

    #[tokio::test]
    async fn test_raid_flow() {
        let s = session();

        assert_eq!(run(&s, "raid add-gate g1 2024-01-01").await.unwrap(), "raid g1 has 1 gate(s)");
        assert_eq!(run(&s, "raid add-gate g1 2024-01-01").await.unwrap(), "raid g1 has 1 gate(s)");

        run(&s, "raid join g1 1 u1 healer").await.unwrap();
        let shown = run(&s, "raid show g1").await.unwrap();
        let raid: Raid = serde_json::from_str(&shown).unwrap();
        assert_eq!(raid.gates[0].member("u1").unwrap().raid_position, "healer");

        assert_eq!(run(&s, "raid leave g1 1 u1").await.unwrap(), "u1 left gate 1");
        assert_eq!(run(&s, "raid leave g1 1 u1").await.unwrap(), "u1 was not in gate 1");

        assert_eq!(
            run(&s, "raid status g1 1 #FF0000").await.unwrap(),
            "gate 1 status set to 0xFF0000"
        );
    }

    #[tokio::test]
    async fn test_raid_errors_surface() {
        let s = session();
        let err = run(&s, "raid join g1 1 u1 healer").await.unwrap_err();
        assert!(err.is_not_found());

        let err = run(&s, "raid join g1 4 u1 healer").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_kiosk_flow() {
        let s = session();
        assert_eq!(run(&s, "kiosk updated").await.unwrap(), "0");

        assert_eq!(
            run(&s, r#"kiosk add reagent "Mist Wood" 120"#).await.unwrap(),
            "Mist Wood: 1 in stock at 120"
        );
        assert_ne!(run(&s, "kiosk updated").await.unwrap(), "0");

        let item: KioskItem =
            serde_json::from_str(&run(&s, r#"kiosk get "Mist Wood""#).await.unwrap()).unwrap();
        assert_eq!(item.price, 120);

        run(&s, r#"kiosk remove reagent "Mist Wood""#).await.unwrap();
        assert!(s.kiosk().kiosk().items.is_empty());

        let err = run(&s, "kiosk remove reagent Ore").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_kiosk_add_reports_its_own_type() {
        let s = session();

        run(&s, r#"kiosk add pet "Fire Cat" 10 5"#).await.unwrap();
        assert_eq!(
            run(&s, r#"kiosk add mount "Fire Cat" 999 7"#).await.unwrap(),
            "Fire Cat: 7 in stock at 999"
        );
        assert_eq!(s.kiosk().kiosk().items["pet"]["Fire Cat"].stock, 5);
    }

    #[tokio::test]
    async fn test_kiosk_add_rejects_negative_stock() {
        let s = session();
        run(&s, "kiosk add reagent Ore 10 3").await.unwrap();

        let err = run(&s, "kiosk add reagent Ore 10 -5").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(s.kiosk().get_item("Ore").unwrap().stock, 3);
    }
}

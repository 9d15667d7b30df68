//! Owner of the mutable kiosk state.

use tracing::debug;

use super::models::{Kiosk, KioskItem};
use crate::error::{Error, Result};

/// Holds the one live [`Kiosk`] of a marketplace session.
///
/// All mutation goes through these methods. [`kiosk`](Self::kiosk) hands out
/// an owned copy, so callers can't reach the internal maps.
#[derive(Debug, Default)]
pub struct KioskManager {
    kiosk: Kiosk,
}

impl KioskManager {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kiosk: Kiosk::new(id, title),
        }
    }

    /// Take over an existing kiosk, e.g. one loaded from storage.
    pub fn from_kiosk(kiosk: Kiosk) -> Self {
        Self { kiosk }
    }

    /// Add or replace an item under `item_type`, returning the stored listing.
    ///
    /// A name that is new to its type gets `stock = 1` when the given stock
    /// is zero or negative. Replacing an existing listing keeps the stock
    /// as given, which must not be negative.
    pub fn add_item(
        &mut self,
        name: &str,
        item_type: &str,
        mut item: KioskItem,
    ) -> Result<KioskItem> {
        let exists = self
            .kiosk
            .items
            .get(item_type)
            .is_some_and(|by_name| by_name.contains_key(name));

        if item.stock <= 0 && !exists {
            item.stock = 1;
        } else if item.stock < 0 {
            return Err(Error::invalid(format!(
                "stock must not be negative, got {}",
                item.stock
            )));
        }

        self.kiosk.last_updated = chrono::Utc::now().timestamp();
        self.kiosk
            .items
            .entry(item_type.to_string())
            .or_default()
            .insert(name.to_string(), item.clone());

        debug!("Kiosk {}: added {} under {}", self.kiosk.id, name, item_type);
        Ok(item)
    }

    /// Look an item up by name across all types.
    pub fn get_item(&self, name: &str) -> Result<KioskItem> {
        self.kiosk
            .find_item(name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("item {name}")))
    }

    /// Remove `name` from `item_type`, dropping the type once it is empty.
    ///
    /// Fails only if the type itself doesn't exist; a missing name under an
    /// existing type is not an error.
    pub fn remove_item(&mut self, name: &str, item_type: &str) -> Result<()> {
        let by_name = self
            .kiosk
            .items
            .get_mut(item_type)
            .ok_or_else(|| Error::not_found(format!("item type {item_type}")))?;

        by_name.remove(name);
        if by_name.is_empty() {
            self.kiosk.items.remove(item_type);
        }

        self.kiosk.last_updated = chrono::Utc::now().timestamp();
        debug!("Kiosk {}: removed {} from {}", self.kiosk.id, name, item_type);
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.kiosk.id
    }

    /// Copy of the current state.
    pub fn kiosk(&self) -> Kiosk {
        self.kiosk.clone()
    }

    pub fn last_updated(&self) -> i64 {
        self.kiosk.last_updated
    }
}

//! Kiosk (player marketplace) model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Items keyed by item type, then item name.
pub type KioskItems = HashMap<String, HashMap<String, KioskItem>>;

/// A listed item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KioskItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub stock: i64,
    pub price: i64,
    /// Unix timestamp of the last change to this listing.
    #[serde(default)]
    pub last_updated: i64,
}

impl KioskItem {
    pub fn new(price: i64, stock: i64) -> Self {
        Self {
            price,
            stock,
            ..Default::default()
        }
    }

    /// Set the image URL (builder pattern).
    #[must_use]
    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }
}

/// A player's kiosk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Kiosk {
    #[serde(rename = "user_id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub items: KioskItems,

    /// Unix timestamp of the last add/remove.
    #[serde(default)]
    pub last_updated: i64,
}

impl Kiosk {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Find an item by name in any item type.
    ///
    /// Names aren't unique across types; when several types list the same
    /// name, which one is returned is unspecified.
    pub fn find_item(&self, name: &str) -> Option<&KioskItem> {
        self.items.values().find_map(|by_name| by_name.get(name))
    }

    /// Total number of listings across all types.
    pub fn item_count(&self) -> usize {
        self.items.values().map(HashMap::len).sum()
    }
}

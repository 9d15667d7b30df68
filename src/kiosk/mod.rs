//! Kiosks: a player's marketplace listings.
//!
//! [`KioskManager`] owns the state; [`KioskCache`] puts an expiring
//! snapshot in front of it for concurrent readers.

mod cached;
mod manager;
mod models;

pub use cached::KioskCache;
pub use manager::KioskManager;
pub use models::{Kiosk, KioskItem, KioskItems};

//! Wizlib - game-data repositories with expiring caches.
//!
//! ## Architecture
//!
//! - `cache` - single-slot expiring cache primitive
//! - `fetch` - document fetcher contract and its caching decorator
//! - `raid` - raid rosters, persistence (MongoDB / memory) and cached repository
//! - `kiosk` - marketplace kiosk manager and its cached front
//! - `database` - MongoDB connection
//! - `console` - command parsing and execution for the CLI
//! - `config` - environment configuration
//! - `utils` - time parsing

pub mod cache;
pub mod config;
pub mod console;
pub mod database;
pub mod fetch;
pub mod kiosk;
pub mod raid;
pub mod utils;

mod error;

pub use error::{Error, Result};

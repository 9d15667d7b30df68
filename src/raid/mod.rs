//! Raid rosters: model, persistence and the cached repository.
//!
//! - `models` - `Raid`, `Gate`, `RaidMember`
//! - `repository` - `RaidRepository` contract and `CachedRaidRepository`
//! - `mongo` / `memory` - concrete stores
//! - `service` - gate and member use cases

mod memory;
mod models;
mod mongo;
mod repository;
mod service;

pub use memory::MemoryRaidRepository;
pub use models::{Gate, Raid, RaidMember, DEFAULT_GATE_STATUS, MAX_GATES};
pub use mongo::MongoRaidRepository;
pub use repository::{CachedRaidRepository, RaidRepository};
pub use service::RaidService;

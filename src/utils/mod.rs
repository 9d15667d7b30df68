//! Utility functions.

mod time;

pub use time::{parse_raid_time, RAID_TIME_FORMAT};

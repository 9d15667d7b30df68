//! Raid time parsing.
//!
//! Gate dates are stored as unix-second strings. Users type them as
//! `MM/DD/YYYY hh:mm:ss AM|PM ZONE`.

use chrono::{FixedOffset, NaiveDateTime};

use crate::error::{Error, Result};

/// Human-readable form of the accepted layout, used in error messages.
pub const RAID_TIME_FORMAT: &str = "MM/DD/YYYY hh:mm:ss PM MST";

const LAYOUT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Parse a raid time into a unix-seconds string.
pub fn parse_raid_time(input: &str) -> Result<String> {
    let invalid = || Error::invalid(format!("invalid time format: {RAID_TIME_FORMAT}"));

    let (stamp, zone) = input.trim().rsplit_once(' ').ok_or_else(invalid)?;
    let offset = zone_offset(zone).ok_or_else(invalid)?;
    let naive = NaiveDateTime::parse_from_str(stamp.trim(), LAYOUT).map_err(|_| invalid())?;
    let at = naive.and_local_timezone(offset).single().ok_or_else(invalid)?;

    Ok(at.timestamp().to_string())
}

fn zone_offset(abbr: &str) -> Option<FixedOffset> {
    let hours = match abbr.to_ascii_uppercase().as_str() {
        "UTC" | "GMT" => 0,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        _ => return None,
    };
    FixedOffset::east_opt(hours * 3600)
}

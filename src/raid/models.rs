//! Raid roster model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Status code given to freshly created gates (gold).
pub const DEFAULT_GATE_STATUS: i64 = 0xFFD700;

/// Gates are addressed by number, 1 through this value.
pub const MAX_GATES: usize = 3;

/// A member signed up for a gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidMember {
    pub raid_position: String,
    pub backup: bool,
}

impl RaidMember {
    pub fn new(raid_position: impl Into<String>, backup: bool) -> Self {
        Self {
            raid_position: raid_position.into(),
            backup,
        }
    }

    #[inline]
    pub fn is_backup(&self) -> bool {
        self.backup
    }
}

/// One scheduled run of a raid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Colour/state code shown for this gate.
    pub status: i64,

    /// Date key, usually unix seconds as a string.
    pub date: String,

    /// Sign-ups keyed by user ID.
    #[serde(default)]
    pub members: HashMap<String, RaidMember>,
}

impl Gate {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            status: DEFAULT_GATE_STATUS,
            date: date.into(),
            members: HashMap::new(),
        }
    }

    pub fn member(&self, user_id: &str) -> Option<&RaidMember> {
        self.members.get(user_id)
    }

    /// Add or replace a member's sign-up.
    pub fn add_member(&mut self, user_id: impl Into<String>, raid_position: impl Into<String>, backup: bool) {
        self.members
            .insert(user_id.into(), RaidMember::new(raid_position, backup));
    }

    /// Remove a member, returning the old sign-up if there was one.
    pub fn remove_member(&mut self, user_id: &str) -> Option<RaidMember> {
        self.members.remove(user_id)
    }
}

/// A guild's raid with its gates in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Raid {
    pub guild_id: String,

    #[serde(default)]
    pub gates: Vec<Gate>,
}

impl Raid {
    /// Create an empty raid for a guild.
    pub fn new(guild_id: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
            gates: Vec::new(),
        }
    }

    /// Find a gate by its date key.
    pub fn gate(&self, date: &str) -> Option<&Gate> {
        self.gates.iter().find(|g| g.date == date)
    }

    pub fn gate_mut(&mut self, date: &str) -> Option<&mut Gate> {
        self.gates.iter_mut().find(|g| g.date == date)
    }

    /// Add a gate for `date` unless one already exists.
    ///
    /// Returns `true` if a gate was created.
    pub fn add_gate(&mut self, date: impl Into<String>) -> bool {
        let date = date.into();
        if self.gate(&date).is_some() {
            return false;
        }
        self.gates.push(Gate::new(date));
        true
    }

    /// Get a gate by its 1-based number.
    pub fn gate_by_number(&self, gate_num: usize) -> Result<&Gate> {
        let idx = gate_index(gate_num)?;
        self.gates
            .get(idx)
            .ok_or_else(|| Error::not_found(format!("gate {gate_num}")))
    }

    pub fn gate_by_number_mut(&mut self, gate_num: usize) -> Result<&mut Gate> {
        let idx = gate_index(gate_num)?;
        self.gates
            .get_mut(idx)
            .ok_or_else(|| Error::not_found(format!("gate {gate_num}")))
    }
}

fn gate_index(gate_num: usize) -> Result<usize> {
    if !(1..=MAX_GATES).contains(&gate_num) {
        return Err(Error::invalid(format!(
            "invalid gate number: {gate_num}. Expected a number between 1 and {MAX_GATES}"
        )));
    }
    Ok(gate_num - 1)
}

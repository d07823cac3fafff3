//! Gear, mod set and relic definitions.

use serde::{Deserialize, Serialize};

use crate::stats::{Fixed, StatId, StatTable};

/// Stat deltas granted by one gear piece.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearDefinition {
    #[serde(default)]
    pub stats: StatTable,
}

/// Bonus granted for each completed mod set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModSetDefinition {
    /// Target stat id of the bonus.
    pub id: StatId,
    /// Pieces required to complete the set.
    pub count: u32,
    /// Unscaled bonus per completed set.
    pub value: Fixed,
}

/// Bonus base stats and growth-modifier deltas for one relic tier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicDefinition {
    #[serde(default)]
    pub stats: StatTable,
    /// Growth-modifier deltas.
    #[serde(default)]
    pub gms: StatTable,
}

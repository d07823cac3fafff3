//! Canonical unit configuration and the resolver that produces it.
//!
//! Every calculation starts from a [`UnitConfig`] (characters) or a
//! [`ShipConfig`] plus crew. Inputs arrive in several shapes ([`UnitRecord`])
//! and may carry hypothetical overrides ([`UseValues`]); [`UnitResolver`]
//! normalizes both into a fresh configuration owned by the call.
mod error;
mod mods;
mod overrides;
mod record;
mod resolve;

use serde::{Deserialize, Serialize};

pub use error::{RecordShape, ResolveError};
pub use mods::{DisplayMod, DisplayModStat, ModConfig, RawMod, scale_display_value};
pub use overrides::{
    GearOverride, OverrideTarget, ShipOverrides, SkillOverride, UnitOverrides, UseValues,
};
pub use record::{CanonicalUnit, ListApiUnit, ProfileUnit, RelicState, UnitRecord};
pub use resolve::{ResolvedShip, UnitResolver};

/// One equipped gear piece.
///
/// Placeholder pieces (from a crew gear-count override) have no id; they
/// count toward crew rating and galactic power but add no stats.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquippedGear {
    #[serde(default)]
    pub equipment_id: Option<String>,
    #[serde(default)]
    pub slot: Option<usize>,
}

impl EquippedGear {
    pub fn new(id: impl Into<String>, slot: usize) -> Self {
        Self {
            equipment_id: Some(id.into()),
            slot: Some(slot),
        }
    }

    pub fn placeholder(slot: usize) -> Self {
        Self {
            equipment_id: None,
            slot: Some(slot),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillConfig {
    pub id: String,
    pub tier: u8,
}

/// Canonical character configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitConfig {
    pub def_id: String,
    pub rarity: u8,
    pub level: u32,
    /// Gear tier.
    pub gear: u8,
    pub equipped: Vec<EquippedGear>,
    pub mods: Vec<ModConfig>,
    pub relic_tier: Option<u8>,
    pub skills: Vec<SkillConfig>,
    /// Ids of purchased ultimate abilities.
    pub purchased_abilities: Vec<String>,
}

/// Canonical ship configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShipConfig {
    pub def_id: String,
    pub rarity: u8,
    pub level: u32,
    pub skills: Vec<SkillConfig>,
}

//! Unit definitions: the static description of a character or ship.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::OracleError;
use super::tables::Lookup;
use crate::config::CalcConfig;
use crate::stats::{Coefficient, StatId, StatTable};

/// Whether a unit fights as a character or as a ship.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(try_from = "u8", into = "u8")]
#[strum(serialize_all = "snake_case")]
pub enum CombatType {
    #[default]
    Character,
    Ship,
}

impl TryFrom<u8> for CombatType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Character),
            2 => Ok(Self::Ship),
            other => Err(format!("unknown combat type {other}")),
        }
    }
}

impl From<CombatType> for u8 {
    fn from(value: CombatType) -> Self {
        match value {
            CombatType::Character => 1,
            CombatType::Ship => 2,
        }
    }
}

/// Base stats and gear-piece ids for one gear tier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GearLevel {
    /// Gear-piece ids by slot; ids at or above the sentinel mark unknown gear.
    #[serde(default)]
    pub gear: Vec<String>,
    #[serde(default)]
    pub stats: StatTable,
}

impl GearLevel {
    /// Gear ids that refer to real pieces, paired with their slot index.
    pub fn known_pieces(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.gear
            .iter()
            .enumerate()
            .filter(|(_, id)| !CalcConfig::is_sentinel_gear(id))
            .map(|(slot, id)| (slot, id.as_str()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDefinition {
    pub id: String,
    pub max_tier: u8,
    #[serde(default)]
    pub is_zeta: bool,
    /// Tier → power override tag (e.g. `"zeta"`, `"omicron"`,
    /// `"reinforcement_..."`).
    #[serde(default)]
    pub power_override_tags: Lookup<String>,
}

impl SkillDefinition {
    pub fn override_tag(&self, tier: u8) -> Option<&str> {
        self.power_override_tags.get(u32::from(tier)).map(String::as_str)
    }
}

/// Static definition of a unit.
///
/// Characters use `gear_levels`, `relic` and `mastery_modifier_id`; ships use
/// `stats`, `crew` and `crew_stats`. Both carry growth modifiers, skills and
/// a primary stat.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDefinition {
    pub combat_type: CombatType,
    #[serde(default)]
    pub primary_stat: Option<StatId>,
    #[serde(rename = "gearLvl", default)]
    pub gear_levels: Lookup<GearLevel>,
    /// Rarity → growth modifiers for strength/agility/tactics.
    #[serde(default)]
    pub growth_modifiers: Lookup<StatTable>,
    #[serde(default)]
    pub skills: Vec<SkillDefinition>,
    /// Relic tier → relic definition id.
    #[serde(default)]
    pub relic: Lookup<String>,
    #[serde(rename = "masteryModifierID", default)]
    pub mastery_modifier_id: Option<String>,
    /// Ship base stats.
    #[serde(default)]
    pub stats: StatTable,
    /// Ship stat contribution per point of crew rating.
    #[serde(default)]
    pub crew_stats: BTreeMap<StatId, Coefficient>,
    /// Declared crew roster (ships only).
    #[serde(default)]
    pub crew: Vec<String>,
}

impl UnitDefinition {
    pub fn is_ship(&self) -> bool {
        self.combat_type == CombatType::Ship
    }

    pub fn gear_level(&self, unit: &str, tier: u8) -> Result<&GearLevel, OracleError> {
        self.gear_levels
            .get(u32::from(tier))
            .ok_or_else(|| OracleError::GearTierNotFound {
                unit: unit.to_string(),
                tier,
            })
    }

    pub fn growth_modifiers_at(&self, unit: &str, rarity: u8) -> Result<&StatTable, OracleError> {
        self.growth_modifiers
            .get(u32::from(rarity))
            .ok_or_else(|| OracleError::GrowthModifiersNotFound {
                unit: unit.to_string(),
                rarity,
            })
    }

    pub fn primary(&self, unit: &str) -> Result<StatId, OracleError> {
        self.primary_stat
            .ok_or_else(|| OracleError::PrimaryStatNotFound(unit.to_string()))
    }

    pub fn relic_id(&self, unit: &str, tier: u8) -> Result<&str, OracleError> {
        self.relic
            .get(u32::from(tier))
            .map(String::as_str)
            .ok_or_else(|| OracleError::RelicTierNotFound {
                unit: unit.to_string(),
                tier,
            })
    }

    pub fn skill(&self, unit: &str, skill: &str) -> Result<&SkillDefinition, OracleError> {
        self.skills
            .iter()
            .find(|s| s.id == skill)
            .ok_or_else(|| OracleError::SkillNotFound {
                unit: unit.to_string(),
                skill: skill.to_string(),
            })
    }
}

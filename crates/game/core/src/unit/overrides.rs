//! Hypothetical configurations (`useValues`).
//!
//! Each override field replaces the owned value when present and non-zero,
//! and leaves it untouched otherwise. Gear and skill overrides accept a
//! keyword, a number or an explicit list, mirroring the request format.

use serde::{Deserialize, Serialize};

use super::{EquippedGear, ModConfig, ShipConfig, SkillConfig, UnitConfig};
use crate::config::CalcConfig;
use crate::env::{OracleError, SkillDefinition, UnitDefinition};

/// Overrides for the character, the ship and the ship's crew.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UseValues {
    #[serde(rename = "char")]
    pub character: Option<UnitOverrides>,
    pub ship: Option<ShipOverrides>,
    pub crew: Option<UnitOverrides>,
}

/// Where a [`UnitOverrides`] is being applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum OverrideTarget {
    Character,
    Crew,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitOverrides {
    pub rarity: Option<u8>,
    pub level: Option<u32>,
    pub gear: Option<u8>,
    pub relic: Option<u8>,
    pub equipped: Option<GearOverride>,
    pub skills: Option<SkillOverride>,
    /// Crew only: pips of the stand-in mods.
    pub mod_rarity: Option<u8>,
    /// Crew only: level of the stand-in mods.
    pub mod_level: Option<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipOverrides {
    pub rarity: Option<u8>,
    pub level: Option<u32>,
    pub skills: Option<SkillOverride>,
}

/// Equipped-gear override.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GearOverrideRepr", into = "GearOverrideRepr")]
pub enum GearOverride {
    /// Every known piece of the gear tier.
    All,
    None,
    /// 1-based slot numbers.
    Slots(Vec<usize>),
    /// Placeholder piece count; only meaningful for ship crew.
    Count(usize),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum GearOverrideRepr {
    Keyword(String),
    Slots(Vec<usize>),
    Count(usize),
}

impl TryFrom<GearOverrideRepr> for GearOverride {
    type Error = String;

    fn try_from(repr: GearOverrideRepr) -> Result<Self, Self::Error> {
        match repr {
            GearOverrideRepr::Keyword(word) => match word.as_str() {
                "all" => Ok(GearOverride::All),
                "none" => Ok(GearOverride::None),
                other => Err(format!("unknown gear override '{other}'")),
            },
            GearOverrideRepr::Slots(slots) => Ok(GearOverride::Slots(slots)),
            GearOverrideRepr::Count(count) => Ok(GearOverride::Count(count)),
        }
    }
}

impl From<GearOverride> for GearOverrideRepr {
    fn from(value: GearOverride) -> Self {
        match value {
            GearOverride::All => GearOverrideRepr::Keyword("all".into()),
            GearOverride::None => GearOverrideRepr::Keyword("none".into()),
            GearOverride::Slots(slots) => GearOverrideRepr::Slots(slots),
            GearOverride::Count(count) => GearOverrideRepr::Count(count),
        }
    }
}

/// Skill-tier override.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SkillOverrideRepr", into = "SkillOverrideRepr")]
pub enum SkillOverride {
    /// Same tier for every skill, capped at each skill's max tier.
    Tier(u8),
    Max,
    /// Max tier, one below for zeta skills.
    MaxNoZeta,
    Explicit(Vec<SkillConfig>),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum SkillOverrideRepr {
    Keyword(String),
    Tier(u8),
    Skills(Vec<SkillConfig>),
}

impl TryFrom<SkillOverrideRepr> for SkillOverride {
    type Error = String;

    fn try_from(repr: SkillOverrideRepr) -> Result<Self, Self::Error> {
        match repr {
            SkillOverrideRepr::Keyword(word) => match word.as_str() {
                "max" => Ok(SkillOverride::Max),
                "maxNoZeta" => Ok(SkillOverride::MaxNoZeta),
                other => Err(format!("unknown skill override '{other}'")),
            },
            SkillOverrideRepr::Tier(tier) => Ok(SkillOverride::Tier(tier)),
            SkillOverrideRepr::Skills(skills) => Ok(SkillOverride::Explicit(skills)),
        }
    }
}

impl From<SkillOverride> for SkillOverrideRepr {
    fn from(value: SkillOverride) -> Self {
        match value {
            SkillOverride::Tier(tier) => SkillOverrideRepr::Tier(tier),
            SkillOverride::Max => SkillOverrideRepr::Keyword("max".into()),
            SkillOverride::MaxNoZeta => SkillOverrideRepr::Keyword("maxNoZeta".into()),
            SkillOverride::Explicit(skills) => SkillOverrideRepr::Skills(skills),
        }
    }
}

impl SkillOverride {
    pub fn resolve(&self, def: &UnitDefinition) -> Vec<SkillConfig> {
        match self {
            SkillOverride::Tier(tier) => with_tiers(def, |skill| (*tier).min(skill.max_tier)),
            SkillOverride::Max => with_tiers(def, |skill| skill.max_tier),
            SkillOverride::MaxNoZeta => with_tiers(def, |skill| {
                skill.max_tier.saturating_sub(u8::from(skill.is_zeta))
            }),
            SkillOverride::Explicit(skills) => skills.clone(),
        }
    }
}

fn with_tiers(def: &UnitDefinition, tier: impl Fn(&SkillDefinition) -> u8) -> Vec<SkillConfig> {
    def.skills
        .iter()
        .map(|skill| SkillConfig {
            id: skill.id.clone(),
            tier: tier(skill),
        })
        .collect()
}

impl GearOverride {
    fn resolve(
        &self,
        def_id: &str,
        def: &UnitDefinition,
        gear: u8,
    ) -> Result<Vec<EquippedGear>, OracleError> {
        let equipped = match self {
            GearOverride::All => def
                .gear_level(def_id, gear)?
                .known_pieces()
                .map(|(slot, id)| EquippedGear::new(id, slot))
                .collect(),
            GearOverride::None => Vec::new(),
            GearOverride::Slots(slots) => {
                let level = def.gear_level(def_id, gear)?;
                slots
                    .iter()
                    .filter_map(|&slot| {
                        let index = slot.checked_sub(1)?;
                        let id = level.gear.get(index)?;
                        Some(EquippedGear::new(id, index))
                    })
                    .collect()
            }
            GearOverride::Count(count) => (0..*count).map(EquippedGear::placeholder).collect(),
        };
        Ok(equipped)
    }
}

impl UnitOverrides {
    /// Builds a crew member that was not supplied. Needs rarity, level and
    /// gear overrides.
    pub fn synthesize(&self, def_id: &str) -> Option<UnitConfig> {
        Some(UnitConfig {
            def_id: def_id.to_string(),
            rarity: given(self.rarity)?,
            level: given(self.level)?,
            gear: given(self.gear)?,
            ..UnitConfig::default()
        })
    }

    /// Applies the overrides to an owned configuration.
    ///
    /// # Errors
    ///
    /// Gear-tier lookups for `all` and slot-list overrides fail with
    /// `GearTierNotFound` when the tier is not defined.
    pub fn apply(
        &self,
        mut unit: UnitConfig,
        def: &UnitDefinition,
        target: OverrideTarget,
    ) -> Result<UnitConfig, OracleError> {
        if let Some(rarity) = given(self.rarity) {
            unit.rarity = rarity;
        }
        if let Some(level) = given(self.level) {
            unit.level = level;
        }
        if let Some(gear) = given(self.gear) {
            unit.gear = gear;
        }
        if let Some(tier) = given(self.relic) {
            unit.relic_tier = Some(tier);
        }

        match &self.equipped {
            Some(GearOverride::Count(count)) if target == OverrideTarget::Character => {
                tracing::warn!(
                    unit = %unit.def_id,
                    count,
                    "placeholder gear count applies to ship crew only; ignored"
                );
            }
            Some(equipped) => {
                unit.equipped = equipped.resolve(&unit.def_id, def, unit.gear)?;
            }
            None => {}
        }

        if let Some(skills) = &self.skills {
            unit.skills = skills.resolve(def);
        }

        let mod_rarity = given(self.mod_rarity);
        let mod_level = given(self.mod_level);
        if mod_rarity.is_some() || mod_level.is_some() {
            match target {
                OverrideTarget::Crew => {
                    let pips = mod_rarity.unwrap_or(CalcConfig::DEFAULT_STAND_IN_PIPS);
                    let level = mod_level.unwrap_or(CalcConfig::DEFAULT_STAND_IN_LEVEL);
                    unit.mods = vec![ModConfig::stand_in(pips, level); CalcConfig::STAND_IN_MOD_COUNT];
                }
                OverrideTarget::Character => {
                    tracing::warn!(
                        unit = %unit.def_id,
                        "mod rarity/level overrides apply to ship crew only; ignored"
                    );
                }
            }
        }

        Ok(unit)
    }
}

impl ShipOverrides {
    pub fn apply(&self, ship: &mut ShipConfig, def: &UnitDefinition) {
        if let Some(rarity) = given(self.rarity) {
            ship.rarity = rarity;
        }
        if let Some(level) = given(self.level) {
            ship.level = level;
        }
        if let Some(skills) = &self.skills {
            ship.skills = skills.resolve(def);
        }
    }
}

/// Zero counts as not given.
fn given<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

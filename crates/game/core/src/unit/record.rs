//! Input record shapes and their adapters to the canonical configuration.
//!
//! Shape detection happens once, in [`UnitRecord::from_json`], by looking at
//! the id field: `defId` is canonical, `definitionId` is a raw profile record.
//! List-API records carry no id of their own and are only built through
//! [`UnitRecord::from_list_api`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{RecordShape, ResolveError};
use super::mods::{DisplayMod, RawMod};
use super::{EquippedGear, ModConfig, ShipConfig, SkillConfig, UnitConfig};
use crate::config::CalcConfig;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelicState {
    pub current_tier: u8,
}

/// Already-normalized record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalUnit {
    pub def_id: String,
    pub rarity: u8,
    pub level: u32,
    #[serde(default)]
    pub gear: u8,
    #[serde(default)]
    pub equipped: Vec<EquippedGear>,
    #[serde(default)]
    pub mods: Option<Vec<DisplayMod>>,
    #[serde(default)]
    pub equipped_stat_mod: Option<Vec<RawMod>>,
    #[serde(default)]
    pub relic: Option<RelicState>,
    #[serde(default)]
    pub skills: Vec<SkillConfig>,
    #[serde(default)]
    pub purchased_ability_id: Vec<String>,
}

/// Raw player-profile record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUnit {
    /// `"UNIT_ID:SUFFIX"`.
    pub definition_id: String,
    pub current_rarity: u8,
    pub current_level: u32,
    #[serde(default)]
    pub current_tier: u8,
    #[serde(default)]
    pub equipment: Vec<EquippedGear>,
    #[serde(default)]
    pub equipped_stat_mod: Vec<RawMod>,
    #[serde(default)]
    pub relic: Option<RelicState>,
    /// Skill tiers in profile numbering.
    #[serde(default)]
    pub skill: Vec<SkillConfig>,
    #[serde(default)]
    pub purchased_ability_id: Vec<String>,
}

impl ProfileUnit {
    pub fn def_id(&self) -> &str {
        self.definition_id
            .split(':')
            .next()
            .unwrap_or(&self.definition_id)
    }

    fn skills(&self) -> Vec<SkillConfig> {
        self.skill
            .iter()
            .map(|skill| SkillConfig {
                id: skill.id.clone(),
                tier: skill.tier + CalcConfig::PROFILE_SKILL_TIER_OFFSET,
            })
            .collect()
    }
}

/// List-API record; the unit id is the key it was listed under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApiUnit {
    pub star_level: u8,
    pub level: u32,
    #[serde(default)]
    pub gear_level: u8,
    /// Equipped gear ids; the slot is the position.
    #[serde(default)]
    pub gear: Vec<String>,
    #[serde(default)]
    pub mods: Vec<DisplayMod>,
}

/// A unit record in any supported input shape.
#[derive(Clone, Debug, PartialEq)]
pub enum UnitRecord {
    Canonical(CanonicalUnit),
    Profile(ProfileUnit),
    ListApi { def_id: String, unit: ListApiUnit },
}

impl UnitRecord {
    /// Detects the shape of a JSON record and parses it.
    ///
    /// # Errors
    ///
    /// `UnrecognizedShape` if neither id field is present, `InvalidRecord`
    /// if the fields do not match the detected shape.
    pub fn from_json(value: &Value) -> Result<Self, ResolveError> {
        if value.get("defId").is_some() {
            let unit = CanonicalUnit::deserialize(value)
                .map_err(|err| invalid(RecordShape::Canonical, err))?;
            return Ok(Self::Canonical(unit));
        }
        if value.get("definitionId").is_some() {
            let unit = ProfileUnit::deserialize(value)
                .map_err(|err| invalid(RecordShape::Profile, err))?;
            if unit.def_id().is_empty() {
                return Err(ResolveError::InvalidDefinitionId(unit.definition_id));
            }
            return Ok(Self::Profile(unit));
        }
        Err(ResolveError::UnrecognizedShape)
    }

    /// Parses one list-API record listed under `def_id`.
    pub fn from_list_api(def_id: &str, value: &Value) -> Result<Self, ResolveError> {
        let unit =
            ListApiUnit::deserialize(value).map_err(|err| invalid(RecordShape::ListApi, err))?;
        Ok(Self::ListApi {
            def_id: def_id.to_string(),
            unit,
        })
    }

    pub fn shape(&self) -> RecordShape {
        match self {
            UnitRecord::Canonical(_) => RecordShape::Canonical,
            UnitRecord::Profile(_) => RecordShape::Profile,
            UnitRecord::ListApi { .. } => RecordShape::ListApi,
        }
    }

    pub fn def_id(&self) -> &str {
        match self {
            UnitRecord::Canonical(unit) => &unit.def_id,
            UnitRecord::Profile(unit) => unit.def_id(),
            UnitRecord::ListApi { def_id, .. } => def_id,
        }
    }
}

fn invalid(shape: RecordShape, err: serde_json::Error) -> ResolveError {
    ResolveError::InvalidRecord {
        shape,
        message: err.to_string(),
    }
}

/// Display mods win over raw mods when both are present.
fn collect_mods(
    display: Option<&[DisplayMod]>,
    raw: Option<&[RawMod]>,
) -> Result<Vec<ModConfig>, ResolveError> {
    match (display, raw) {
        (Some(mods), _) => Ok(mods.iter().map(DisplayMod::to_config).collect()),
        (None, Some(mods)) => mods.iter().map(RawMod::to_config).collect(),
        (None, None) => Ok(Vec::new()),
    }
}

impl TryFrom<CanonicalUnit> for UnitConfig {
    type Error = ResolveError;

    fn try_from(unit: CanonicalUnit) -> Result<Self, Self::Error> {
        let mods = collect_mods(unit.mods.as_deref(), unit.equipped_stat_mod.as_deref())?;
        Ok(UnitConfig {
            def_id: unit.def_id,
            rarity: unit.rarity,
            level: unit.level,
            gear: unit.gear,
            equipped: unit.equipped,
            mods,
            relic_tier: unit.relic.map(|relic| relic.current_tier),
            skills: unit.skills,
            purchased_abilities: unit.purchased_ability_id,
        })
    }
}

impl TryFrom<ProfileUnit> for UnitConfig {
    type Error = ResolveError;

    fn try_from(unit: ProfileUnit) -> Result<Self, Self::Error> {
        let mods = collect_mods(None, Some(&unit.equipped_stat_mod))?;
        let skills = unit.skills();
        Ok(UnitConfig {
            def_id: unit.def_id().to_string(),
            rarity: unit.current_rarity,
            level: unit.current_level,
            gear: unit.current_tier,
            equipped: unit.equipment,
            mods,
            relic_tier: unit.relic.map(|relic| relic.current_tier),
            skills,
            purchased_abilities: unit.purchased_ability_id,
        })
    }
}

impl UnitConfig {
    fn from_list_api(def_id: String, unit: ListApiUnit) -> Self {
        let equipped = unit
            .gear
            .into_iter()
            .enumerate()
            .map(|(slot, id)| EquippedGear::new(id, slot))
            .collect();
        UnitConfig {
            def_id,
            rarity: unit.star_level,
            level: unit.level,
            gear: unit.gear_level,
            equipped,
            mods: unit.mods.iter().map(DisplayMod::to_config).collect(),
            relic_tier: None,
            skills: Vec::new(),
            purchased_abilities: Vec::new(),
        }
    }
}

impl TryFrom<UnitRecord> for UnitConfig {
    type Error = ResolveError;

    fn try_from(record: UnitRecord) -> Result<Self, Self::Error> {
        match record {
            UnitRecord::Canonical(unit) => unit.try_into(),
            UnitRecord::Profile(unit) => unit.try_into(),
            UnitRecord::ListApi { def_id, unit } => Ok(UnitConfig::from_list_api(def_id, unit)),
        }
    }
}

impl From<UnitRecord> for ShipConfig {
    fn from(record: UnitRecord) -> Self {
        match record {
            UnitRecord::Canonical(unit) => ShipConfig {
                def_id: unit.def_id,
                rarity: unit.rarity,
                level: unit.level,
                skills: unit.skills,
            },
            UnitRecord::Profile(unit) => ShipConfig {
                def_id: unit.def_id().to_string(),
                rarity: unit.current_rarity,
                level: unit.current_level,
                skills: unit.skills(),
            },
            UnitRecord::ListApi { def_id, unit } => ShipConfig {
                def_id,
                rarity: unit.star_level,
                level: unit.level,
                skills: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn detects_canonical_records() {
        let value = json!({
            "defId": "HERO", "rarity": 7, "level": 85, "gear": 12,
            "equipped": [{"equipmentId": "101", "slot": 0}],
            "relic": {"currentTier": 5},
            "skills": [{"id": "basic", "tier": 8}]
        });
        let record = UnitRecord::from_json(&value).unwrap();
        assert_eq!(record.shape(), RecordShape::Canonical);
        let config = UnitConfig::try_from(record).unwrap();
        assert_eq!(config.def_id, "HERO");
        assert_eq!(config.relic_tier, Some(5));
        assert_eq!(config.skills[0].tier, 8);
    }

    #[test]
    fn profile_records_are_renamed_and_offset() {
        let value = json!({
            "definitionId": "HERO:SEVEN_STAR",
            "currentRarity": 7, "currentLevel": 85, "currentTier": 13,
            "equipment": [], "skill": [{"id": "basic", "tier": 6}],
            "equippedStatMod": [{
                "definitionId": "251", "level": 15, "tier": 5,
                "primaryStat": {"stat": {"unitStatId": 5, "unscaledDecimalValue": "3000000000"}}
            }]
        });
        let record = UnitRecord::from_json(&value).unwrap();
        assert_eq!(record.def_id(), "HERO");
        let config = UnitConfig::try_from(record).unwrap();
        assert_eq!(config.gear, 13);
        assert_eq!(config.skills[0].tier, 8);
        assert_eq!(config.mods[0].set, Some(2));
        assert_eq!(config.mods[0].pips, 5);
    }

    #[test]
    fn records_without_an_id_are_rejected() {
        let err = UnitRecord::from_json(&json!({"rarity": 7})).unwrap_err();
        assert_eq!(err, ResolveError::UnrecognizedShape);
    }

    #[test]
    fn malformed_records_report_their_shape() {
        let err = UnitRecord::from_json(&json!({"defId": "HERO"})).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidRecord {
                shape: RecordShape::Canonical,
                ..
            }
        ));
    }

    #[test]
    fn list_api_gear_slots_follow_position() {
        let value = json!({
            "starLevel": 7, "level": 85, "gearLevel": 12,
            "gear": ["101", "102"], "mods": [{}]
        });
        let record = UnitRecord::from_list_api("HERO", &value).unwrap();
        let config = UnitConfig::try_from(record).unwrap();
        assert_eq!(config.rarity, 7);
        assert_eq!(config.equipped[1].slot, Some(1));
        assert!(config.mods[0].is_placeholder());
    }

    #[test]
    fn profile_ships_offset_skill_tiers() {
        let value = json!({
            "definitionId": "SHIP:SEVEN_STAR",
            "currentRarity": 7, "currentLevel": 85,
            "skill": [{"id": "hardware", "tier": 1}]
        });
        let ship = ShipConfig::from(UnitRecord::from_json(&value).unwrap());
        assert_eq!(ship.def_id, "SHIP");
        assert_eq!(ship.skills[0].tier, 3);
    }
}

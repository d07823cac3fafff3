//! Galactic power.
//!
//! Power is an integer: every formula sums table coefficients and floors the
//! total after the final 1.5 multiplier. Ship power depends on the power of
//! each crew member, so crew are scored with the character formula first.

use crate::config::CalcConfig;
use crate::env::{GameData, GpTables, OracleError, UnitDefinition};
use crate::error::CalcError;
use crate::stats::{Coefficient, validate_crew};
use crate::unit::{ShipConfig, SkillConfig, UnitConfig};

fn final_multiplier() -> Coefficient {
    Coefficient::from_ratio(3, 2)
}

/// Computes galactic power from resolved configurations.
#[derive(Clone, Copy, Debug)]
pub struct PowerCalculator<'a> {
    data: &'a GameData,
}

impl<'a> PowerCalculator<'a> {
    pub fn new(data: &'a GameData) -> Self {
        Self { data }
    }

    fn tables(&self) -> &'a GpTables {
        &self.data.gp_tables
    }

    /// Character power.
    ///
    /// # Errors
    ///
    /// Unknown unit or skill, or a missing level, rarity, gear, mod, relic or
    /// special-tag entry. A missing ability tier counts as zero.
    pub fn character(&self, unit: &UnitConfig) -> Result<i64, CalcError> {
        let def = self.data.unit(&unit.def_id)?;
        let tables = self.tables();
        let gear = u32::from(unit.gear);

        let mut power = tables.unit_level.value(unit.level, "unitLevelGP")?
            + tables.unit_rarity.value(u32::from(unit.rarity), "unitRarityGP")?
            + tables.gear_level.value(gear, "gearLevelGP")?;

        if !unit.equipped.is_empty() {
            let pieces = tables.gear_piece.at(gear, "gearPieceGP")?;
            for (index, piece) in unit.equipped.iter().enumerate() {
                let slot = piece.slot.unwrap_or(index) as u32;
                power += pieces.value(slot, "gearPieceGP")?;
            }
        }

        for skill in &unit.skills {
            power += self.skill(&unit.def_id, def, skill)?;
        }

        if !unit.purchased_abilities.is_empty() {
            power += tables
                .special(CalcConfig::ULTIMATE_TAG)?
                .mul_int(unit.purchased_abilities.len() as i64);
        }

        for m in unit.mods.iter().filter(|m| !m.is_placeholder()) {
            power += tables
                .mod_rarity_level_tier
                .at(u32::from(m.pips), "modRarityLevelTierGP")?
                .at(u32::from(m.level), "modRarityLevelTierGP")?
                .value(u32::from(m.tier), "modRarityLevelTierGP")?;
        }

        if let Some(tier) = CalcConfig::active_relic(unit.relic_tier) {
            let tier = u32::from(tier);
            power += tables.relic_tier.value(tier, "relicTierGP")?;
            power += tables
                .relic_tier_level_factor
                .value(tier, "relicTierLevelFactor")?
                .mul_int(i64::from(unit.level));
        }

        Ok(power.mul(final_multiplier()).floor())
    }

    /// Ship power; crewless ships use the approximate crewless formula.
    ///
    /// # Errors
    ///
    /// Crew count or membership mismatch, plus every character-power error
    /// for the crew.
    pub fn ship(&self, ship: &ShipConfig, crew: &[UnitConfig]) -> Result<i64, CalcError> {
        let def = self.data.unit(&ship.def_id)?;
        validate_crew(&ship.def_id, def, crew)?;

        if crew.is_empty() {
            return self.crewless_ship(ship, def);
        }

        let tables = self.tables();
        let crew_power: i64 = crew
            .iter()
            .map(|member| self.character(member))
            .sum::<Result<_, _>>()?;

        let mut power = Coefficient::from_int(crew_power)
            .mul(
                tables
                    .ship_rarity_factor
                    .value(u32::from(ship.rarity), "shipRarityFactor")?,
            )
            .mul(
                tables
                    .crew_size_factor
                    .value(crew.len() as u32, "crewSizeFactor")?,
            );
        power += tables.unit_level.value(ship.level, "unitLevelGP")?;
        for skill in &ship.skills {
            power += self.skill(&ship.def_id, def, skill)?;
        }

        tracing::debug!(ship = %ship.def_id, crew_power, "computed crew power");

        Ok(power.mul(final_multiplier()).floor())
    }

    /// Approximation measured on the first crewless ships; kept as measured.
    fn crewless_ship(&self, ship: &ShipConfig, def: &UnitDefinition) -> Result<i64, CalcError> {
        let tables = self.tables();
        let mut ability = Coefficient::ZERO;
        let mut reinforcement = Coefficient::ZERO;
        for skill in &ship.skills {
            let tag = def.skill(&ship.def_id, &skill.id)?.override_tag(skill.tier);
            match tag {
                Some(tag) if tag.starts_with(CalcConfig::REINFORCEMENT_TAG_PREFIX) => {
                    reinforcement += tables.special(tag)?;
                }
                Some(tag) => ability += tables.special(tag)?,
                None => ability += ability_level(tables, skill.tier),
            }
        }

        let level = tables.unit_level.value(ship.level, "unitLevelGP")?;
        let rarity_factor = tables
            .ship_rarity_factor
            .value(u32::from(ship.rarity), "shipRarityFactor")?;

        let weighted = level.mul(Coefficient::from_ratio(7, 2))
            + ability.mul(Coefficient::from_ratio(574, 100))
            + reinforcement.mul(Coefficient::from_ratio(161, 100));
        let power = weighted.mul(rarity_factor) + level + ability + reinforcement;

        Ok(power.mul(final_multiplier()).floor())
    }

    fn skill(
        &self,
        unit_id: &str,
        def: &UnitDefinition,
        skill: &SkillConfig,
    ) -> Result<Coefficient, OracleError> {
        let tables = self.tables();
        match def.skill(unit_id, &skill.id)?.override_tag(skill.tier) {
            Some(tag) => tables.special(tag),
            None => Ok(ability_level(tables, skill.tier)),
        }
    }
}

fn ability_level(tables: &GpTables, tier: u8) -> Coefficient {
    tables
        .ability_level
        .get(u32::from(tier))
        .copied()
        .unwrap_or_default()
}

//! Crew rating: the scalar that scales a ship's crew stats.
//!
//! A crewed ship sums the rating of every member. Crewless ships use a fixed
//! approximation of the in-game formula that matches the first crewless ships
//! observed; it is kept exactly as measured.

use super::fixed::Coefficient;
use crate::config::CalcConfig;
use crate::env::{CrTables, OracleError, UnitDefinition};
use crate::error::CalcError;
use crate::unit::{ShipConfig, UnitConfig};

/// Checks that `crew` is exactly the ship's declared roster (as a multiset).
///
/// # Errors
///
/// `CrewCount` when the sizes differ, `CrewMembership` for the first member
/// that does not match a remaining roster slot.
pub fn validate_crew(
    ship_id: &str,
    def: &UnitDefinition,
    crew: &[UnitConfig],
) -> Result<(), CalcError> {
    if crew.len() != def.crew.len() {
        return Err(CalcError::CrewCount {
            ship: ship_id.to_string(),
            expected: def.crew.len(),
            actual: crew.len(),
        });
    }
    let mut remaining: Vec<&str> = def.crew.iter().map(String::as_str).collect();
    for member in crew {
        match remaining.iter().position(|id| *id == member.def_id) {
            Some(index) => {
                remaining.swap_remove(index);
            }
            None => {
                return Err(CalcError::CrewMembership {
                    ship: ship_id.to_string(),
                    unit: member.def_id.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Total crew rating of a crewed ship.
///
/// # Errors
///
/// `TableEntryNotFound` for any level, rarity, gear tier, skill tier, mod or
/// relic key missing from the crew-rating tables.
pub fn crew_rating(tables: &CrTables, crew: &[UnitConfig]) -> Result<Coefficient, OracleError> {
    crew.iter()
        .map(|member| member_rating(tables, member))
        .sum()
}

fn member_rating(tables: &CrTables, member: &UnitConfig) -> Result<Coefficient, OracleError> {
    let gear = u32::from(member.gear);
    let mut rating = tables.unit_level.value(member.level, "unitLevelCR")?
        + tables.crew_rarity.value(u32::from(member.rarity), "crewRarityCR")?
        + tables.gear_level.value(gear, "gearLevelCR")?;

    if let Some(&per_piece) = tables.gear_piece.get(gear) {
        rating += per_piece.mul_int(member.equipped.len() as i64);
    }

    for skill in &member.skills {
        rating += tables
            .ability_level
            .value(u32::from(skill.tier), "abilityLevelCR")?;
    }

    for m in member.mods.iter().filter(|m| !m.is_placeholder()) {
        rating += tables
            .mod_rarity_level
            .at(u32::from(m.pips), "modRarityLevelCR")?
            .value(u32::from(m.level), "modRarityLevelCR")?;
    }

    if let Some(tier) = CalcConfig::active_relic(member.relic_tier) {
        let tier = u32::from(tier);
        rating += tables.relic_tier.value(tier, "relicTierCR")?;
        rating += tables
            .relic_tier_level_factor
            .value(tier, "relicTierLevelFactor")?
            .mul_int(i64::from(member.level));
    }

    Ok(rating)
}

/// Approximate rating of a crewless ship, floored to a whole number.
///
/// # Errors
///
/// `TableEntryNotFound` for a missing rarity, level or skill tier.
pub fn crewless_crew_rating(
    tables: &CrTables,
    ship: &ShipConfig,
) -> Result<Coefficient, OracleError> {
    let hardware_weight = Coefficient::from_ratio(696, 1000);
    let ability_weight = Coefficient::from_ratio(246, 100);

    let mut rating = tables
        .crew_rarity
        .value(u32::from(ship.rarity), "crewRarityCR")?
        + tables
            .unit_level
            .value(ship.level, "unitLevelCR")?
            .mul(Coefficient::from_ratio(7, 2));

    for skill in &ship.skills {
        let weight = if skill.id.starts_with(CalcConfig::HARDWARE_SKILL_PREFIX) {
            hardware_weight
        } else {
            ability_weight
        };
        rating += weight.mul(
            tables
                .ability_level
                .value(u32::from(skill.tier), "abilityLevelCR")?,
        );
    }

    Ok(rating.floor_whole())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Lookup;
    use crate::unit::{EquippedGear, ModConfig, SkillConfig};

    fn tables() -> CrTables {
        let flat = |pairs: &[(u32, i64)]| -> Lookup<Coefficient> {
            pairs
                .iter()
                .map(|&(k, v)| (k, Coefficient::from_int(v)))
                .collect()
        };
        CrTables {
            unit_level: flat(&[(50, 5), (85, 10)]),
            crew_rarity: flat(&[(5, 3), (7, 7)]),
            gear_level: flat(&[(12, 20)]),
            gear_piece: flat(&[(12, 2)]),
            ability_level: flat(&[(3, 1), (8, 4)]),
            mod_rarity_level: [(5, flat(&[(15, 6)]))].into_iter().collect(),
            relic_tier: flat(&[(5, 30)]),
            relic_tier_level_factor: [(5, Coefficient::from_ratio(1, 10))]
                .into_iter()
                .collect(),
            ship_rarity_factor: flat(&[(7, 1)]),
            ..CrTables::default()
        }
    }

    fn member(id: &str) -> UnitConfig {
        UnitConfig {
            def_id: id.into(),
            rarity: 7,
            level: 85,
            gear: 12,
            equipped: vec![EquippedGear::new("101", 0), EquippedGear::placeholder(1)],
            mods: vec![ModConfig::stand_in(5, 15), ModConfig::default()],
            relic_tier: Some(5),
            skills: vec![SkillConfig {
                id: "basic".into(),
                tier: 8,
            }],
            purchased_abilities: Vec::new(),
        }
    }

    #[test]
    fn member_rating_sums_every_source() {
        // 10 + 7 + 20 + 2×2 + 4 + 6 + 30 + 85×0.1
        let rating = crew_rating(&tables(), &[member("A")]).unwrap();
        assert_eq!(rating, Coefficient::from_ratio(895, 10));
    }

    #[test]
    fn relic_tiers_at_threshold_add_nothing() {
        let mut unit = member("A");
        unit.relic_tier = Some(2);
        let rating = crew_rating(&tables(), &[unit]).unwrap();
        assert_eq!(rating, Coefficient::from_int(51));
    }

    #[test]
    fn crewless_rating_is_floored() {
        let ship = ShipConfig {
            def_id: "DROID".into(),
            rarity: 5,
            level: 50,
            skills: vec![
                SkillConfig {
                    id: "hardwareskill".into(),
                    tier: 3,
                },
                SkillConfig {
                    id: "basicskill".into(),
                    tier: 3,
                },
            ],
        };
        // floor(3 + 3.5×5 + 0.696 + 2.46) = floor(23.656)
        let rating = crewless_crew_rating(&tables(), &ship).unwrap();
        assert_eq!(rating, Coefficient::from_int(23));
    }

    #[test]
    fn crew_validation_is_multiset() {
        let def = UnitDefinition {
            crew: vec!["A".into(), "B".into()],
            ..UnitDefinition::default()
        };
        assert!(validate_crew("SHIP", &def, &[member("B"), member("A")]).is_ok());
        assert!(matches!(
            validate_crew("SHIP", &def, &[member("A")]),
            Err(CalcError::CrewCount {
                expected: 2,
                actual: 1,
                ..
            })
        ));
        assert!(matches!(
            validate_crew("SHIP", &def, &[member("A"), member("A")]),
            Err(CalcError::CrewMembership { unit, .. }) if unit == "A"
        ));
    }
}

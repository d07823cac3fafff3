//! Raw stat assembly: base stats, gear or crew contributions, growth
//! modifiers.

use super::crew::{crew_rating, crewless_crew_rating, validate_crew};
use super::ids;
use super::sheet::{BonusSource, StatSheet};
use super::table::StatTable;
use crate::config::CalcConfig;
use crate::env::GameData;
use crate::error::CalcError;
use crate::unit::{ShipConfig, UnitConfig};

/// Assembles a character's raw tables.
///
/// Primary-stat gear deltas go into `base` (they apply before mods); every
/// other gear stat goes into the gear table. Unknown gear and placeholder
/// pieces add nothing. An equipped relic adds its stats to `base` and its
/// growth-modifier deltas to the growth modifiers.
///
/// # Errors
///
/// Missing unit, gear tier, rarity, relic tier or relic definition.
pub fn assemble_character(data: &GameData, unit: &UnitConfig) -> Result<StatSheet, CalcError> {
    let def = data.unit(&unit.def_id)?;
    let mut base = def.gear_level(&unit.def_id, unit.gear)?.stats.clone();
    let mut growth_modifiers = def.growth_modifiers_at(&unit.def_id, unit.rarity)?.clone();
    let mut gear = StatTable::new();

    for piece in &unit.equipped {
        let Some(definition) = piece.equipment_id.as_deref().and_then(|id| data.gear(id)) else {
            continue;
        };
        for (id, value) in definition.stats.iter() {
            if ids::is_primary(id) {
                base.add(id, value);
            } else {
                gear.add(id, value);
            }
        }
    }

    if let Some(tier) = CalcConfig::active_relic(unit.relic_tier) {
        let relic = data.relic(def.relic_id(&unit.def_id, tier)?)?;
        base.merge(&relic.stats);
        growth_modifiers.merge(&relic.gms);
    }

    Ok(StatSheet {
        base,
        bonus: gear,
        source: BonusSource::Gear,
        mods: None,
        growth_modifiers,
        level: unit.level,
    })
}

/// Assembles a ship's raw tables after validating its crew.
///
/// Each crew stat is `coefficient × rarity factor × crew rating`, floored to
/// whole display units for integral stats and to raw units otherwise.
///
/// # Errors
///
/// Crew count or membership mismatch, or any missing table entry.
pub fn assemble_ship(
    data: &GameData,
    ship: &ShipConfig,
    crew: &[UnitConfig],
) -> Result<StatSheet, CalcError> {
    let def = data.unit(&ship.def_id)?;
    validate_crew(&ship.def_id, def, crew)?;

    let tables = &data.cr_tables;
    let rating = if crew.is_empty() {
        crewless_crew_rating(tables, ship)?
    } else {
        crew_rating(tables, crew)?
    };
    let multiplier = tables
        .ship_rarity_factor
        .value(u32::from(ship.rarity), "shipRarityFactor")?
        .mul(rating);

    tracing::debug!(ship = %ship.def_id, crew = crew.len(), %rating, "computed crew rating");

    let crew_stats = def
        .crew_stats
        .iter()
        .map(|(&id, &coefficient)| {
            let value = coefficient.mul(multiplier).floor_fixed();
            let digits = if ids::has_integral_value(id) { 8 } else { 0 };
            (id, value.floor_to(digits))
        })
        .collect();

    Ok(StatSheet {
        base: def.stats.clone(),
        bonus: crew_stats,
        source: BonusSource::Crew,
        mods: None,
        growth_modifiers: def.growth_modifiers_at(&ship.def_id, ship.rarity)?.clone(),
        level: ship.level,
    })
}

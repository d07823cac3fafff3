//! Batch fan-out over rosters.
//!
//! Every entry point mutates the input records in place, attaching a `stats`
//! field (and `gp` when `calcGP` is set), and returns how many units were
//! processed. Characters are always computed before ships because a ship's
//! crew is looked up among the roster's characters.

use std::collections::HashMap;

use serde_json::{Map, Value};
use statcalc_core::{CalcOptions, Calculator, CombatType, UnitRecord};

use crate::error::{Result, RosterError};

/// Field receiving the formatted stats.
pub const STATS_FIELD: &str = "stats";
/// Field receiving galactic power.
pub const GP_FIELD: &str = "gp";

/// One batch run: a calculator plus the options shared by every unit.
#[derive(Clone, Copy, Debug)]
pub struct RosterBatch<'a> {
    calc: Calculator<'a>,
    options: &'a CalcOptions,
}

impl<'a> RosterBatch<'a> {
    pub fn new(calc: Calculator<'a>, options: &'a CalcOptions) -> Self {
        Self { calc, options }
    }

    /// Processes a roster given as a list of canonical or profile records.
    ///
    /// Units whose id is not in the game data are skipped but still counted.
    ///
    /// # Errors
    ///
    /// Unrecognized record shapes and any calculation failure, including a
    /// ship whose crew is incomplete in the roster.
    pub fn roster(&self, units: &mut [Value]) -> Result<usize> {
        let data = self.calc.data();
        let mut characters: HashMap<String, UnitRecord> = HashMap::new();
        let mut ships: Vec<(usize, UnitRecord)> = Vec::new();

        for (index, unit) in units.iter_mut().enumerate() {
            let record = UnitRecord::from_json(unit).map_err(statcalc_core::CalcError::from)?;
            let Some(def) = data.unit_data.get(record.def_id()) else {
                tracing::debug!(unit = record.def_id(), "skipping unit missing from game data");
                continue;
            };
            match def.combat_type {
                CombatType::Ship => ships.push((index, record)),
                CombatType::Character => {
                    let stats = self.calc.character_stats(record.clone(), self.options)?;
                    attach(unit, STATS_FIELD, serde_json::to_value(&stats)?);
                    if self.options.calc_gp {
                        let gp = self
                            .calc
                            .character_gp(record.clone(), self.options.use_values.as_ref())?;
                        attach(unit, GP_FIELD, Value::from(gp));
                    }
                    characters.insert(record.def_id().to_string(), record);
                }
            }
        }

        for (index, ship) in ships {
            let def = data.unit(ship.def_id()).map_err(statcalc_core::CalcError::from)?;
            let crew: Vec<UnitRecord> = def
                .crew
                .iter()
                .filter_map(|id| characters.get(id).cloned())
                .collect();
            let stats = self
                .calc
                .ship_stats(ship.clone(), crew.clone(), self.options)?;
            attach(&mut units[index], STATS_FIELD, serde_json::to_value(&stats)?);
            if self.options.calc_gp {
                let gp = self
                    .calc
                    .ship_gp(ship, crew, self.options.use_values.as_ref())?;
                attach(&mut units[index], GP_FIELD, Value::from(gp));
            }
        }

        tracing::debug!(units = units.len(), "processed roster");
        Ok(units.len())
    }

    /// Processes a roster map keyed by unit id, each value a list of
    /// list-API records. Only characters are computed; ships are left
    /// untouched and not counted.
    ///
    /// # Errors
    ///
    /// A value that is not a list, malformed records, and any calculation
    /// failure.
    pub fn roster_map(&self, units: &mut Map<String, Value>) -> Result<usize> {
        let data = self.calc.data();
        let mut count = 0;
        for (id, entries) in units.iter_mut() {
            let entries = entries.as_array_mut().ok_or_else(|| {
                RosterError::InvalidRoster(format!("entries for '{id}' are not a list"))
            })?;
            let is_character = data
                .unit_data
                .get(id)
                .is_some_and(|def| def.combat_type == CombatType::Character);
            if !is_character {
                continue;
            }
            for entry in entries.iter_mut() {
                let record =
                    UnitRecord::from_list_api(id, entry).map_err(statcalc_core::CalcError::from)?;
                let stats = self.calc.character_stats(record, self.options)?;
                attach(entry, STATS_FIELD, serde_json::to_value(&stats)?);
                count += 1;
            }
        }
        Ok(count)
    }

    /// Processes one player object or a list of them. Each player carries
    /// its units in `roster` or `rosterUnit`.
    ///
    /// # Errors
    ///
    /// A player without a roster list, plus every [`RosterBatch::roster`]
    /// error.
    pub fn players(&self, players: &mut Value) -> Result<usize> {
        match players {
            Value::Array(list) => {
                let mut count = 0;
                for player in list.iter_mut() {
                    count += self.roster(roster_of(player)?)?;
                }
                tracing::info!(players = list.len(), units = count, "processed players");
                Ok(count)
            }
            player => self.roster(roster_of(player)?),
        }
    }
}

fn roster_of(player: &mut Value) -> Result<&mut Vec<Value>> {
    let field = if player.get("roster").is_some() {
        "roster"
    } else {
        "rosterUnit"
    };
    player
        .get_mut(field)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| RosterError::InvalidRoster("player has no roster list".to_string()))
}

fn attach(unit: &mut Value, field: &str, value: Value) {
    if let Some(object) = unit.as_object_mut() {
        object.insert(field.to_string(), value);
    }
}

//! Read-only game data.
//!
//! [`GameData`] bundles every static table the calculators read: unit, gear,
//! mod-set and relic definitions plus the crew-rating and galactic-power
//! tables. It is built once (usually by `statcalc-content`), then shared by
//! reference; nothing in the pipeline mutates it. Accumulation always copies
//! a table out of the bundle before merging into it.
mod error;
mod items;
mod tables;
mod units;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use error::OracleError;
pub use items::{GearDefinition, ModSetDefinition, RelicDefinition};
pub use tables::{CrTables, GpTables, Lookup};
pub use units::{CombatType, GearLevel, SkillDefinition, UnitDefinition};

/// Immutable bundle of all static definition tables.
///
/// Field names follow the source bundle (`unitData`, `gearData`, ...), so a
/// bundle exported by the data pipeline deserializes directly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameData {
    pub unit_data: HashMap<String, UnitDefinition>,
    #[serde(default)]
    pub gear_data: HashMap<String, GearDefinition>,
    #[serde(default)]
    pub mod_set_data: HashMap<u8, ModSetDefinition>,
    #[serde(default)]
    pub relic_data: HashMap<String, RelicDefinition>,
    pub cr_tables: CrTables,
    pub gp_tables: GpTables,
}

impl GameData {
    /// Returns the unit definition, or an error if unknown.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnitNotFound` if the id is not in the bundle.
    pub fn unit(&self, id: &str) -> Result<&UnitDefinition, OracleError> {
        self.unit_data
            .get(id)
            .ok_or_else(|| OracleError::UnitNotFound(id.to_string()))
    }

    /// Returns the gear definition if known. Unknown gear is not an error:
    /// callers skip it.
    pub fn gear(&self, id: &str) -> Option<&GearDefinition> {
        self.gear_data.get(id)
    }

    /// Returns the mod set definition.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ModSetNotFound` if the set id is not defined.
    pub fn mod_set(&self, set: u8) -> Result<&ModSetDefinition, OracleError> {
        self.mod_set_data
            .get(&set)
            .ok_or(OracleError::ModSetNotFound(set))
    }

    /// Returns the relic definition.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RelicNotFound` if the relic id is not defined.
    pub fn relic(&self, id: &str) -> Result<&RelicDefinition, OracleError> {
        self.relic_data
            .get(id)
            .ok_or_else(|| OracleError::RelicNotFound(id.to_string()))
    }
}

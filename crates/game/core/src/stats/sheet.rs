//! Unformatted pipeline output.

use super::table::StatTable;

/// Which sub-table sits next to `base`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BonusSource {
    /// Character gear secondaries.
    #[default]
    Gear,
    /// Ship crew contribution.
    Crew,
}

/// Stat sub-tables in unscaled form.
///
/// `base` holds everything that applies before mods; `bonus` is the gear (or
/// crew) table; `mods` is `None` when mod aggregation was skipped or the unit
/// is a ship.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatSheet {
    pub base: StatTable,
    pub bonus: StatTable,
    pub source: BonusSource,
    pub mods: Option<StatTable>,
    pub growth_modifiers: StatTable,
    /// Unit level; defense conversion depends on it.
    pub level: u32,
}

impl StatSheet {
    pub fn is_ship(&self) -> bool {
        self.source == BonusSource::Crew
    }
}

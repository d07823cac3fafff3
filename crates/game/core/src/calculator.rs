//! Public entry point for stat and power calculations.
//!
//! The [`Calculator`] borrows an immutable [`GameData`] bundle and runs the
//! whole pipeline for one unit per call. Every call resolves a fresh
//! configuration, so repeated calls with the same input return the same
//! result.

use crate::config::CalcOptions;
use crate::env::GameData;
use crate::error::CalcError;
use crate::power::PowerCalculator;
use crate::stats::{StatFormatter, StatSheet, UnitStats, growth, mods, raw};
use crate::unit::{ResolvedShip, UnitConfig, UnitRecord, UnitResolver, UseValues};

#[derive(Clone, Copy, Debug)]
pub struct Calculator<'a> {
    data: &'a GameData,
}

impl<'a> Calculator<'a> {
    pub fn new(data: &'a GameData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &'a GameData {
        self.data
    }

    pub fn resolver(&self) -> UnitResolver<'a> {
        UnitResolver::new(self.data)
    }

    /// Character stats from any supported record shape.
    ///
    /// # Errors
    ///
    /// Shape errors from the resolver and missing-definition errors from
    /// every stage.
    pub fn character_stats(
        &self,
        record: UnitRecord,
        options: &CalcOptions,
    ) -> Result<UnitStats, CalcError> {
        let unit = self
            .resolver()
            .character(record, options.use_values.as_ref())?;
        self.stats_for_character(&unit, options)
    }

    /// Ship stats. The crew is validated against the ship's roster.
    ///
    /// Any failure is logged with the ship id and returned wrapped in
    /// [`CalcError::Ship`].
    pub fn ship_stats(
        &self,
        ship: UnitRecord,
        crew: Vec<UnitRecord>,
        options: &CalcOptions,
    ) -> Result<UnitStats, CalcError> {
        let ship_id = ship.def_id().to_string();
        let input = format!("{ship:?}");
        self.resolver()
            .ship(ship, crew, options.use_values.as_ref())
            .and_then(|resolved| self.stats_for_ship(&resolved, options))
            .map_err(|err| ship_error(ship_id, input, err))
    }

    /// Character galactic power.
    pub fn character_gp(
        &self,
        record: UnitRecord,
        use_values: Option<&UseValues>,
    ) -> Result<i64, CalcError> {
        let unit = self.resolver().character(record, use_values)?;
        PowerCalculator::new(self.data).character(&unit)
    }

    /// Ship galactic power; each crew member is scored first.
    pub fn ship_gp(
        &self,
        ship: UnitRecord,
        crew: Vec<UnitRecord>,
        use_values: Option<&UseValues>,
    ) -> Result<i64, CalcError> {
        let resolved = self.resolver().ship(ship, crew, use_values)?;
        PowerCalculator::new(self.data).ship(&resolved.ship, &resolved.crew)
    }

    /// Runs the stat pipeline on a resolved character.
    pub fn stats_for_character(
        &self,
        unit: &UnitConfig,
        options: &CalcOptions,
    ) -> Result<UnitStats, CalcError> {
        let mut sheet = raw::assemble_character(self.data, unit)?;
        growth::derive(self.data, &unit.def_id, &mut sheet)?;
        if !options.without_mod_calc {
            sheet.mods = Some(mods::aggregate(self.data, &sheet.base, &unit.mods)?);
        }
        tracing::debug!(
            unit = %unit.def_id,
            mods = unit.mods.len(),
            "assembled character stats"
        );
        Ok(self.format(&sheet, options))
    }

    /// Runs the stat pipeline on a resolved ship.
    pub fn stats_for_ship(
        &self,
        resolved: &ResolvedShip,
        options: &CalcOptions,
    ) -> Result<UnitStats, CalcError> {
        let ship = &resolved.ship;
        let mut sheet = raw::assemble_ship(self.data, ship, &resolved.crew)?;
        growth::derive(self.data, &ship.def_id, &mut sheet)?;
        Ok(self.format(&sheet, options))
    }

    fn format(&self, sheet: &StatSheet, options: &CalcOptions) -> UnitStats {
        StatFormatter::new(options).format(sheet)
    }
}

fn ship_error(ship: String, input: String, source: CalcError) -> CalcError {
    tracing::error!(ship = %ship, input = %input, error = %source, "ship calculation failed");
    CalcError::Ship {
        ship,
        input,
        source: Box::new(source),
    }
}

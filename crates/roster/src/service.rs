//! Shared calculation service.
//!
//! The game data bundle is published once (or replaced wholesale) and read
//! by every call. Each call takes a snapshot `Arc`, so a replacement never
//! affects calculations already running.

use std::sync::{Arc, RwLock};

use serde_json::{Map, Value};
use statcalc_core::{CalcError, CalcOptions, Calculator, GameData, GameError, UnitRecord, UnitStats};

use crate::batch::RosterBatch;
use crate::error::{Result, RosterError};

#[derive(Debug, Default)]
pub struct StatService {
    data: RwLock<Option<Arc<GameData>>>,
}

impl StatService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game_data(data: GameData) -> Self {
        Self {
            data: RwLock::new(Some(Arc::new(data))),
        }
    }

    /// Publishes a new bundle, replacing the previous one.
    pub fn set_game_data(&self, data: GameData) -> Result<()> {
        let mut current = self.data.write().map_err(|_| RosterError::LockPoisoned)?;
        *current = Some(Arc::new(data));
        tracing::info!("game data published");
        Ok(())
    }

    /// Snapshot of the current bundle.
    pub fn game_data(&self) -> Result<Arc<GameData>> {
        let current = self.data.read().map_err(|_| RosterError::LockPoisoned)?;
        current.clone().ok_or(RosterError::DataNotLoaded)
    }

    pub fn character_stats(&self, unit: &Value, options: &CalcOptions) -> Result<UnitStats> {
        let data = self.game_data()?;
        let record = parse(unit)?;
        Ok(Calculator::new(&data).character_stats(record, options)?)
    }

    pub fn ship_stats(
        &self,
        ship: &Value,
        crew: &[Value],
        options: &CalcOptions,
    ) -> Result<UnitStats> {
        let data = self.game_data()?;
        let ship = parse(ship)?;
        let crew = crew.iter().map(parse).collect::<Result<Vec<_>>>()?;
        Ok(Calculator::new(&data).ship_stats(ship, crew, options)?)
    }

    pub fn character_gp(&self, unit: &Value, options: &CalcOptions) -> Result<i64> {
        let data = self.game_data()?;
        let record = parse(unit)?;
        Ok(Calculator::new(&data).character_gp(record, options.use_values.as_ref())?)
    }

    pub fn ship_gp(&self, ship: &Value, crew: &[Value], options: &CalcOptions) -> Result<i64> {
        let data = self.game_data()?;
        let ship = parse(ship)?;
        let crew = crew.iter().map(parse).collect::<Result<Vec<_>>>()?;
        Ok(Calculator::new(&data).ship_gp(ship, crew, options.use_values.as_ref())?)
    }

    /// See [`RosterBatch::roster`].
    pub fn roster_stats(&self, units: &mut [Value], options: &CalcOptions) -> Result<usize> {
        let data = self.game_data()?;
        report("roster", RosterBatch::new(Calculator::new(&data), options).roster(units))
    }

    /// See [`RosterBatch::roster_map`].
    pub fn roster_map_stats(
        &self,
        units: &mut Map<String, Value>,
        options: &CalcOptions,
    ) -> Result<usize> {
        let data = self.game_data()?;
        report(
            "roster map",
            RosterBatch::new(Calculator::new(&data), options).roster_map(units),
        )
    }

    /// See [`RosterBatch::players`].
    pub fn player_stats(&self, players: &mut Value, options: &CalcOptions) -> Result<usize> {
        let data = self.game_data()?;
        report(
            "players",
            RosterBatch::new(Calculator::new(&data), options).players(players),
        )
    }
}

/// Logs a failed batch; inconsistent game data is an error, bad input a warning.
fn report<T>(batch: &'static str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        let severity = err.severity();
        if severity.is_internal() {
            tracing::error!(
                batch,
                severity = severity.as_str(),
                code = err.error_code(),
                error = %err,
                "batch failed"
            );
        } else {
            tracing::warn!(
                batch,
                severity = severity.as_str(),
                code = err.error_code(),
                error = %err,
                "batch rejected"
            );
        }
    }
    result
}

fn parse(value: &Value) -> Result<UnitRecord> {
    UnitRecord::from_json(value)
        .map_err(CalcError::from)
        .map_err(RosterError::from)
}

//! Unit stat and galactic power calculations.
//!
//! `statcalc-core` turns static game data ([`GameData`]) and an owned unit's
//! configuration into its battle stats and galactic power. The pipeline is
//! pure: no I/O, no global state. Inputs are normalized by
//! [`unit::UnitResolver`], stats flow through the stages in [`stats`], power
//! is computed by [`power::PowerCalculator`], and [`Calculator`] ties the
//! stages together.
pub mod calculator;
pub mod config;
pub mod env;
pub mod error;
pub mod power;
pub mod stats;
pub mod unit;

pub use calculator::Calculator;
pub use config::{CalcConfig, CalcOptions, Scale};
pub use env::{
    CombatType, CrTables, GameData, GearDefinition, GearLevel, GpTables, Lookup,
    ModSetDefinition, OracleError, RelicDefinition, SkillDefinition, UnitDefinition,
};
pub use error::{CalcError, ErrorSeverity, GameError};
pub use power::PowerCalculator;
pub use stats::{
    BonusSource, Coefficient, Fixed, StatFormatter, StatId, StatSection, StatSheet, StatTable,
    UnitStats,
};
pub use unit::{
    EquippedGear, GearOverride, ModConfig, ResolveError, ResolvedShip, ShipConfig, SkillConfig,
    SkillOverride, UnitConfig, UnitOverrides, UnitRecord, UnitResolver, UseValues,
};

//! Missing-definition errors.
//!
//! Raised whenever a lookup into the static game data fails and no explicit
//! skip/default policy applies.

use crate::error::{ErrorSeverity, GameError};

/// A required entry is absent from the game data bundle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// Unit definition was not found by id.
    #[error("unit definition '{0}' not found")]
    UnitNotFound(String),

    /// Unit definition has no entry for the requested gear tier.
    #[error("unit '{unit}' has no gear tier {tier}")]
    GearTierNotFound { unit: String, tier: u8 },

    /// Unit definition has no growth modifiers for the requested rarity.
    #[error("unit '{unit}' has no growth modifiers for rarity {rarity}")]
    GrowthModifiersNotFound { unit: String, rarity: u8 },

    /// Unit definition declares no primary stat.
    #[error("unit '{0}' declares no primary stat")]
    PrimaryStatNotFound(String),

    /// Unit definition has no relic for the requested tier.
    #[error("unit '{unit}' has no relic for tier {tier}")]
    RelicTierNotFound { unit: String, tier: u8 },

    /// Relic definition was not found by id.
    #[error("relic definition '{0}' not found")]
    RelicNotFound(String),

    /// Mastery-modifier table was not found by id.
    #[error("mastery modifier table '{0}' not found")]
    MasteryTableNotFound(String),

    /// Mod set definition was not found by set id.
    #[error("mod set {0} not found")]
    ModSetNotFound(u8),

    /// Skill is not part of the unit's definition.
    #[error("skill '{skill}' is not defined for unit '{unit}'")]
    SkillNotFound { unit: String, skill: String },

    /// A CR/GP table has no entry for the key.
    #[error("table '{table}' has no entry for key {key}")]
    TableEntryNotFound { table: &'static str, key: String },

    /// No special GP is defined for a power override tag.
    #[error("no special power value for tag '{0}'")]
    PowerTagNotFound(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        // Lookups fail because the input references data the bundle lacks
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            UnitNotFound(_) => "ORACLE_UNIT_NOT_FOUND",
            GearTierNotFound { .. } => "ORACLE_GEAR_TIER_NOT_FOUND",
            GrowthModifiersNotFound { .. } => "ORACLE_GROWTH_MODIFIERS_NOT_FOUND",
            PrimaryStatNotFound(_) => "ORACLE_PRIMARY_STAT_NOT_FOUND",
            RelicTierNotFound { .. } => "ORACLE_RELIC_TIER_NOT_FOUND",
            RelicNotFound(_) => "ORACLE_RELIC_NOT_FOUND",
            MasteryTableNotFound(_) => "ORACLE_MASTERY_TABLE_NOT_FOUND",
            ModSetNotFound(_) => "ORACLE_MOD_SET_NOT_FOUND",
            SkillNotFound { .. } => "ORACLE_SKILL_NOT_FOUND",
            TableEntryNotFound { .. } => "ORACLE_TABLE_ENTRY_NOT_FOUND",
            PowerTagNotFound(_) => "ORACLE_POWER_TAG_NOT_FOUND",
        }
    }
}

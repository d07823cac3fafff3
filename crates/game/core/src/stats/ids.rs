//! Numeric stat identifiers as used by the game data.
//!
//! Stat tables are keyed by these raw ids rather than an enum: definitions
//! may carry ids this crate has no special handling for, and those must flow
//! through unchanged.

/// Raw stat identifier.
pub type StatId = u16;

pub const HEALTH: StatId = 1;
pub const STRENGTH: StatId = 2;
pub const AGILITY: StatId = 3;
pub const TACTICS: StatId = 4;
pub const SPEED: StatId = 5;
pub const PHYSICAL_DAMAGE: StatId = 6;
pub const SPECIAL_DAMAGE: StatId = 7;
pub const ARMOR: StatId = 8;
pub const RESISTANCE: StatId = 9;
pub const DODGE_RATING: StatId = 12;
pub const DEFLECTION_RATING: StatId = 13;
pub const PHYSICAL_CRIT_RATING: StatId = 14;
pub const SPECIAL_CRIT_RATING: StatId = 15;
pub const CRIT_DAMAGE: StatId = 16;
pub const TENACITY: StatId = 18;
pub const PHYSICAL_CRIT_CHANCE: StatId = 21;
pub const SPECIAL_CRIT_CHANCE: StatId = 22;
pub const PROTECTION: StatId = 28;
pub const PHYSICAL_CRIT_AVOIDANCE_PERCENT: StatId = 35;
pub const SPECIAL_CRIT_AVOIDANCE_PERCENT: StatId = 36;
pub const PHYSICAL_ACCURACY: StatId = 37;
pub const SPECIAL_ACCURACY: StatId = 38;
pub const PHYSICAL_CRIT_AVOIDANCE: StatId = 39;
pub const SPECIAL_CRIT_AVOIDANCE: StatId = 40;
pub const OFFENSE: StatId = 41;
pub const DEFENSE: StatId = 42;
pub const OFFENSE_PERCENT: StatId = 48;
pub const DEFENSE_PERCENT: StatId = 49;
pub const CRIT_CHANCE_PERCENT: StatId = 53;
pub const CRIT_AVOIDANCE_PERCENT: StatId = 54;
pub const HEALTH_PERCENT: StatId = 55;
pub const PROTECTION_PERCENT: StatId = 56;
pub const SPEED_PERCENT: StatId = 57;
pub const MASTERY: StatId = 61;

/// Primary stats; gear deltas for these land in the base table.
pub const PRIMARY: [StatId; 3] = [STRENGTH, AGILITY, TACTICS];

pub const fn is_primary(id: StatId) -> bool {
    matches!(id, STRENGTH | AGILITY | TACTICS)
}

/// Stats whose final value is always a whole display unit.
pub const fn has_integral_value(id: StatId) -> bool {
    id < 16 || id == PROTECTION
}

/// Mod stats displayed as flat numbers (scaled ×1e8); all others are
/// percentages (scaled ×1e6).
pub const fn is_flat_mod_stat(id: StatId) -> bool {
    matches!(id, HEALTH | SPEED | PROTECTION | OFFENSE | DEFENSE)
}

use serde::{Deserialize, Serialize};

use crate::env::Lookup;
use crate::unit::UseValues;

/// Calculation constants shared by every stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalcConfig;

impl CalcConfig {
    /// Gear ids at or above this value denote unknown pieces.
    pub const SENTINEL_GEAR_ID: f64 = 9990.0;
    /// Mods at this level count twice toward set bonuses.
    pub const MAX_MOD_LEVEL: u8 = 15;
    /// Profile records number skill tiers two below the canonical numbering.
    pub const PROFILE_SKILL_TIER_OFFSET: u8 = 2;
    /// Relic tiers above this value are equipped.
    pub const RELIC_TIER_THRESHOLD: u8 = 2;
    /// Stand-in mods synthesized from a crew mod override.
    pub const STAND_IN_MOD_COUNT: usize = 6;
    pub const DEFAULT_STAND_IN_PIPS: u8 = 6;
    pub const DEFAULT_STAND_IN_LEVEL: u8 = 15;
    /// Stand-in mods carry no tier of their own; power scores them at the top tier.
    pub const STAND_IN_MOD_TIER: u8 = 5;
    /// Skill id prefix of ship hardware abilities.
    pub const HARDWARE_SKILL_PREFIX: &'static str = "hardware";
    /// Override-tag prefix of reinforcement abilities.
    pub const REINFORCEMENT_TAG_PREFIX: &'static str = "reinforcement";
    /// Special-GP key for purchased ultimate abilities.
    pub const ULTIMATE_TAG: &'static str = "ultimate";

    /// True when `id` marks an unknown gear piece (non-numeric ids included).
    pub fn is_sentinel_gear(id: &str) -> bool {
        !id.trim()
            .parse::<f64>()
            .is_ok_and(|value| value < Self::SENTINEL_GEAR_ID)
    }

    /// Relic tier if one is equipped.
    pub fn active_relic(tier: Option<u8>) -> Option<u8> {
        tier.filter(|&t| t > Self::RELIC_TIER_THRESHOLD)
    }
}

/// Fixed-point representation of the output values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Scale {
    /// Raw internal integers (display × 1e8).
    Unscaled,
    /// Display × 1e4.
    Scaled,
    /// Display values.
    #[default]
    Display,
}

impl Scale {
    /// Divisor applied to raw integers.
    pub const fn divisor(self) -> i64 {
        match self {
            Scale::Unscaled => 1,
            Scale::Scaled => 10_000,
            Scale::Display => 100_000_000,
        }
    }
}

/// Per-call options.
///
/// Keys are camelCase so the same struct reads from JSON requests and TOML
/// option files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalcOptions {
    /// Also compute galactic power in batch operations.
    #[serde(rename = "calcGP")]
    pub calc_gp: bool,
    /// Skip mod aggregation; the mods table is left empty.
    pub without_mod_calc: bool,
    /// Hypothetical configuration overriding the owned one.
    pub use_values: Option<UseValues>,
    /// Output display × 1e4. Takes precedence over `unscaled`.
    pub scaled: bool,
    /// Output raw internal integers.
    pub unscaled: bool,
    /// Convert rating stats to percentages.
    pub percent_vals: bool,
    /// Percent conversion plus a merged `final` table.
    pub game_style: bool,
    /// Stat id → display name used to rename output keys.
    pub language: Option<Lookup<String>>,
    /// Strip whitespace from renamed keys and lower-case the first letter.
    pub no_space: bool,
}

impl CalcOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> Scale {
        if self.scaled {
            Scale::Scaled
        } else if self.unscaled {
            Scale::Unscaled
        } else {
            Scale::Display
        }
    }

    /// `gameStyle` implies percent conversion.
    pub fn converts_percentages(&self) -> bool {
        self.percent_vals || self.game_style
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scaled = scale == Scale::Scaled;
        self.unscaled = scale == Scale::Unscaled;
        self
    }

    pub fn with_percent_vals(mut self) -> Self {
        self.percent_vals = true;
        self
    }

    pub fn with_game_style(mut self) -> Self {
        self.game_style = true;
        self
    }

    pub fn without_mods(mut self) -> Self {
        self.without_mod_calc = true;
        self
    }

    pub fn with_gp(mut self) -> Self {
        self.calc_gp = true;
        self
    }

    pub fn with_use_values(mut self, use_values: UseValues) -> Self {
        self.use_values = Some(use_values);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_gear_ids() {
        assert!(!CalcConfig::is_sentinel_gear("173"));
        assert!(!CalcConfig::is_sentinel_gear("001"));
        assert!(CalcConfig::is_sentinel_gear("9998"));
        assert!(CalcConfig::is_sentinel_gear("9990"));
        assert!(CalcConfig::is_sentinel_gear("unknown"));
    }

    #[test]
    fn scaled_wins_over_unscaled() {
        let options = CalcOptions {
            scaled: true,
            unscaled: true,
            ..CalcOptions::default()
        };
        assert_eq!(options.scale(), Scale::Scaled);
        assert_eq!(CalcOptions::new().scale(), Scale::Display);
    }

    #[test]
    fn options_read_camel_case_keys() {
        let options: CalcOptions =
            serde_json::from_str(r#"{"calcGP": true, "gameStyle": true, "withoutModCalc": true}"#)
                .unwrap();
        assert!(options.calc_gp);
        assert!(options.converts_percentages());
        assert!(options.without_mod_calc);
    }
}

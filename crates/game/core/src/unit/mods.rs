//! Equipped-mod input shapes.
//!
//! Two display-unit shapes arrive under `mods` (a `stat` pair list, or
//! `primaryStat`/`secondaryStat` objects) and one raw shape under
//! `equippedStatMod`, whose values are already unscaled. All of them are
//! normalized into [`ModConfig`].

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ResolveError;
use crate::config::CalcConfig;
use crate::stats::{FLAT_SCALE, Fixed, PERCENT_SCALE, StatId, ids};

/// Canonical equipped mod.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModConfig {
    /// Mod set id; `None` for stand-ins that only carry pips and level.
    pub set: Option<u8>,
    pub pips: u8,
    pub level: u8,
    pub tier: u8,
    /// Primary and secondary stats, already unscaled.
    pub stats: Vec<(StatId, Fixed)>,
}

impl ModConfig {
    /// Uniform stand-in used for hypothetical crew configurations.
    pub fn stand_in(pips: u8, level: u8) -> Self {
        Self {
            set: None,
            pips,
            level,
            tier: CalcConfig::STAND_IN_MOD_TIER,
            stats: Vec::new(),
        }
    }

    /// Empty slot entry from list-API records (`{}`).
    pub fn is_placeholder(&self) -> bool {
        self.set.is_none() && self.pips == 0
    }
}

/// Stat entry of the `primaryStat`/`secondaryStat` display shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayModStat {
    pub unit_stat: StatId,
    pub value: f64,
}

/// Mod in display units (either display shape).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayMod {
    pub set: Option<u8>,
    pub level: u8,
    pub pips: u8,
    pub tier: u8,
    /// `[statId, value]` pairs; missing secondaries are `[0, 0]`.
    pub stat: Option<Vec<(StatId, f64)>>,
    pub primary_stat: Option<DisplayModStat>,
    pub secondary_stat: Vec<DisplayModStat>,
}

impl DisplayMod {
    pub fn to_config(&self) -> ModConfig {
        let set = self.set.filter(|&set| set != 0);
        let mut stats = Vec::new();
        if set.is_some() {
            let pairs: Vec<(StatId, f64)> = match &self.stat {
                Some(pairs) => pairs.clone(),
                None => self
                    .primary_stat
                    .iter()
                    .chain(self.secondary_stat.iter())
                    .map(|s| (s.unit_stat, s.value))
                    .collect(),
            };
            stats = pairs
                .into_iter()
                .filter(|&(id, _)| id != 0)
                .map(|(id, value)| (id, scale_display_value(id, value)))
                .collect();
        }
        ModConfig {
            set,
            pips: self.pips,
            level: self.level,
            tier: self.tier,
            stats,
        }
    }
}

/// Converts a displayed mod value into an unscaled magnitude.
pub fn scale_display_value(id: StatId, value: f64) -> Fixed {
    let scale = if ids::is_flat_mod_stat(id) {
        FLAT_SCALE
    } else {
        PERCENT_SCALE
    };
    Fixed::from_display(value, scale)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModStat {
    pub unit_stat_id: StatId,
    #[serde(deserialize_with = "deserialize_unscaled")]
    pub unscaled_decimal_value: Fixed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawModStatSlot {
    pub stat: RawModStat,
}

/// Mod in the raw profile shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMod {
    /// Three digits: set id, pips, slot.
    pub definition_id: String,
    pub level: u8,
    #[serde(default)]
    pub tier: u8,
    pub primary_stat: RawModStatSlot,
    #[serde(default)]
    pub secondary_stat: Vec<RawModStatSlot>,
}

impl RawMod {
    pub fn to_config(&self) -> Result<ModConfig, ResolveError> {
        let mut digits = self.definition_id.chars().map(|c| c.to_digit(10));
        let (Some(Some(set)), Some(Some(pips))) = (digits.next(), digits.next()) else {
            return Err(ResolveError::InvalidModDefinition(
                self.definition_id.clone(),
            ));
        };
        let stats = std::iter::once(&self.primary_stat)
            .chain(self.secondary_stat.iter())
            .map(|slot| (slot.stat.unit_stat_id, slot.stat.unscaled_decimal_value))
            .collect();
        Ok(ModConfig {
            set: Some(set as u8),
            pips: pips as u8,
            level: self.level,
            tier: self.tier,
            stats,
        })
    }
}

/// Unscaled values arrive as numbers or decimal strings.
fn deserialize_unscaled<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
where
    D: Deserializer<'de>,
{
    struct UnscaledVisitor;

    impl Visitor<'_> for UnscaledVisitor {
        type Value = Fixed;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unscaled number or decimal string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Fixed, E> {
            Ok(Fixed::from_raw(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Fixed, E> {
            i64::try_from(v).map(Fixed::from_raw).map_err(E::custom)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Fixed, E> {
            Ok(Fixed::from_display(v, 1))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Fixed, E> {
            let trimmed = v.trim();
            if let Ok(raw) = trimmed.parse::<i64>() {
                return Ok(Fixed::from_raw(raw));
            }
            trimmed
                .parse::<f64>()
                .map(|value| Fixed::from_display(value, 1))
                .map_err(E::custom)
        }
    }

    deserializer.deserialize_any(UnscaledVisitor)
}

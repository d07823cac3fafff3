//! Output formatting: scale selection, rating → percent conversion and the
//! game-style `final` table.
//!
//! Converted values are kept as exact fractions until they are rendered, so
//! the per-section deltas of a converted stat add up to the conversion of the
//! cumulative value.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

use super::fixed::{Fixed, UNIT};
use super::ids::{self, StatId};
use super::sheet::{BonusSource, StatSheet};
use super::table::StatTable;
use crate::config::CalcOptions;
use crate::env::Lookup;

/// Output sub-table names.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum StatSection {
    Base,
    Gear,
    Crew,
    Mods,
    GrowthModifiers,
    Final,
}

impl From<BonusSource> for StatSection {
    fn from(source: BonusSource) -> Self {
        match source {
            BonusSource::Gear => StatSection::Gear,
            BonusSource::Crew => StatSection::Crew,
        }
    }
}

/// Renames stat ids for output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatLabels {
    names: Lookup<String>,
    no_space: bool,
}

impl StatLabels {
    pub fn new(names: Lookup<String>, no_space: bool) -> Self {
        Self { names, no_space }
    }

    /// Localized name, falling back to the id itself.
    pub fn label(&self, id: StatId) -> String {
        let name = self
            .names
            .get(u32::from(id))
            .cloned()
            .unwrap_or_else(|| id.to_string());
        if !self.no_space {
            return name;
        }
        let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        let mut chars = compact.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => compact,
        }
    }
}

/// Formatted stats of one unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnitStats {
    sections: BTreeMap<StatSection, BTreeMap<StatId, f64>>,
    labels: Option<StatLabels>,
}

impl UnitStats {
    pub fn section(&self, section: StatSection) -> Option<&BTreeMap<StatId, f64>> {
        self.sections.get(&section)
    }

    pub fn get(&self, section: StatSection, id: StatId) -> Option<f64> {
        self.sections.get(&section)?.get(&id).copied()
    }

    pub fn sections(&self) -> impl Iterator<Item = StatSection> + '_ {
        self.sections.keys().copied()
    }

    /// Section → stat key → value, with stat keys renamed when labels are set.
    /// Later ids win when two ids map to the same name.
    pub fn to_named(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.sections
            .iter()
            .map(|(section, values)| {
                let named = values
                    .iter()
                    .map(|(&id, &value)| {
                        let key = match &self.labels {
                            Some(labels) => labels.label(id),
                            None => id.to_string(),
                        };
                        (key, value)
                    })
                    .collect();
                (section.to_string(), named)
            })
            .collect()
    }
}

impl Serialize for UnitStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_named().serialize(serializer)
    }
}

/// Exact fraction of raw units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Ratio {
    num: i128,
    den: i128,
}

impl Ratio {
    const ZERO: Self = Self { num: 0, den: 1 };

    fn new(num: i128, den: i128) -> Self {
        if den == 0 {
            Self::ZERO
        } else {
            Self { num, den }
        }
    }

    fn whole(value: Fixed) -> Self {
        Self::new(value.raw() as i128, 1)
    }

    fn minus(self, rhs: Self) -> Self {
        Self::new(
            self.num * rhs.den - rhs.num * self.den,
            self.den * rhs.den,
        )
    }

    fn render(self, divisor: i64) -> f64 {
        self.num as f64 / self.den as f64 / divisor as f64
    }
}

/// Rating → percentage conversions. Results stay in raw units (fraction ×
/// 1e8) so they scale like every other value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Conversion {
    /// r / 2400 + 10%
    Crit,
    /// r / (level effect + r)
    Defense { level_effect: i128 },
    /// r / 1200
    Accuracy,
    /// r / 2400
    CritAvoidance,
}

const CONVERTED_STATS: [StatId; 10] = [
    ids::PHYSICAL_CRIT_RATING,
    ids::SPECIAL_CRIT_RATING,
    ids::ARMOR,
    ids::RESISTANCE,
    ids::PHYSICAL_ACCURACY,
    ids::SPECIAL_ACCURACY,
    ids::DODGE_RATING,
    ids::DEFLECTION_RATING,
    ids::PHYSICAL_CRIT_AVOIDANCE,
    ids::SPECIAL_CRIT_AVOIDANCE,
];

impl Conversion {
    fn for_stat(id: StatId, level: u32, is_ship: bool) -> Option<Self> {
        let conversion = match id {
            ids::PHYSICAL_CRIT_RATING | ids::SPECIAL_CRIT_RATING => Conversion::Crit,
            ids::ARMOR | ids::RESISTANCE => {
                let level = i128::from(level);
                // ships: 300 + 5L, characters: 7.5L
                let level_effect = if is_ship {
                    (300 + 5 * level) * UNIT as i128
                } else {
                    level * 15 * UNIT as i128 / 2
                };
                Conversion::Defense { level_effect }
            }
            ids::PHYSICAL_ACCURACY
            | ids::SPECIAL_ACCURACY
            | ids::DODGE_RATING
            | ids::DEFLECTION_RATING => Conversion::Accuracy,
            ids::PHYSICAL_CRIT_AVOIDANCE | ids::SPECIAL_CRIT_AVOIDANCE => {
                Conversion::CritAvoidance
            }
            _ => return None,
        };
        Some(conversion)
    }

    fn apply(self, flat: i128) -> Ratio {
        match self {
            Conversion::Crit => Ratio::new(flat + 2400 * (UNIT as i128 / 10), 2400),
            Conversion::Defense { level_effect } => {
                Ratio::new(flat * UNIT as i128, level_effect + flat)
            }
            Conversion::Accuracy => Ratio::new(flat, 1200),
            Conversion::CritAvoidance => Ratio::new(flat, 2400),
        }
    }
}

type RatioTable = BTreeMap<StatId, Ratio>;

fn exact(table: &StatTable) -> RatioTable {
    table.iter().map(|(id, value)| (id, Ratio::whole(value))).collect()
}

/// Applies one conversion across the sections: `base` gets the converted
/// base value, the bonus and mods sections get the marginal change of the
/// conversion as each section is added on top.
fn convert(
    id: StatId,
    conversion: Conversion,
    base: &mut RatioTable,
    bonus: &mut RatioTable,
    mods: Option<&mut RatioTable>,
) {
    let mut flat = base.get(&id).map_or(0, |r| r.num);
    let mut last = conversion.apply(flat);
    if let Some(entry) = base.get_mut(&id) {
        *entry = last;
    }
    if let Some(entry) = bonus.get_mut(&id).filter(|r| r.num != 0) {
        flat += entry.num;
        let percent = conversion.apply(flat);
        *entry = percent.minus(last);
        last = percent;
    }
    if let Some(entry) = mods.and_then(|m| m.get_mut(&id)).filter(|r| r.num != 0) {
        flat += entry.num;
        *entry = conversion.apply(flat).minus(last);
    }
}

fn render(table: &RatioTable, divisor: i64) -> BTreeMap<StatId, f64> {
    table
        .iter()
        .map(|(&id, ratio)| (id, ratio.render(divisor)))
        .collect()
}

/// Percent stats folded into the flat stat they were converted with.
fn final_id(id: StatId) -> StatId {
    match id {
        ids::PHYSICAL_CRIT_CHANCE => ids::PHYSICAL_CRIT_RATING,
        ids::SPECIAL_CRIT_CHANCE => ids::SPECIAL_CRIT_RATING,
        ids::PHYSICAL_CRIT_AVOIDANCE_PERCENT => ids::PHYSICAL_CRIT_AVOIDANCE,
        ids::SPECIAL_CRIT_AVOIDANCE_PERCENT => ids::SPECIAL_CRIT_AVOIDANCE,
        other => other,
    }
}

/// Renders a [`StatSheet`] according to [`CalcOptions`].
#[derive(Clone, Copy, Debug)]
pub struct StatFormatter<'o> {
    options: &'o CalcOptions,
}

impl<'o> StatFormatter<'o> {
    pub fn new(options: &'o CalcOptions) -> Self {
        Self { options }
    }

    pub fn format(&self, sheet: &StatSheet) -> UnitStats {
        let divisor = self.options.scale().divisor();
        let is_ship = sheet.is_ship();

        let mut base = exact(&sheet.base);
        let mut bonus = exact(&sheet.bonus);
        let mut mods = sheet.mods.as_ref().map(exact);

        if self.options.converts_percentages() {
            for id in CONVERTED_STATS {
                if let Some(conversion) = Conversion::for_stat(id, sheet.level, is_ship) {
                    convert(id, conversion, &mut base, &mut bonus, mods.as_mut());
                }
            }
        }

        let base = render(&base, divisor);
        let bonus = render(&bonus, divisor);
        let mods = mods.map(|m| render(&m, divisor));
        let bonus_section = StatSection::from(sheet.source);

        let mut sections = BTreeMap::new();
        if self.options.game_style {
            sections.insert(
                StatSection::Final,
                final_table(&base, &bonus, mods.as_ref(), is_ship),
            );
            if is_ship {
                sections.insert(bonus_section, bonus);
            } else if let Some(mods) = mods {
                sections.insert(StatSection::Mods, mods);
            }
        } else {
            let growth = exact(&sheet.growth_modifiers);
            sections.insert(StatSection::Base, base);
            sections.insert(bonus_section, bonus);
            if let Some(mods) = mods {
                sections.insert(StatSection::Mods, mods);
            }
            sections.insert(StatSection::GrowthModifiers, render(&growth, divisor));
        }

        let labels = self
            .options
            .language
            .clone()
            .map(|names| StatLabels::new(names, self.options.no_space));

        UnitStats { sections, labels }
    }
}

fn final_table(
    base: &BTreeMap<StatId, f64>,
    bonus: &BTreeMap<StatId, f64>,
    mods: Option<&BTreeMap<StatId, f64>>,
    is_ship: bool,
) -> BTreeMap<StatId, f64> {
    let no_mods = BTreeMap::new();
    let mods = mods.unwrap_or(&no_mods);
    let all_ids: BTreeSet<StatId> = base
        .keys()
        .chain(bonus.keys())
        .chain(mods.keys())
        .copied()
        .collect();

    let mut out = BTreeMap::new();
    for id in all_ids {
        let target = if is_ship { id } else { final_id(id) };
        let value = base.get(&id).copied().unwrap_or(0.0)
            + bonus.get(&id).copied().unwrap_or(0.0)
            + mods.get(&id).copied().unwrap_or(0.0);
        *out.entry(target).or_insert(0.0) += value;
    }
    out
}

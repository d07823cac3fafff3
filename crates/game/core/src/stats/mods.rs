//! Mod aggregation.
//!
//! Raw mod stats are summed per id together with completed set bonuses, then
//! redistributed onto the stats they affect. Percent bonuses on base stats use
//! the base table as it stood before mods.

use std::collections::BTreeMap;

use super::fixed::Fixed;
use super::ids::{self, StatId};
use super::table::StatTable;
use crate::config::CalcConfig;
use crate::env::{GameData, OracleError};
use crate::unit::ModConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct SetProgress {
    count: u32,
    max_level: u32,
}

/// Computes the mods table from equipped mods and the pre-mod `base`.
///
/// # Errors
///
/// `ModSetNotFound` for an equipped set that is not defined.
pub fn aggregate(data: &GameData, base: &StatTable, mods: &[ModConfig]) -> Result<StatTable, OracleError> {
    let mut sets: BTreeMap<u8, SetProgress> = BTreeMap::new();
    let mut raw = StatTable::new();

    for m in mods {
        let Some(set) = m.set else {
            continue;
        };
        let progress = sets.entry(set).or_default();
        progress.count += 1;
        if m.level == CalcConfig::MAX_MOD_LEVEL {
            progress.max_level += 1;
        }
        for &(id, value) in &m.stats {
            raw.add(id, value);
        }
    }

    for (&set, progress) in &sets {
        let definition = data.mod_set(set)?;
        let required = definition.count.max(1);
        let multiplier = progress.count / required + progress.max_level / required;
        raw.add(definition.id, definition.value.mul_int(i64::from(multiplier)));
    }

    Ok(redistribute(base, &raw))
}

/// Maps raw mod stats onto the stats they modify, in ascending id order.
fn redistribute(base: &StatTable, raw: &StatTable) -> StatTable {
    let mut out = StatTable::new();
    for (id, value) in raw.iter() {
        match id {
            ids::OFFENSE => {
                out.add(ids::PHYSICAL_DAMAGE, value);
                out.add(ids::SPECIAL_DAMAGE, value);
            }
            ids::DEFENSE => {
                out.add(ids::ARMOR, value);
                out.add(ids::RESISTANCE, value);
            }
            ids::OFFENSE_PERCENT => {
                add_percent_of_base(&mut out, base, ids::PHYSICAL_DAMAGE, value);
                add_percent_of_base(&mut out, base, ids::SPECIAL_DAMAGE, value);
            }
            ids::DEFENSE_PERCENT => {
                add_percent_of_base(&mut out, base, ids::ARMOR, value);
                add_percent_of_base(&mut out, base, ids::RESISTANCE, value);
            }
            ids::CRIT_CHANCE_PERCENT => {
                out.add(ids::PHYSICAL_CRIT_CHANCE, value);
                out.add(ids::SPECIAL_CRIT_CHANCE, value);
            }
            ids::CRIT_AVOIDANCE_PERCENT => {
                out.add(ids::PHYSICAL_CRIT_AVOIDANCE_PERCENT, value);
                out.add(ids::SPECIAL_CRIT_AVOIDANCE_PERCENT, value);
            }
            ids::HEALTH_PERCENT => add_percent_of_base(&mut out, base, ids::HEALTH, value),
            ids::PROTECTION_PERCENT => add_percent_of_base(&mut out, base, ids::PROTECTION, value),
            ids::SPEED_PERCENT => add_percent_of_base(&mut out, base, ids::SPEED, value),
            other => out.add(other, value),
        }
    }
    out
}

/// `out[target] = floor(out[target] + base[target] × pct)` to whole units.
fn add_percent_of_base(out: &mut StatTable, base: &StatTable, target: StatId, pct: Fixed) {
    let total = out.get(target) + base.get(target).mul_fixed(pct);
    out.set(target, total.floor_to(8));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ModSetDefinition;
    use crate::stats::{PERCENT_SCALE, UNIT};

    fn data() -> GameData {
        let mut data = GameData::default();
        // health: 10% per 2 pieces; speed: 10% per 4 pieces
        data.mod_set_data.insert(
            1,
            ModSetDefinition {
                id: ids::HEALTH_PERCENT,
                count: 2,
                value: Fixed::from_raw(10 * PERCENT_SCALE),
            },
        );
        data.mod_set_data.insert(
            4,
            ModSetDefinition {
                id: ids::SPEED_PERCENT,
                count: 4,
                value: Fixed::from_raw(10 * PERCENT_SCALE),
            },
        );
        data
    }

    fn speed_mods(count: usize, level: u8) -> Vec<ModConfig> {
        (0..count)
            .map(|_| ModConfig {
                set: Some(4),
                pips: 5,
                level,
                tier: 5,
                stats: Vec::new(),
            })
            .collect()
    }

    fn base() -> StatTable {
        [
            (ids::HEALTH, Fixed::from_units(10_000)),
            (ids::SPEED, Fixed::from_units(150)),
            (ids::PHYSICAL_DAMAGE, Fixed::from_units(1_000)),
            (ids::SPECIAL_DAMAGE, Fixed::from_units(500)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn set_bonus_counts_completed_sets() {
        let data = data();
        // four pieces below max level: one set
        let one = aggregate(&data, &base(), &speed_mods(4, 12)).unwrap();
        assert_eq!(one.get(ids::SPEED), Fixed::from_units(15));
        // four pieces at max level: counted twice
        let two = aggregate(&data, &base(), &speed_mods(4, 15)).unwrap();
        assert_eq!(two.get(ids::SPEED), Fixed::from_units(30));
        // three pieces: no bonus
        let none = aggregate(&data, &base(), &speed_mods(3, 15)).unwrap();
        assert_eq!(none.get(ids::SPEED), Fixed::ZERO);
    }

    #[test]
    fn flat_and_percent_offense_are_redistributed() {
        let mods = vec![ModConfig {
            set: Some(1),
            pips: 5,
            level: 1,
            tier: 1,
            stats: vec![
                (ids::OFFENSE, Fixed::from_units(50)),
                (ids::OFFENSE_PERCENT, Fixed::from_raw(5_880_000)),
            ],
        }];
        let out = aggregate(&data(), &base(), &mods).unwrap();
        // 50 + floor(1000 × 5.88%) = 50 + 58
        assert_eq!(out.get(ids::PHYSICAL_DAMAGE), Fixed::from_units(108));
        // 50 + floor(500 × 5.88%) = 50 + 29
        assert_eq!(out.get(ids::SPECIAL_DAMAGE), Fixed::from_units(79));
        assert!(!out.contains(ids::OFFENSE));
    }

    #[test]
    fn protection_percent_without_base_protection_is_zero() {
        let mods = vec![ModConfig {
            set: Some(1),
            pips: 5,
            level: 1,
            tier: 1,
            stats: vec![(ids::PROTECTION_PERCENT, Fixed::from_raw(20 * PERCENT_SCALE))],
        }];
        let out = aggregate(&data(), &base(), &mods).unwrap();
        assert_eq!(out.value(ids::PROTECTION), Some(Fixed::ZERO));
    }

    #[test]
    fn crit_chance_feeds_both_damage_types() {
        let mods = vec![ModConfig {
            set: Some(1),
            pips: 5,
            level: 1,
            tier: 1,
            stats: vec![(ids::CRIT_CHANCE_PERCENT, Fixed::from_raw(2 * UNIT / 100))],
        }];
        let out = aggregate(&data(), &base(), &mods).unwrap();
        assert_eq!(out.get(ids::PHYSICAL_CRIT_CHANCE), Fixed::from_raw(2_000_000));
        assert_eq!(out.get(ids::SPECIAL_CRIT_CHANCE), Fixed::from_raw(2_000_000));
    }

    #[test]
    fn placeholders_and_unknown_sets() {
        let out = aggregate(&data(), &base(), &[ModConfig::default()]).unwrap();
        assert!(out.is_empty());

        let unknown = vec![ModConfig {
            set: Some(9),
            ..ModConfig::default()
        }];
        assert_eq!(
            aggregate(&data(), &base(), &unknown).unwrap_err(),
            OracleError::ModSetNotFound(9)
        );
    }

    #[test]
    fn defense_crit_avoidance_and_health_are_redistributed() {
        let base: StatTable = [
            (ids::HEALTH, Fixed::from_units(10_001)),
            (ids::ARMOR, Fixed::from_units(210)),
            (ids::RESISTANCE, Fixed::from_units(95)),
        ]
        .into_iter()
        .collect();
        let mods = vec![ModConfig {
            set: Some(1),
            pips: 5,
            level: 1,
            tier: 1,
            stats: vec![
                (ids::DEFENSE, Fixed::from_units(10)),
                (ids::DEFENSE_PERCENT, Fixed::from_raw(5 * PERCENT_SCALE)),
                (ids::CRIT_AVOIDANCE_PERCENT, Fixed::from_raw(3 * PERCENT_SCALE)),
                (ids::HEALTH_PERCENT, Fixed::from_raw(2_500_000)),
            ],
        }];
        let out = aggregate(&data(), &base, &mods).unwrap();
        // floor(10 + 210 × 5%) and floor(10 + 95 × 5%)
        assert_eq!(out.get(ids::ARMOR), Fixed::from_units(20));
        assert_eq!(out.get(ids::RESISTANCE), Fixed::from_units(14));
        assert_eq!(
            out.get(ids::PHYSICAL_CRIT_AVOIDANCE_PERCENT),
            Fixed::from_raw(3_000_000)
        );
        assert_eq!(
            out.get(ids::SPECIAL_CRIT_AVOIDANCE_PERCENT),
            Fixed::from_raw(3_000_000)
        );
        // floor(10001 × 2.5%)
        assert_eq!(out.get(ids::HEALTH), Fixed::from_units(250));
        for id in [
            ids::DEFENSE,
            ids::DEFENSE_PERCENT,
            ids::CRIT_AVOIDANCE_PERCENT,
            ids::HEALTH_PERCENT,
        ] {
            assert!(!out.contains(id));
        }
    }
}

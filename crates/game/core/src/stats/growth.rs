//! Growth derivation: primaries from growth modifiers, mastery, secondaries
//! from primaries, and the fixed minimums every unit gets.

use super::fixed::{Fixed, UNIT};
use super::ids::{self, StatId};
use super::sheet::StatSheet;
use super::table::StatTable;
use crate::env::{GameData, OracleError};

/// Digits floored away when truncating to whole display units.
const WHOLE: u32 = 8;

/// Applies every derivation to `sheet.base`, in order. Shared by characters
/// and ships.
///
/// # Errors
///
/// Missing unit definition, primary stat, or mastery table when mastery is
/// non-zero.
pub fn derive(data: &GameData, def_id: &str, sheet: &mut StatSheet) -> Result<(), OracleError> {
    let def = data.unit(def_id)?;
    let level = i64::from(sheet.level);
    let base = &mut sheet.base;

    for id in ids::PRIMARY {
        let growth = sheet.growth_modifiers.get(id).mul_int(level).floor_to(WHOLE);
        base.add(id, growth);
    }

    let mastery = base.get(ids::MASTERY);
    if !mastery.is_zero() {
        let table_id = def
            .mastery_modifier_id
            .as_deref()
            .ok_or_else(|| OracleError::MasteryTableNotFound(def_id.to_string()))?;
        for (id, &coefficient) in data.cr_tables.mastery_table(table_id)?.iter() {
            base.add(id as StatId, mastery.mul_coefficient(coefficient));
        }
    }

    let strength = base.get(ids::STRENGTH);
    let agility = base.get(ids::AGILITY);
    let tactics = base.get(ids::TACTICS);
    let primary = base.get(def.primary(def_id)?);

    base.add(ids::HEALTH, strength.mul_int(18));
    derive_floored(base, ids::PHYSICAL_DAMAGE, &[(primary, 14)], 10);
    derive_floored(base, ids::SPECIAL_DAMAGE, &[(tactics, 24)], 10);
    derive_floored(base, ids::ARMOR, &[(strength, 14), (agility, 7)], 100);
    derive_floored(base, ids::RESISTANCE, &[(tactics, 1)], 10);
    derive_floored(base, ids::PHYSICAL_CRIT_RATING, &[(agility, 4)], 10);

    base.add(ids::DODGE_RATING, Fixed::from_units(24));
    base.add(ids::DEFLECTION_RATING, Fixed::from_units(24));
    base.ensure(ids::SPECIAL_CRIT_RATING);
    base.add(ids::CRIT_DAMAGE, Fixed::from_raw(150 * UNIT / 100));
    base.add(ids::TENACITY, Fixed::from_raw(15 * UNIT / 100));

    Ok(())
}

/// `base[id] = floor(base[id] + Σ value × weight / denominator)` to whole
/// display units, evaluated as one exact sum.
fn derive_floored(base: &mut StatTable, id: StatId, terms: &[(Fixed, i64)], denominator: i64) {
    let weighted: i128 = terms
        .iter()
        .map(|&(value, weight)| value.raw() as i128 * weight as i128)
        .sum();
    let current = base.get(id).raw() as i128 * denominator as i128;
    let total = (current + weighted).div_euclid(denominator as i128) as i64;
    base.set(id, Fixed::from_raw(total).floor_to(WHOLE));
}

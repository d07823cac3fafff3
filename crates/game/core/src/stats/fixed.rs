//! Fixed-point magnitudes used by every stat layer.
//!
//! Two representations are used and never mixed implicitly:
//!
//! - [`Fixed`]: a stat magnitude in "unscaled" form, i.e. the displayed value
//!   multiplied by 1e8 and stored as an integer. Percent stats use the same
//!   scale for their fractional value (5.88% is `0.0588 × 1e8`).
//! - [`Coefficient`]: a dimensionless table value (growth coefficients, crew
//!   contribution factors, CR/GP table entries) carrying twelve decimal places.
//!
//! Products are evaluated in `i128` and truncated toward negative infinity only
//! where a caller asks for it through [`Fixed::floor_to`] or the explicit
//! `floor` constructors.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw units per displayed unit.
pub const UNIT: i64 = 100_000_000;

/// Scale applied to display values of flat stats (health, speed, ...).
pub const FLAT_SCALE: i64 = UNIT;

/// Scale applied to display values of percent stats (5.88 → 5 880 000).
pub const PERCENT_SCALE: i64 = 1_000_000;

const COEFFICIENT_ONE: i128 = 1_000_000_000_000;

/// Unscaled stat magnitude (display value × 1e8).
///
/// Deserializes from an integer or a float rounded to the nearest raw unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Fixed(i64);

impl Fixed {
    pub const ZERO: Self = Self(0);

    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Whole display units (e.g. `from_units(24)` is 24 dodge rating).
    pub const fn from_units(units: i64) -> Self {
        Self(units * UNIT)
    }

    /// Converts a display value using the given scale, rounding to the
    /// nearest raw unit.
    pub fn from_display(value: f64, scale: i64) -> Self {
        Self((value * scale as f64).round() as i64)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Floors to a multiple of `10^digits` raw units.
    ///
    /// `floor_to(8)` truncates to whole display units, `floor_to(0)` is the
    /// identity on integers.
    pub fn floor_to(self, digits: u32) -> Self {
        let step = 10_i64.pow(digits);
        Self(self.0.div_euclid(step) * step)
    }

    pub const fn mul_int(self, factor: i64) -> Self {
        Self(self.0 * factor)
    }

    /// `self × numerator / denominator`, floored to a raw unit.
    pub fn mul_ratio(self, numerator: i64, denominator: i64) -> Self {
        let product = self.0 as i128 * numerator as i128;
        Self(product.div_euclid(denominator as i128) as i64)
    }

    /// Multiplies by another unscaled magnitude interpreted as a fraction
    /// (`base × percent` for percent mods), floored to a raw unit.
    pub fn mul_fixed(self, other: Fixed) -> Self {
        self.mul_ratio(other.0, UNIT)
    }

    /// Multiplies by a table coefficient, floored to a raw unit.
    pub fn mul_coefficient(self, coefficient: Coefficient) -> Self {
        let product = self.0 as i128 * coefficient.0;
        Self(product.div_euclid(COEFFICIENT_ONE) as i64)
    }

    /// Rescales the raw integer for presentation; `divisor` is 1, 1e4 or 1e8.
    pub fn to_f64_div(self, divisor: i64) -> f64 {
        if divisor == 1 {
            self.0 as f64
        } else {
            self.0 as f64 / divisor as f64
        }
    }
}

impl Add for Fixed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Fixed {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Fixed {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Fixed {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dimensionless decimal with twelve fractional digits.
///
/// Deserializes from (and serializes to) a plain JSON number, so table files
/// can keep their natural decimal notation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coefficient(i128);

impl Coefficient {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(COEFFICIENT_ONE);

    pub const fn from_raw(raw: i128) -> Self {
        Self(raw)
    }

    pub const fn from_int(value: i64) -> Self {
        Self(value as i128 * COEFFICIENT_ONE)
    }

    /// Exact `numerator / denominator` (floored at the twelfth digit).
    pub fn from_ratio(numerator: i64, denominator: i64) -> Self {
        Self((numerator as i128 * COEFFICIENT_ONE).div_euclid(denominator as i128))
    }

    pub fn from_f64(value: f64) -> Self {
        Self((value * COEFFICIENT_ONE as f64).round() as i128)
    }

    pub const fn raw(self) -> i128 {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / COEFFICIENT_ONE as f64
    }

    pub fn mul(self, rhs: Coefficient) -> Self {
        Self((self.0 * rhs.0).div_euclid(COEFFICIENT_ONE))
    }

    pub const fn mul_int(self, factor: i64) -> Self {
        Self(self.0 * factor as i128)
    }

    /// Largest integer not greater than this value.
    pub fn floor(self) -> i64 {
        self.0.div_euclid(COEFFICIENT_ONE) as i64
    }

    /// Drops the fractional part (toward negative infinity), keeping the type.
    pub fn floor_whole(self) -> Self {
        Self::from_int(self.floor())
    }

    /// Interprets the coefficient as an unscaled stat magnitude, flooring to a
    /// raw unit.
    pub fn floor_fixed(self) -> Fixed {
        Fixed(self.floor())
    }
}

impl Add for Coefficient {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Coefficient {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Coefficient {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl Serialize for Coefficient {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Fixed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FixedVisitor;

        impl serde::de::Visitor<'_> for FixedVisitor {
            type Value = Fixed;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an unscaled stat value")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Fixed, E> {
                Ok(Fixed(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Fixed, E> {
                i64::try_from(v).map(Fixed).map_err(E::custom)
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Fixed, E> {
                if v.is_finite() {
                    Ok(Fixed(v.round() as i64))
                } else {
                    Err(E::custom("stat value must be finite"))
                }
            }
        }

        deserializer.deserialize_any(FixedVisitor)
    }
}

impl<'de> Deserialize<'de> for Coefficient {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("table coefficient must be finite"));
        }
        Ok(Self::from_f64(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_to_truncates_toward_negative_infinity() {
        assert_eq!(Fixed::from_raw(1_234_567_891).floor_to(8).raw(), 1_200_000_000);
        assert_eq!(Fixed::from_raw(-1).floor_to(8).raw(), -100_000_000);
        assert_eq!(Fixed::from_raw(42).floor_to(0).raw(), 42);
    }

    #[test]
    fn coefficient_parses_decimal_exactly() {
        let c: Coefficient = serde_json::from_str("1.61").unwrap();
        assert_eq!(c, Coefficient::from_ratio(161, 100));
        let whole: Coefficient = serde_json::from_str("3").unwrap();
        assert_eq!(whole, Coefficient::from_int(3));
    }

    #[test]
    fn coefficient_multiplication_keeps_decimals() {
        let level = Coefficient::from_int(100);
        let weighted = level.mul(Coefficient::from_ratio(7, 2));
        assert_eq!(weighted, Coefficient::from_int(350));
        assert_eq!(Coefficient::from_ratio(3, 2).floor(), 1);
        assert_eq!(Coefficient::from_ratio(-1, 2).floor(), -1);
    }

    #[test]
    fn percent_of_base_is_floored_to_raw_units() {
        // 1000 health × 5.88%
        let base = Fixed::from_units(1000);
        let pct = Fixed::from_display(5.88, PERCENT_SCALE);
        assert_eq!(base.mul_fixed(pct), Fixed::from_raw(5_880_000_000));
    }
}

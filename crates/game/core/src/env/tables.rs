//! Crew-rating and galactic-power lookup tables.
//!
//! The tables are keyed by small integers (level, rarity, gear tier, mod pips,
//! ...). Source data writes them either as JSON arrays indexed by key or as
//! objects with stringified keys; [`Lookup`] accepts both.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::OracleError;
use crate::stats::Coefficient;

/// Integer-keyed lookup table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lookup<V>(BTreeMap<u32, V>);

impl<V> Default for Lookup<V> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<V> Lookup<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: u32) -> Option<&V> {
        self.0.get(&key)
    }

    /// Looks up `key`, reporting the table name when it is missing.
    pub fn at(&self, key: u32, table: &'static str) -> Result<&V, OracleError> {
        self.0.get(&key).ok_or_else(|| OracleError::TableEntryNotFound {
            table,
            key: key.to_string(),
        })
    }

    pub fn insert(&mut self, key: u32, value: V) {
        self.0.insert(key, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &V)> {
        self.0.iter().map(|(&key, value)| (key, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> FromIterator<(u32, V)> for Lookup<V> {
    fn from_iter<I: IntoIterator<Item = (u32, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V: Copy> Lookup<V> {
    /// Copies the value at `key`, reporting the table name when missing.
    pub fn value(&self, key: u32, table: &'static str) -> Result<V, OracleError> {
        self.at(key, table).copied()
    }
}

impl<V: Serialize> Serialize for Lookup<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key.to_string(), value)))
    }
}

/// Map key that accepts both `"12"` and `12`.
struct LookupKey(u32);

impl<'de> Deserialize<'de> for LookupKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = LookupKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer table key")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<LookupKey, E> {
                u32::try_from(v).map(LookupKey).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<LookupKey, E> {
                u32::try_from(v).map(LookupKey).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<LookupKey, E> {
                v.trim().parse().map(LookupKey).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Lookup<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LookupVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for LookupVisitor<V> {
            type Value = Lookup<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array or an integer-keyed object")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Lookup<V>, A::Error> {
                let mut entries = BTreeMap::new();
                let mut index = 0u32;
                // Arrays commonly leave index 0 as null
                while let Some(value) = seq.next_element::<Option<V>>()? {
                    if let Some(value) = value {
                        entries.insert(index, value);
                    }
                    index += 1;
                }
                Ok(Lookup(entries))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Lookup<V>, A::Error> {
                let mut entries = BTreeMap::new();
                while let Some((LookupKey(key), value)) = map.next_entry::<LookupKey, V>()? {
                    entries.insert(key, value);
                }
                Ok(Lookup(entries))
            }
        }

        deserializer.deserialize_any(LookupVisitor(PhantomData))
    }
}

/// Crew-rating tables used to scale ship stats by their crew.
///
/// Besides the named tables, the source bundle stores each mastery-modifier
/// table as an extra top-level key; those are collected into
/// `mastery_modifiers`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrTables {
    #[serde(rename = "unitLevelCR")]
    pub unit_level: Lookup<Coefficient>,
    #[serde(rename = "crewRarityCR")]
    pub crew_rarity: Lookup<Coefficient>,
    #[serde(rename = "gearLevelCR")]
    pub gear_level: Lookup<Coefficient>,
    #[serde(rename = "gearPieceCR")]
    pub gear_piece: Lookup<Coefficient>,
    #[serde(rename = "abilityLevelCR")]
    pub ability_level: Lookup<Coefficient>,
    /// pips → mod level → CR
    #[serde(rename = "modRarityLevelCR")]
    pub mod_rarity_level: Lookup<Lookup<Coefficient>>,
    #[serde(rename = "relicTierCR", default)]
    pub relic_tier: Lookup<Coefficient>,
    #[serde(rename = "relicTierLevelFactor", default)]
    pub relic_tier_level_factor: Lookup<Coefficient>,
    #[serde(rename = "shipRarityFactor")]
    pub ship_rarity_factor: Lookup<Coefficient>,
    #[serde(flatten)]
    pub mastery_modifiers: HashMap<String, Lookup<Coefficient>>,
}

impl CrTables {
    /// Mastery coefficient table by id.
    pub fn mastery_table(&self, id: &str) -> Result<&Lookup<Coefficient>, OracleError> {
        self.mastery_modifiers
            .get(id)
            .ok_or_else(|| OracleError::MasteryTableNotFound(id.to_string()))
    }
}

/// Galactic-power tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GpTables {
    #[serde(rename = "unitLevelGP")]
    pub unit_level: Lookup<Coefficient>,
    #[serde(rename = "unitRarityGP")]
    pub unit_rarity: Lookup<Coefficient>,
    #[serde(rename = "gearLevelGP")]
    pub gear_level: Lookup<Coefficient>,
    /// gear tier → slot → GP
    #[serde(rename = "gearPieceGP")]
    pub gear_piece: Lookup<Lookup<Coefficient>>,
    #[serde(rename = "abilityLevelGP")]
    pub ability_level: Lookup<Coefficient>,
    /// Power override tag (e.g. `"ultimate"`, `"zeta"`) → GP
    #[serde(rename = "abilitySpecialGP")]
    pub ability_special: HashMap<String, Coefficient>,
    /// pips → mod level → mod tier → GP
    #[serde(rename = "modRarityLevelTierGP")]
    pub mod_rarity_level_tier: Lookup<Lookup<Lookup<Coefficient>>>,
    #[serde(rename = "relicTierGP", default)]
    pub relic_tier: Lookup<Coefficient>,
    #[serde(rename = "relicTierLevelFactor", default)]
    pub relic_tier_level_factor: Lookup<Coefficient>,
    #[serde(rename = "shipRarityFactor")]
    pub ship_rarity_factor: Lookup<Coefficient>,
    #[serde(rename = "crewSizeFactor")]
    pub crew_size_factor: Lookup<Coefficient>,
}

impl GpTables {
    pub fn special(&self, tag: &str) -> Result<Coefficient, OracleError> {
        self.ability_special
            .get(tag)
            .copied()
            .ok_or_else(|| OracleError::PowerTagNotFound(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_arrays_and_objects() {
        let from_array: Lookup<Coefficient> = serde_json::from_str("[null, 1.5, 2]").unwrap();
        assert_eq!(from_array.get(0), None);
        assert_eq!(from_array.get(1), Some(&Coefficient::from_ratio(3, 2)));

        let from_object: Lookup<Coefficient> =
            serde_json::from_str(r#"{"1": 1.5, "2": 2}"#).unwrap();
        assert_eq!(from_array, from_object);
    }

    #[test]
    fn mastery_tables_are_collected_from_extra_keys() {
        let json = r#"{
            "unitLevelCR": {"1": 1},
            "crewRarityCR": {"1": 1},
            "gearLevelCR": {"1": 1},
            "gearPieceCR": {"1": 1},
            "abilityLevelCR": {"1": 1},
            "modRarityLevelCR": {"5": {"15": 2.5}},
            "shipRarityFactor": {"7": 1.2},
            "tank_mastery": {"1": 0.5, "28": 0.25}
        }"#;
        let tables: CrTables = serde_json::from_str(json).unwrap();
        let mastery = tables.mastery_table("tank_mastery").unwrap();
        assert_eq!(mastery.get(28), Some(&Coefficient::from_ratio(1, 4)));
        assert_eq!(
            tables.mod_rarity_level.get(5).and_then(|l| l.get(15)),
            Some(&Coefficient::from_ratio(5, 2))
        );
        assert!(matches!(
            tables.mastery_table("missing"),
            Err(OracleError::MasteryTableNotFound(_))
        ));
    }
}

//! Additive stat-id → magnitude tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::fixed::Fixed;
use super::ids::StatId;

/// Mapping from stat id to unscaled magnitude.
///
/// Ordered by id so iteration, serialization and formatting are deterministic.
/// Every merge is additive; an id appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatTable(BTreeMap<StatId, Fixed>);

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `id`, treating an absent stat as zero.
    pub fn get(&self, id: StatId) -> Fixed {
        self.0.get(&id).copied().unwrap_or_default()
    }

    pub fn value(&self, id: StatId) -> Option<Fixed> {
        self.0.get(&id).copied()
    }

    pub fn contains(&self, id: StatId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn set(&mut self, id: StatId, value: Fixed) {
        self.0.insert(id, value);
    }

    /// Adds `delta` to `id`, inserting it when absent.
    pub fn add(&mut self, id: StatId, delta: Fixed) {
        *self.0.entry(id).or_default() += delta;
    }

    /// Ensures `id` is present, inserting zero when absent.
    pub fn ensure(&mut self, id: StatId) {
        self.0.entry(id).or_default();
    }

    /// Adds every entry of `other` into this table.
    pub fn merge(&mut self, other: &StatTable) {
        for (&id, &value) in &other.0 {
            self.add(id, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatId, Fixed)> + '_ {
        self.0.iter().map(|(&id, &value)| (id, value))
    }

    pub fn ids(&self) -> impl Iterator<Item = StatId> + '_ {
        self.0.keys().copied()
    }

    /// Applies `f` to every value in place.
    pub fn map_values(&mut self, mut f: impl FnMut(StatId, Fixed) -> Fixed) {
        for (&id, value) in self.0.iter_mut() {
            *value = f(id, *value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(StatId, Fixed)> for StatTable {
    fn from_iter<I: IntoIterator<Item = (StatId, Fixed)>>(iter: I) -> Self {
        let mut table = StatTable::new();
        for (id, value) in iter {
            table.add(id, value);
        }
        table
    }
}

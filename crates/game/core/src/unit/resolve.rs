//! Record normalization and override application.
//!
//! A ship's crew is resolved against the ship's declared roster: supplied
//! members get the crew overrides, missing ones are synthesized from them.

use super::overrides::{OverrideTarget, UnitOverrides, UseValues};
use super::record::UnitRecord;
use super::{ShipConfig, UnitConfig};
use crate::env::GameData;
use crate::error::CalcError;

/// Ship configuration together with its crew, in roster order when
/// overrides were applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedShip {
    pub ship: ShipConfig,
    pub crew: Vec<UnitConfig>,
}

/// Normalizes input records and applies `useValues` overrides.
#[derive(Clone, Copy, Debug)]
pub struct UnitResolver<'a> {
    data: &'a GameData,
}

impl<'a> UnitResolver<'a> {
    pub fn new(data: &'a GameData) -> Self {
        Self { data }
    }

    /// Resolves a character configuration.
    ///
    /// # Errors
    ///
    /// Fails on malformed records, and on unknown units or gear tiers when
    /// character overrides are given.
    pub fn character(
        &self,
        record: UnitRecord,
        use_values: Option<&UseValues>,
    ) -> Result<UnitConfig, CalcError> {
        let unit = UnitConfig::try_from(record)?;
        let Some(overrides) = use_values.and_then(|values| values.character.as_ref()) else {
            return Ok(unit);
        };
        let def = self.data.unit(&unit.def_id)?;
        Ok(overrides.apply(unit, def, OverrideTarget::Character)?)
    }

    /// Resolves a ship and its crew.
    ///
    /// Without overrides the crew is returned as supplied and validated later
    /// against the roster. With overrides, each declared crew id is resolved
    /// on its own: the supplied member with that id is used, or one is
    /// synthesized from the crew overrides; supplied units outside the roster
    /// are dropped.
    ///
    /// # Errors
    ///
    /// `CrewMembership` when a declared member is missing and the crew
    /// overrides do not give rarity, level and gear.
    pub fn ship(
        &self,
        ship: UnitRecord,
        crew: Vec<UnitRecord>,
        use_values: Option<&UseValues>,
    ) -> Result<ResolvedShip, CalcError> {
        let mut ship = ShipConfig::from(ship);
        let mut supplied = crew
            .into_iter()
            .map(UnitConfig::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let Some(values) = use_values else {
            return Ok(ResolvedShip {
                ship,
                crew: supplied,
            });
        };

        let def = self.data.unit(&ship.def_id)?;
        if let Some(overrides) = &values.ship {
            overrides.apply(&mut ship, def);
        }

        let no_overrides = UnitOverrides::default();
        let crew_overrides = values.crew.as_ref().unwrap_or(&no_overrides);
        let mut resolved = Vec::with_capacity(def.crew.len());
        for member_id in &def.crew {
            let member_def = self.data.unit(member_id)?;
            let member = match supplied.iter().position(|unit| &unit.def_id == member_id) {
                Some(index) => supplied.swap_remove(index),
                None => crew_overrides.synthesize(member_id).ok_or_else(|| {
                    CalcError::CrewMembership {
                        ship: ship.def_id.clone(),
                        unit: member_id.clone(),
                    }
                })?,
            };
            resolved.push(crew_overrides.apply(member, member_def, OverrideTarget::Crew)?);
        }

        tracing::debug!(
            ship = %ship.def_id,
            crew = resolved.len(),
            dropped = supplied.len(),
            "applied ship overrides"
        );

        Ok(ResolvedShip {
            ship,
            crew: resolved,
        })
    }
}

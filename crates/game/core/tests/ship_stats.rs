mod common;

use common::*;
use serde_json::json;
use statcalc_core::stats::ids;
use statcalc_core::{CalcError, CalcOptions, Calculator, StatSection, UseValues};

#[test]
fn crew_rating_scales_crew_stats() {
    let data = game_data();
    let stats = Calculator::new(&data)
        .ship_stats(
            record(ship()),
            vec![record(hero()), record(pilot())],
            &CalcOptions::default(),
        )
        .unwrap();

    // crew rating 28 + 23, rarity factor 2
    assert_eq!(stats.get(StatSection::Crew, ids::HEALTH), Some(1020.0));
    // 10.2 floored to whole units
    assert_eq!(stats.get(StatSection::Crew, ids::SPEED), Some(10.0));
    // non-integral stats keep raw precision
    assert_eq!(stats.get(StatSection::Crew, ids::CRIT_DAMAGE), Some(0.102));

    // 5000 + 95 strength × 18
    assert_eq!(stats.get(StatSection::Base, ids::HEALTH), Some(6710.0));
    assert_eq!(stats.get(StatSection::Base, ids::SPEED), Some(80.0));
    assert!(stats.section(StatSection::Gear).is_none());
    assert!(stats.section(StatSection::Mods).is_none());
}

#[test]
fn crew_order_does_not_matter() {
    let data = game_data();
    let calc = Calculator::new(&data);
    let options = CalcOptions::default();
    let forward = calc
        .ship_stats(record(ship()), vec![record(hero()), record(pilot())], &options)
        .unwrap();
    let reversed = calc
        .ship_stats(record(ship()), vec![record(pilot()), record(hero())], &options)
        .unwrap();
    assert_eq!(forward, reversed);
}

#[test]
fn wrong_crew_size_is_rejected() {
    let data = game_data();
    let err = Calculator::new(&data)
        .ship_stats(record(ship()), vec![record(hero())], &CalcOptions::default())
        .unwrap_err();

    assert!(err.is_crew_mismatch());
    assert_eq!(
        err.root_cause(),
        &CalcError::CrewCount {
            ship: "SHIP".into(),
            expected: 2,
            actual: 1,
        }
    );
    let CalcError::Ship { ship, input, .. } = &err else {
        panic!("ship errors carry diagnostics: {err:?}");
    };
    assert_eq!(ship, "SHIP");
    assert!(input.contains("SHIP"));
}

#[test]
fn duplicate_crew_member_is_rejected() {
    let data = game_data();
    let err = Calculator::new(&data)
        .ship_stats(
            record(ship()),
            vec![record(hero()), record(hero())],
            &CalcOptions::default(),
        )
        .unwrap_err();
    assert_eq!(
        err.root_cause(),
        &CalcError::CrewMembership {
            ship: "SHIP".into(),
            unit: "HERO".into(),
        }
    );
}

#[test]
fn crewless_ship_rejects_any_crew() {
    let data = game_data();
    let err = Calculator::new(&data)
        .ship_stats(record(drone()), vec![record(hero())], &CalcOptions::default())
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        CalcError::CrewCount {
            expected: 0,
            actual: 1,
            ..
        }
    ));
}

/// The crewless rating is an approximation of the in-game value; this checks
/// the approximation itself.
#[test]
fn crewless_ship_uses_approximate_rating() {
    let data = game_data();
    let stats = Calculator::new(&data)
        .ship_stats(record(drone()), Vec::new(), &CalcOptions::default())
        .unwrap();
    // floor(7 + 10 × 3.5 + 0.696 × 2 + 2.46 × 1) = 45, rarity factor 2
    assert_eq!(stats.get(StatSection::Crew, ids::HEALTH), Some(900.0));
}

#[test]
fn crew_overrides_synthesize_missing_members() {
    let data = game_data();
    let use_values: UseValues = serde_json::from_value(json!({
        "crew": { "rarity": 7, "level": 85, "gear": 1 }
    }))
    .unwrap();
    let options = CalcOptions::default().with_use_values(use_values);
    let stats = Calculator::new(&data)
        .ship_stats(record(ship()), Vec::new(), &options)
        .unwrap();
    // two members at 10 + 7 + 2 each, no gear or skills
    assert_eq!(stats.get(StatSection::Crew, ids::HEALTH), Some(760.0));
}

#[test]
fn placeholder_crew_gear_counts_toward_crew_rating() {
    let data = game_data();
    let use_values: UseValues = serde_json::from_value(json!({
        "crew": { "rarity": 7, "level": 85, "gear": 1, "equipped": 3 }
    }))
    .unwrap();
    let options = CalcOptions::default().with_use_values(use_values);
    let stats = Calculator::new(&data)
        .ship_stats(record(ship()), Vec::new(), &options)
        .unwrap();
    // (19 + 3 × 0.5) per member
    assert_eq!(stats.get(StatSection::Crew, ids::HEALTH), Some(820.0));
}

#[test]
fn stand_in_crew_mods_count_toward_crew_rating() {
    let data = game_data();
    let use_values: UseValues = serde_json::from_value(json!({
        "crew": { "rarity": 7, "level": 85, "gear": 1, "modRarity": 6, "modLevel": 15 }
    }))
    .unwrap();
    let options = CalcOptions::default().with_use_values(use_values);
    let stats = Calculator::new(&data)
        .ship_stats(record(ship()), Vec::new(), &options)
        .unwrap();
    // (19 + 6 × 8) per member
    assert_eq!(stats.get(StatSection::Crew, ids::HEALTH), Some(2680.0));
}

#[test]
fn incomplete_crew_overrides_cannot_synthesize() {
    let data = game_data();
    let use_values: UseValues = serde_json::from_value(json!({
        "crew": { "rarity": 7, "level": 85 }
    }))
    .unwrap();
    let options = CalcOptions::default().with_use_values(use_values);
    let err = Calculator::new(&data)
        .ship_stats(record(ship()), vec![record(hero())], &options)
        .unwrap_err();
    assert_eq!(
        err.root_cause(),
        &CalcError::CrewMembership {
            ship: "SHIP".into(),
            unit: "PILOT".into(),
        }
    );
}

#[test]
fn game_style_keeps_the_crew_section() {
    let data = game_data();
    let stats = Calculator::new(&data)
        .ship_stats(
            record(ship()),
            vec![record(hero()), record(pilot())],
            &CalcOptions::default().with_game_style(),
        )
        .unwrap();
    let sections: Vec<_> = stats.sections().collect();
    assert_eq!(sections, vec![StatSection::Crew, StatSection::Final]);
    assert_eq!(stats.get(StatSection::Final, ids::HEALTH), Some(7730.0));
}

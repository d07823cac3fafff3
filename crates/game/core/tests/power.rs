mod common;

use common::*;
use serde_json::json;
use statcalc_core::{CalcError, Calculator, UseValues};

#[test]
fn character_power() {
    let data = game_data();
    let calc = Calculator::new(&data);
    // (100 level + 50 rarity + 10 gear + 2 + 3 pieces + 20 ability + 60 zeta) × 1.5
    assert_eq!(calc.character_gp(record(hero()), None).unwrap(), 367);
    assert_eq!(calc.character_gp(record(hero_profile()), None).unwrap(), 367);
}

#[test]
fn mods_relics_and_ultimates_add_power() {
    let data = game_data();
    let calc = Calculator::new(&data);

    let modded = with_field(hero(), "mods", json!(vec![speed_mod(); 4]));
    assert_eq!(calc.character_gp(record(modded), None).unwrap(), 607);

    // relic tier 3: 40 + 1 × level 85
    let relic = with_field(hero(), "relic", json!({ "currentTier": 3 }));
    assert_eq!(calc.character_gp(record(relic), None).unwrap(), 555);

    let ultimate = with_field(hero(), "purchasedAbilityId", json!(["ULT_HERO"]));
    assert_eq!(calc.character_gp(record(ultimate), None).unwrap(), 667);

    let none_purchased = with_field(hero(), "purchasedAbilityId", json!([]));
    assert_eq!(calc.character_gp(record(none_purchased), None).unwrap(), 367);
}

#[test]
fn character_overrides_change_power() {
    let data = game_data();
    let use_values: UseValues = serde_json::from_value(json!({
        "char": { "skills": "maxNoZeta", "equipped": "none" }
    }))
    .unwrap();
    let gp = Calculator::new(&data)
        .character_gp(record(hero()), Some(&use_values))
        .unwrap();
    // special drops to tier 7 (no tag, no ability entry) and gear is removed
    assert_eq!(gp, (100 + 50 + 10 + 20) * 3 / 2);
}

#[test]
fn ship_power_includes_crew_power() {
    let data = game_data();
    let gp = Calculator::new(&data)
        .ship_gp(record(ship()), vec![record(hero()), record(pilot())], None)
        .unwrap();
    // crew 367 + 270, × 2 rarity × 0.5 crew size, + 100 level + 5 ability
    assert_eq!(gp, 1113);
}

#[test]
fn ship_power_with_synthesized_crew() {
    let data = game_data();
    let use_values: UseValues = serde_json::from_value(json!({
        "crew": { "rarity": 7, "level": 85, "gear": 1 }
    }))
    .unwrap();
    let gp = Calculator::new(&data)
        .ship_gp(record(ship()), Vec::new(), Some(&use_values))
        .unwrap();
    assert_eq!(gp, 877);
}

#[test]
fn ship_power_with_stand_in_crew_mods() {
    let data = game_data();
    let use_values: UseValues = serde_json::from_value(json!({
        "crew": { "rarity": 7, "level": 85, "gear": 1, "modRarity": 6, "modLevel": 15 }
    }))
    .unwrap();
    let gp = Calculator::new(&data)
        .ship_gp(record(ship()), Vec::new(), Some(&use_values))
        .unwrap();
    // crew (160 + 6 × 50) × 1.5 = 690 each, + 100 level + 5 ability
    assert_eq!(gp, (690 * 2 + 105) * 3 / 2);
}

#[test]
fn ship_power_with_placeholder_crew_gear() {
    let data = game_data();
    let use_values: UseValues = serde_json::from_value(json!({
        "crew": { "rarity": 7, "level": 85, "gear": 1, "equipped": 3 }
    }))
    .unwrap();
    let gp = Calculator::new(&data)
        .ship_gp(record(ship()), Vec::new(), Some(&use_values))
        .unwrap();
    // crew (160 + 2 + 3 + 4) × 1.5 = 253 each
    assert_eq!(gp, 916);
}

#[test]
fn ship_power_validates_crew() {
    let data = game_data();
    let err = Calculator::new(&data)
        .ship_gp(record(ship()), vec![record(pilot())], None)
        .unwrap_err();
    assert!(matches!(err, CalcError::CrewCount { expected: 2, .. }));
}

/// Known-approximate crewless formula; the expected value follows the
/// formula, not the game.
#[test]
fn crewless_ship_power_is_approximate() {
    let data = game_data();
    let gp = Calculator::new(&data)
        .ship_gp(record(drone()), Vec::new(), None)
        .unwrap();
    // ((100 × 3.5 + 5 × 5.74 + 10 × 1.61) × 2 + 100 + 5 + 10) × 1.5
    assert_eq!(gp, 1356);
}

//! Shared fixtures: the sample game data bundle and unit records built on it.
#![allow(dead_code)]

use serde_json::{Value, json};
use statcalc_core::{GameData, UnitRecord};

const GAME_DATA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../../data/game_data.json"
));

pub fn game_data() -> GameData {
    serde_json::from_str(GAME_DATA).expect("sample game data parses")
}

pub fn record(value: Value) -> UnitRecord {
    UnitRecord::from_json(&value).expect("record shape is recognized")
}

/// Seven-star level 85 hero at gear 1 with two pieces and both skills maxed.
pub fn hero() -> Value {
    json!({
        "defId": "HERO",
        "rarity": 7,
        "level": 85,
        "gear": 1,
        "equipped": [
            { "equipmentId": "101", "slot": 0 },
            { "equipmentId": "102", "slot": 1 }
        ],
        "skills": [
            { "id": "basic_hero", "tier": 8 },
            { "id": "special_hero", "tier": 8 }
        ]
    })
}

/// The same hero as a raw profile record (skill tiers two lower).
pub fn hero_profile() -> Value {
    json!({
        "definitionId": "HERO:SEVEN_STAR",
        "currentRarity": 7,
        "currentLevel": 85,
        "currentTier": 1,
        "equipment": [
            { "equipmentId": "101", "slot": 0 },
            { "equipmentId": "102", "slot": 1 }
        ],
        "skill": [
            { "id": "basic_hero", "tier": 6 },
            { "id": "special_hero", "tier": 6 }
        ]
    })
}

pub fn pilot() -> Value {
    json!({
        "defId": "PILOT",
        "rarity": 7,
        "level": 85,
        "gear": 1,
        "skills": [{ "id": "basic_pilot", "tier": 8 }]
    })
}

pub fn ship() -> Value {
    json!({
        "defId": "SHIP",
        "rarity": 7,
        "level": 85,
        "skills": [{ "id": "hardware_ship", "tier": 3 }]
    })
}

pub fn drone() -> Value {
    json!({
        "defId": "DRONE",
        "rarity": 7,
        "level": 85,
        "skills": [
            { "id": "hardware_drone", "tier": 3 },
            { "id": "reinforcement_drone", "tier": 1 }
        ]
    })
}

/// Display-shape speed-set mod at max level with a flat speed primary.
pub fn speed_mod() -> Value {
    json!({
        "set": 4,
        "level": 15,
        "pips": 5,
        "tier": 5,
        "primaryStat": { "unitStat": 5, "value": 30 },
        "secondaryStat": []
    })
}

/// Raw-shape equivalent of [`speed_mod`].
pub fn raw_speed_mod() -> Value {
    json!({
        "definitionId": "451",
        "level": 15,
        "tier": 5,
        "primaryStat": { "stat": { "unitStatId": 5, "unscaledDecimalValue": "3000000000" } }
    })
}

pub fn with_field(mut value: Value, field: &str, extra: Value) -> Value {
    value
        .as_object_mut()
        .expect("record is an object")
        .insert(field.to_string(), extra);
    value
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

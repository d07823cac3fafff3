//! Game data bundle loader.

use std::path::Path;

use statcalc_core::GameData;

use crate::loaders::{LoadResult, read_file};

/// Loader for the static definition bundle.
pub struct GameDataLoader;

impl GameDataLoader {
    /// Load and validate a bundle from a JSON file.
    pub fn load(path: &Path) -> LoadResult<GameData> {
        let content = read_file(path)?;
        let data = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::debug!(
            path = %path.display(),
            units = data.unit_data.len(),
            gear = data.gear_data.len(),
            "loaded game data"
        );
        Ok(data)
    }

    /// Parse and validate a bundle from a JSON string.
    pub fn parse(content: &str) -> LoadResult<GameData> {
        let data: GameData = serde_json::from_str(content)?;
        Self::validate(&data)?;
        Ok(data)
    }

    /// Checks cross references that deserialization cannot: every declared
    /// crew member and every relic id must be defined in the bundle.
    pub fn validate(data: &GameData) -> LoadResult<()> {
        for (id, unit) in &data.unit_data {
            for member in &unit.crew {
                if !data.unit_data.contains_key(member) {
                    anyhow::bail!("Ship {} declares unknown crew member {}", id, member);
                }
            }
            for (tier, relic) in unit.relic.iter() {
                if !data.relic_data.contains_key(relic) {
                    anyhow::bail!("Unit {} references unknown relic {} at tier {}", id, relic, tier);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const BUNDLE: &str = r#"{
        "unitData": {
            "HERO": {
                "combatType": 1,
                "primaryStat": 2,
                "relic": { "3": "r1" }
            },
            "SHIP": {
                "combatType": 2,
                "crew": ["HERO"]
            }
        },
        "relicData": { "r1": { "stats": { "1": 100000000 } } },
        "crTables": {
            "unitLevelCR": [],
            "crewRarityCR": [],
            "gearLevelCR": [],
            "gearPieceCR": [],
            "abilityLevelCR": [],
            "modRarityLevelCR": [],
            "shipRarityFactor": []
        },
        "gpTables": {
            "unitLevelGP": [],
            "unitRarityGP": [],
            "gearLevelGP": [],
            "gearPieceGP": [],
            "abilityLevelGP": [],
            "abilitySpecialGP": {},
            "modRarityLevelTierGP": [],
            "shipRarityFactor": [],
            "crewSizeFactor": []
        }
    }"#;

    #[test]
    fn loads_bundle_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("game_data.json");
        fs::write(&path, BUNDLE).unwrap();

        let data = GameDataLoader::load(&path).unwrap();
        assert_eq!(data.unit_data.len(), 2);
        assert!(data.unit("SHIP").unwrap().is_ship());
        assert!(data.relic("r1").is_ok());
    }

    #[test]
    fn rejects_unknown_crew_member() {
        let bundle = BUNDLE.replace(r#"["HERO"]"#, r#"["GHOST"]"#);
        let err = GameDataLoader::parse(&bundle).unwrap_err();
        assert!(err.to_string().contains("GHOST"));
    }

    #[test]
    fn rejects_unknown_relic() {
        let bundle = BUNDLE.replace(r#""3": "r1""#, r#""3": "r9""#);
        let err = GameDataLoader::parse(&bundle).unwrap_err();
        assert!(err.to_string().contains("r9"));
    }

    #[test]
    fn missing_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        let err = GameDataLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}

use std::path::Path;

use statcalc_content::ContentFactory;
use statcalc_core::CombatType;

fn factory() -> ContentFactory {
    ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data"))
}

#[test]
fn sample_bundle_loads_and_validates() {
    let data = factory().load_game_data().unwrap();
    assert_eq!(data.unit("SHIP").unwrap().combat_type, CombatType::Ship);
    assert_eq!(data.unit("SHIP").unwrap().crew, vec!["HERO", "PILOT"]);
    assert!(data.unit("DRONE").unwrap().crew.is_empty());
    assert!(data.cr_tables.mastery_table("hero_mastery").is_ok());
    assert_eq!(data.gp_tables.gear_piece.len(), 2);
}

#[test]
fn sample_options_and_language_load() {
    let factory = factory();
    let options = factory.load_options().unwrap();
    assert!(options.calc_gp);
    assert!(!options.game_style);

    let names = factory.load_language("eng_us").unwrap();
    assert_eq!(names.get(5).map(String::as_str), Some("Speed"));
}

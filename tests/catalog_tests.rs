use rstest::rstest;
use schedforge::catalog::{Catalog, Facilitator, Room};
use schedforge::config::FitnessWeights;
use schedforge::error::SchedForgeError;
use schedforge::fitness::Evaluator;
use std::io::Write;
use std::sync::Arc;

#[test]
fn test_sla_catalog_shape() {
    let catalog = Catalog::sla();
    assert_eq!(catalog.activities.len(), 11);
    assert_eq!(catalog.rooms.len(), 9);
    assert_eq!(catalog.time_slots.len(), 6);
    assert_eq!(catalog.facilitators.len(), 10);
    assert_eq!(catalog.section_pairs.len(), 2);
    assert_eq!(catalog.cross_pairs.len(), 4);
    assert!(catalog.validate().is_ok());
}

#[test]
fn test_sla_tyler_has_relaxed_underload_floor() {
    let catalog = Catalog::sla();
    let tyler = catalog
        .facilitators
        .iter()
        .find(|f| f.name == "Tyler")
        .unwrap();
    assert_eq!(tyler.underload_floor, 2);

    // Everyone else keeps the standard thresholds.
    for fac in catalog.facilitators.iter().filter(|f| f.name != "Tyler") {
        assert_eq!(fac.underload_floor, 1);
        assert_eq!(fac.min_load, 3);
        assert_eq!(fac.max_load, 4);
    }
}

#[rstest]
#[case("Roman 216", "Roman")]
#[case("Beach 301", "Beach")]
#[case("Loft", "Loft")]
fn test_building_is_first_token(#[case] name: &str, #[case] building: &str) {
    let room = Room {
        name: name.to_string(),
        capacity: 30,
        has_lab: false,
        has_projector: false,
    };
    assert_eq!(room.building(), building);
}

#[test]
fn test_index_lookups() {
    let catalog = Catalog::sla();
    assert_eq!(catalog.activity_index("SLA101A"), Some(0));
    assert_eq!(catalog.activity_index("SLA999"), None);
    assert_eq!(catalog.room_index("Slater 003"), Some(8));
    assert_eq!(catalog.time_index("3 PM"), Some(5));
    assert_eq!(catalog.facilitator_index("Zeldin"), Some(9));
    assert_eq!(catalog.facilitator_index("Nobody"), None);
}

#[test]
fn test_load_from_file_round() {
    let catalog = Catalog::sla();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(&catalog).unwrap()).unwrap();

    let loaded = Catalog::load_from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(loaded.activities.len(), catalog.activities.len());
    assert_eq!(loaded.time_slots, catalog.time_slots);
}

#[test]
fn test_load_rejects_empty_domains() {
    let mut catalog = Catalog::sla();
    catalog.rooms.clear();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(&catalog).unwrap()).unwrap();

    let err = Catalog::load_from_file(file.path().to_str().unwrap()).unwrap_err();
    match err {
        SchedForgeError::Validation(msg) => assert!(msg.contains("no rooms"), "got: {msg}"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[rstest]
#[case::no_activities(|c: &mut Catalog| c.activities.clear())]
#[case::no_time_slots(|c: &mut Catalog| c.time_slots.clear())]
#[case::no_facilitators(|c: &mut Catalog| c.facilitators.clear())]
#[case::duplicate_activity(|c: &mut Catalog| {
    let dup = c.activities[0].clone();
    c.activities.push(dup);
})]
fn test_validate_rejects_degenerate_catalogs(#[case] mangle: fn(&mut Catalog)) {
    let mut catalog = Catalog::sla();
    mangle(&mut catalog);
    let err = catalog.validate().unwrap_err();
    assert!(matches!(err, SchedForgeError::Validation(_)), "got {err:?}");
}

#[test]
fn test_evaluator_rejects_unknown_pair_member() {
    let mut catalog = Catalog::sla();
    catalog
        .section_pairs
        .push(["SLA101A".to_string(), "SLA777".to_string()]);

    let err = Evaluator::new(Arc::new(catalog), FitnessWeights::default()).unwrap_err();
    match err {
        SchedForgeError::Validation(msg) => assert!(msg.contains("SLA777"), "got: {msg}"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn test_evaluator_rejects_unknown_preference_name() {
    let mut catalog = Catalog::sla();
    catalog.activities[0].preferred.push("Ghost".to_string());

    let err = Evaluator::new(Arc::new(catalog), FitnessWeights::default()).unwrap_err();
    assert!(matches!(err, SchedForgeError::Validation(_)), "got {err:?}");
}

#[test]
fn test_evaluator_is_debuggable() {
    // unwrap_err on SfResult<Evaluator> needs Debug on the Ok side too.
    let ev = Evaluator::new(Arc::new(Catalog::sla()), FitnessWeights::default()).unwrap();
    assert!(format!("{ev:?}").contains("Evaluator"));
}

#[test]
fn test_facilitator_defaults_from_json() {
    let fac: Facilitator = serde_json::from_str(r#"{"name": "Shaw"}"#).unwrap();
    assert_eq!(fac.underload_floor, 1);
    assert_eq!(fac.min_load, 3);
    assert_eq!(fac.max_load, 4);
    assert!(fac.time_prefs.is_empty());
}

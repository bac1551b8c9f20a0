use hospops_core::{
    config::{AirlineConfig, REQUIRED_MEALS},
    Archetype, ForecastConfig, ForecastError,
};
use std::{collections::BTreeMap, path::PathBuf};

fn shipped_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/base_config.json")
}

fn assert_invalid(config: &ForecastConfig, needle: &str) {
    match config.validate() {
        Err(ForecastError::InvalidConfig(msg)) => {
            assert!(msg.contains(needle), "expected '{needle}' in '{msg}'")
        }
        other => panic!("expected InvalidConfig mentioning {needle}, got {other:?}"),
    }
}

#[test]
fn shipped_file_loads_and_matches_defaults() {
    let loaded = ForecastConfig::load(shipped_config_path()).expect("base config loads");
    let defaults = ForecastConfig::default();

    assert_eq!(
        loaded.housekeeping.minutes_per_checkout,
        defaults.housekeeping.minutes_per_checkout
    );
    for a in Archetype::ALL {
        let (x, y) = (
            loaded.housekeeping.archetype_multipliers.get(a),
            defaults.housekeeping.archetype_multipliers.get(a),
        );
        assert!((x - y).abs() < 1e-12, "{a}: {x} vs {y}");
    }
    for meal in REQUIRED_MEALS {
        let (l, d) = (loaded.meal(meal).expect("meal"), defaults.meal(meal).expect("meal"));
        assert_eq!(l.base.keys().collect::<Vec<_>>(), d.base.keys().collect::<Vec<_>>());
    }
    for area in AirlineConfig::AREAS {
        let (l, d) = (
            loaded.airline.area(area).expect("area"),
            defaults.airline.area(area).expect("area"),
        );
        assert_eq!(l.distributions.len(), d.distributions.len());
        assert_eq!(l.search_ceiling, 500);
    }
    assert_eq!(loaded.service_sla.search_ceiling, 200);
}

#[test]
fn defaults_validate_and_round_trip_through_json() {
    let config = ForecastConfig::default();
    config.validate().expect("defaults are valid");
    let text = config.to_json_pretty().expect("serializable");
    let back = ForecastConfig::from_json_str(&text).expect("round trip");
    assert_eq!(back.fnb_meals.len(), 3);
    assert_eq!(
        back.service_load.reception.distributions.keys().collect::<Vec<_>>(),
        config.service_load.reception.distributions.keys().collect::<Vec<_>>()
    );
}

#[test]
fn optional_fields_fall_back_to_defaults() {
    let mut value = serde_json::to_value(ForecastConfig::default()).expect("serializable");
    let root = value.as_object_mut().expect("object");
    root.remove("service_sla");
    root["housekeeping"]
        .as_object_mut()
        .expect("housekeeping")
        .remove("target_utilization");
    root["airline"]["gate"]
        .as_object_mut()
        .expect("gate")
        .remove("search_ceiling");

    let config = ForecastConfig::from_json_str(&value.to_string()).expect("still valid");
    assert_eq!(config.service_sla.default_target_wait_min, 5.0);
    assert_eq!(config.service_sla.search_ceiling, 200);
    assert_eq!(config.housekeeping.target_utilization, 0.85);
    assert_eq!(config.airline.gate.search_ceiling, 500);
}

#[test]
fn out_of_range_utilization_is_rejected() {
    let mut config = ForecastConfig::default();
    config.service_load.reception.utilization = 1.2;
    assert_invalid(&config, "service_load.reception.utilization");

    let mut config = ForecastConfig::default();
    config.housekeeping.target_utilization = 0.3;
    assert_invalid(&config, "housekeeping.target_utilization");

    let mut config = ForecastConfig::default();
    config.departments.valet.utilization = 0.0;
    assert_invalid(&config, "departments.valet.utilization");
}

#[test]
fn bad_distribution_keys_are_rejected() {
    let mut config = ForecastConfig::default();
    config
        .service_load
        .breakfast
        .distributions
        .insert(Archetype::TourGroup, BTreeMap::from([("7am".to_string(), 1.0)]));
    assert_invalid(&config, "7am");

    let mut config = ForecastConfig::default();
    config
        .service_load
        .reception
        .distributions
        .insert(Archetype::TourGroup, BTreeMap::from([("-01:00".to_string(), 1.0)]));
    assert_invalid(&config, "expected a clock time");

    let mut config = ForecastConfig::default();
    config.airline.lounge.distributions.insert("-ab:00".to_string(), 0.1);
    assert_invalid(&config, "-ab:00");
}

#[test]
fn other_distribution_is_required() {
    let mut config = ForecastConfig::default();
    config.service_load.reception.distributions.remove(&Archetype::Other);
    assert_invalid(&config, "distributions.Other");
}

#[test]
fn missing_meal_is_rejected() {
    let mut config = ForecastConfig::default();
    config.fnb_meals.remove("lunch");
    assert_invalid(&config, "fnb_meals.lunch");
}

#[test]
fn negative_rates_are_rejected() {
    let mut config = ForecastConfig::default();
    config.departments.spa.treatments_per_guest_day.insert(Archetype::Other, -0.1);
    assert_invalid(&config, "treatments_per_guest_day");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ForecastConfig::load("/nonexistent/base_config.json").expect_err("no such file");
    match err {
        ForecastError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected Io, got {other:?}"),
    }
}

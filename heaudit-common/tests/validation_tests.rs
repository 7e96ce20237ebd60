//! Integration tests for whole-record validation
//!
//! Tests cover:
//! - Baseline records validating clean in both addressing modes
//! - Footprint derivation and the minimum-footprint blocker
//! - One area bound set shared by both addressing modes
//! - Roof/floor coverage gating the conditioned-area range
//! - HVAC fraction sum tolerance
//! - Window area strictly below its wall's area
//! - Heating/cooling type compatibility
//! - Duct placement against declared spaces
//! - Mandatory suppression where a rule already reports the omission
//! - Repeat validation producing identical output

mod helpers;

use helpers::{flat_record, nested_record, remove, set, set_pointer, validator};
use heaudit_common::Mode;
use serde_json::json;

#[test]
fn test_baseline_records_are_clean() {
    let flat = validator().validate(&flat_record());
    assert_eq!(flat.mode(), Mode::Flat);
    assert!(flat.blocker.is_empty(), "{:?}", flat.blocker);
    assert!(flat.error.is_empty(), "{:?}", flat.error);
    assert!(flat.mandatory.is_empty(), "{:?}", flat.mandatory);

    let nested = validator().validate(&nested_record());
    assert_eq!(nested.mode(), Mode::Nested);
    assert!(nested.blocker.is_empty(), "{:?}", nested.blocker);
    assert!(nested.error.is_empty(), "{:?}", nested.error);
    assert!(nested.mandatory.is_empty(), "{:?}", nested.mandatory);
}

#[test]
fn test_area_bounds_same_in_both_modes() {
    let mut flat = flat_record();
    set(&mut flat, "floor_area_1", json!(25000));
    let flat = validator().validate(&flat);

    let mut nested = nested_record();
    set_pointer(&mut nested, "/zone/zone_floor/0/floor_area", json!(25000));
    let nested = validator().validate(&nested);

    let flat_message = flat.blocker.message("floor_area_1").unwrap();
    assert!(flat_message.contains("exclusive"), "{}", flat_message);
    assert_eq!(
        nested.blocker.get("/zone/zone_floor/0/floor_area").unwrap(),
        &[flat_message.to_string()]
    );
}

#[test]
fn test_footprint_subtracts_conditioned_basement() {
    // (1000 - 500) / 2 = 250 is the smallest accepted footprint
    let mut record = flat_record();
    set(&mut record, "conditioned_floor_area", json!(1000));
    set(&mut record, "num_floor_above_grade", json!(2));
    set(&mut record, "foundation_type_1", json!("cond_basement"));
    set(&mut record, "floor_area_1", json!(500));
    set(&mut record, "roof_area_1", json!(500));
    let result = validator().validate(&record);
    assert!(!result.blocker.contains("conditioned_floor_area"), "{:?}", result.blocker);

    // (1000 - 510) / 2 = 245
    set(&mut record, "floor_area_1", json!(510));
    let result = validator().validate(&record);
    assert_eq!(
        result.blocker.message("conditioned_floor_area"),
        Some("Conditioned floor area per story above grade is 245; footprint must be greater than 250")
    );
}

#[test]
fn test_coverage_failure_suppresses_area_range() {
    let mut record = flat_record();
    set(&mut record, "roof_area_1", json!(100));
    set(&mut record, "floor_area_1", json!(200));
    let result = validator().validate(&record);
    for path in ["roof_area_1", "floor_area_1"] {
        let message = result.error.message(path).unwrap_or_default();
        assert!(message.contains("roof does not cover the floor"), "{}: {}", path, message);
    }

    // Nested buckets keep every message, so a second one would show here
    let mut record = nested_record();
    set_pointer(&mut record, "/zone/zone_roof/0/roof_area", json!(100));
    set_pointer(&mut record, "/zone/zone_floor/0/floor_area", json!(200));
    let result = validator().validate(&record);
    let messages = result.error.get("/zone/zone_roof/0/roof_area").unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("roof does not cover the floor"));
}

#[test]
fn test_covered_areas_still_range_checked() {
    // Covered, but 4000 exceeds 2.5 x 1500
    let mut record = flat_record();
    set(&mut record, "roof_area_1", json!(4000));
    let result = validator().validate(&record);
    assert!(result.error.contains("roof_area_1"));
    assert!(!result.error.message("roof_area_1").unwrap().contains("cover"));
}

#[test]
fn test_hvac_fraction_tolerance() {
    let mut record = flat_record();
    set(&mut record, "hvac_fraction_1", json!(0.6));
    set(&mut record, "hvac_fraction_2", json!(0.4));
    let result = validator().validate(&record);
    assert!(!result.blocker.contains("hvac_fraction_1"));
    assert!(!result.blocker.contains("hvac_fraction_2"));

    set(&mut record, "hvac_fraction_2", json!(0.5));
    let result = validator().validate(&record);
    assert!(result.blocker.contains("hvac_fraction_1"));
    assert!(result.blocker.contains("hvac_fraction_2"));
}

#[test]
fn test_window_area_below_wall_area() {
    // Two stories of 1050: side walls are 25 ft x 10 ft x 2 = 500 sq.ft.
    let mut record = flat_record();
    set(&mut record, "conditioned_floor_area", json!(2100));
    set(&mut record, "num_floor_above_grade", json!(2));
    set(&mut record, "floor_to_ceiling_height", json!(10));
    set(&mut record, "roof_area_1", json!(1050));
    set(&mut record, "floor_area_1", json!(1050));
    set(&mut record, "window_method_left", json!("code"));
    set(&mut record, "window_code_left", json!("dcaa"));

    for area in [json!(0), json!(499.999)] {
        set(&mut record, "window_area_left", area.clone());
        let result = validator().validate(&record);
        assert!(!result.error.contains("window_area_left"), "{}: {:?}", area, result.error);
        assert!(!result.blocker.contains("window_area_left"));
    }

    set(&mut record, "window_area_left", json!(500));
    let result = validator().validate(&record);
    assert!(result.error.contains("window_area_left"));
}

#[test]
fn test_heating_cooling_compatibility() {
    let mut record = flat_record();
    set(&mut record, "heating_type_1", json!("heat_pump"));
    set(&mut record, "heating_fuel_1", json!("electric"));
    set(&mut record, "heating_efficiency_1", json!(8.5));
    let result = validator().validate(&record);
    assert_eq!(
        result.error.message("heating_type_1"),
        Some("heat_pump is not an appropriate heating type with cooling type split_dx")
    );

    let mut record = flat_record();
    set(&mut record, "cooling_type_1", json!("dec"));
    remove(&mut record, "cooling_efficiency_method_1");
    remove(&mut record, "cooling_efficiency_1");
    let result = validator().validate(&record);
    assert!(!result.error.contains("heating_type_1"), "{:?}", result.error);
}

#[test]
fn test_duct_location_requires_declared_space() {
    let mut record = flat_record();
    set(&mut record, "duct_location_1_1", json!("vented_crawl"));
    let result = validator().validate(&record);
    assert_eq!(
        result.error.message("duct_location_1_1"),
        Some("Ducts may only be set with values in existing roof or foundation spaces")
    );

    set(&mut record, "foundation_type_1", json!("vented_crawl"));
    set(&mut record, "floor_assembly_code_1", json!("efwf19ca"));
    let result = validator().validate(&record);
    assert!(!result.error.contains("duct_location_1_1"), "{:?}", result.error);
}

#[test]
fn test_heating_fuel_not_required_without_heating() {
    let mut record = flat_record();
    set(&mut record, "heating_type_1", json!("none"));
    remove(&mut record, "heating_fuel_1");
    remove(&mut record, "heating_efficiency_method_1");
    remove(&mut record, "heating_efficiency_1");
    let result = validator().validate(&record);
    assert!(!result.mandatory.contains("heating_fuel_1"), "{:?}", result.mandatory);

    set(&mut record, "heating_type_1", json!("boiler"));
    let result = validator().validate(&record);
    assert_eq!(result.mandatory.message("heating_fuel_1"), Some("heating_fuel_1 is required"));
}

#[test]
fn test_nested_mandatory_message() {
    let mut record = nested_record();
    if let Some(about) = record.pointer_mut("/about").and_then(|a| a.as_object_mut()) {
        about.remove("zip_code");
    }
    let result = validator().validate(&record);
    assert_eq!(
        result.mandatory.get("/about/zip_code"),
        Some(&["'zip_code' is a required property".to_string()][..])
    );
}

#[test]
fn test_nested_duct_fractions_report_per_duct() {
    let mut record = nested_record();
    set_pointer(
        &mut record,
        "/systems/hvac/0/hvac_distribution/duct",
        json!([
            {"location": "cond_space", "fraction": 50, "insulated": true, "sealed": true},
            {"location": "cond_space", "fraction": 30, "insulated": true, "sealed": true},
            {"location": "cond_space", "fraction": 10, "insulated": true, "sealed": true}
        ]),
    );
    let result = validator().validate(&record);
    for d in 0..3 {
        let path = format!("/systems/hvac/0/hvac_distribution/duct/{}/fraction", d);
        assert!(result.blocker.contains(&path), "{}", path);
    }
}

#[test]
fn test_structural_violation_blocks_field() {
    let mut record = nested_record();
    set_pointer(&mut record, "/about/conditioned_floor_area", json!("1500"));
    let result = validator().validate(&record);
    assert!(result.blocker.contains("/about/conditioned_floor_area"));
    assert!(!result.mandatory.contains("/about/conditioned_floor_area"));
}

#[test]
fn test_repeat_validation_is_identical() {
    let mut record = flat_record();
    set(&mut record, "roof_area_1", json!(100));
    set(&mut record, "duct_location_1_1", json!("uncond_attic"));
    remove(&mut record, "zip_code");
    let v = validator();
    let first = serde_json::to_string(&v.validate(&record)).unwrap();
    let second = serde_json::to_string(&v.validate(&record)).unwrap();
    assert_eq!(first, second);

    let nested = nested_record();
    let first = serde_json::to_string(&v.validate(&nested)).unwrap();
    let second = serde_json::to_string(&v.validate(&nested)).unwrap();
    assert_eq!(first, second);
}

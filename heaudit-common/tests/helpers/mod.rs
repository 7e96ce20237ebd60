//! Shared builders for integration tests
//!
//! Both builders describe the same single-story 1500 sq.ft. house, and both
//! validate without any violation under [`validator`].

#![allow(dead_code)]

use chrono::NaiveDate;
use heaudit_common::{Validator, ValidatorConfig};
use serde_json::{json, Value};

/// Validator pinned to 2026-10-19
pub fn validator() -> Validator {
    Validator::new(ValidatorConfig {
        current_year: Some(2026),
        today: NaiveDate::from_ymd_opt(2026, 10, 19),
        ..Default::default()
    })
}

pub fn flat_record() -> Value {
    json!({
        "assessment_date": "2024-05-01",
        "zip_code": "94720",
        "year_built": 1995,
        "number_bedrooms": 3,
        "num_floor_above_grade": 1,
        "floor_to_ceiling_height": 8,
        "conditioned_floor_area": 1500,
        "orientation": "north",
        "shape": "rectangle",
        "blower_door_test": false,
        "air_sealing_present": false,

        "roof_type_1": "cath_ceiling",
        "roof_area_1": 1500,
        "roof_assembly_code_1": "rfwf19co",
        "roof_color_1": "medium",

        "floor_area_1": 1500,
        "foundation_type_1": "slab_on_grade",
        "foundation_insulation_level_1": 0,

        "wall_assembly_code_front": "ewwf13vi",
        "wall_assembly_code_back": "ewwf13vi",
        "wall_assembly_code_right": "ewwf13vi",
        "wall_assembly_code_left": "ewwf13vi",

        "hvac_fraction_1": 1,
        "heating_type_1": "central_furnace",
        "heating_fuel_1": "natural_gas",
        "heating_efficiency_method_1": "user",
        "heating_efficiency_1": 0.95,
        "cooling_type_1": "split_dx",
        "cooling_efficiency_method_1": "user",
        "cooling_efficiency_1": 13,
        "duct_location_1_1": "cond_space",
        "duct_fraction_1_1": 100,
        "duct_insulated_1_1": true,
        "duct_sealed_1_1": false,

        "hot_water_category": "unit",
        "hot_water_type": "storage",
        "hot_water_fuel": "natural_gas",
        "hot_water_efficiency_method": "user",
        "hot_water_energy_factor": 0.6
    })
}

pub fn nested_record() -> Value {
    let wall = |side: &str| json!({"side": side, "wall_assembly_code": "ewwf13vi"});
    json!({
        "about": {
            "assessment_date": "2024-05-01",
            "zip_code": "94720",
            "year_built": 1995,
            "number_bedrooms": 3,
            "num_floor_above_grade": 1,
            "floor_to_ceiling_height": 8,
            "conditioned_floor_area": 1500,
            "orientation": "north",
            "shape": "rectangle",
            "blower_door_test": false,
            "air_sealing_present": false
        },
        "zone": {
            "zone_roof": [{
                "roof_type": "cath_ceiling",
                "roof_area": 1500,
                "roof_assembly_code": "rfwf19co",
                "roof_color": "medium"
            }],
            "zone_floor": [{
                "floor_area": 1500,
                "foundation_type": "slab_on_grade",
                "foundation_insulation_level": 0
            }],
            "zone_wall": [wall("front"), wall("back"), wall("right"), wall("left")]
        },
        "systems": {
            "hvac": [{
                "hvac_fraction": 1,
                "heating": {
                    "fuel_primary": "natural_gas",
                    "type": "central_furnace",
                    "efficiency_method": "user",
                    "efficiency": 0.95
                },
                "cooling": {
                    "type": "split_dx",
                    "efficiency_method": "user",
                    "efficiency": 13
                },
                "hvac_distribution": {
                    "duct": [{"location": "cond_space", "fraction": 100, "insulated": true, "sealed": false}]
                }
            }],
            "domestic_hot_water": {
                "category": "unit",
                "type": "storage",
                "fuel_primary": "natural_gas",
                "efficiency_method": "user",
                "energy_factor": 0.6
            }
        }
    })
}

/// Set a top-level key of a flat record
pub fn set(record: &mut Value, key: &str, value: Value) {
    record[key] = value;
}

/// Remove a top-level key of a flat record
pub fn remove(record: &mut Value, key: &str) {
    if let Some(map) = record.as_object_mut() {
        map.remove(key);
    }
}

/// Set a leaf of a nested record by pointer; the parent must already exist
pub fn set_pointer(record: &mut Value, pointer: &str, value: Value) {
    let (parent, leaf) = pointer.rsplit_once('/').expect("pointer has a parent");
    let parent = record.pointer_mut(parent).expect("parent exists");
    parent[leaf] = value;
}

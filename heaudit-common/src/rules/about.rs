//! Building-level rules

use chrono::NaiveDate;

use super::registry::Registry;
use super::{not_applicable, RuleContext};
use crate::checks::{check_bool, check_date, check_enum, check_float, check_int, check_zip, Interval};
use crate::derive;
use crate::field::FieldKind as K;
use crate::record::FieldValue;
use crate::result::ValidationResult;
use crate::tables::{MIN_ASSESSMENT_DATE, MIN_FOOTPRINT, MIN_YEAR_BUILT, ORIENTATIONS, SHAPES, TOWN_HOUSE_WALLS};

pub fn register(r: &mut Registry) {
    r.add(K::AssessmentDate, "date", |ctx, _, v| assessment_date(ctx, v));
    r.add(K::ZipCode, "zip", |_, _, v| ValidationResult::blocker_if(check_zip(v)));
    r.add(K::YearBuilt, "range", |ctx, _, v| {
        ValidationResult::blocker_if(check_int(v, MIN_YEAR_BUILT, ctx.clock.current_year))
    });
    r.add(K::NumberBedrooms, "range", |_, _, v| ValidationResult::blocker_if(check_int(v, 1, 10)));
    r.add(K::NumFloorAboveGrade, "range", |_, _, v| ValidationResult::blocker_if(check_int(v, 1, 4)));
    r.add(K::FloorToCeilingHeight, "range", |_, _, v| ValidationResult::blocker_if(check_int(v, 6, 12)));
    r.add(K::ConditionedFloorArea, "range", |_, _, v| {
        ValidationResult::blocker_if(check_float(v, 250.0, 25000.0, Interval::Closed))
    })
    .add(K::ConditionedFloorArea, "footprint_minimum", |ctx, _, _| footprint_minimum(ctx));
    r.add(K::Orientation, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, ORIENTATIONS)));
    r.add(K::Shape, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, SHAPES)));
    r.add(K::TownHouseWalls, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, TOWN_HOUSE_WALLS)))
        .add(K::TownHouseWalls, "town_house_only", |ctx, _, _| {
            match ctx.building(K::Shape).text() {
                Some(shape) if shape != "town_house" => {
                    not_applicable("town_house_walls", format!("shape is {}", shape))
                }
                _ => ValidationResult::pass(),
            }
        });
    r.add(K::BlowerDoorTest, "bool", |_, _, v| ValidationResult::blocker_if(check_bool(v)));
    r.add(K::AirSealingPresent, "bool", |_, _, v| ValidationResult::blocker_if(check_bool(v)))
        .add(K::AirSealingPresent, "blower_door_untested", |ctx, _, _| {
            match ctx.building(K::BlowerDoorTest).flag() {
                Some(true) => not_applicable("air_sealing_present", "blower_door_test is true"),
                _ => ValidationResult::pass(),
            }
        });
    r.add(K::EnvelopeLeakage, "range", |_, _, v| {
        ValidationResult::blocker_if(check_float(v, 0.0, 25000.0, Interval::Closed))
    })
    .add(K::EnvelopeLeakage, "blower_door_tested", |ctx, _, _| {
        match ctx.building(K::BlowerDoorTest).flag() {
            Some(false) => not_applicable("envelope_leakage", "blower_door_test is false"),
            _ => ValidationResult::pass(),
        }
    });
}

fn assessment_date(ctx: &RuleContext<'_>, value: &FieldValue) -> ValidationResult {
    let min = NaiveDate::parse_from_str(MIN_ASSESSMENT_DATE, "%Y-%m-%d").unwrap_or(NaiveDate::MIN);
    ValidationResult::blocker_if(check_date(value, min, ctx.clock.today))
}

/// Footprint below the absolute minimum is a blocker on the conditioned area
fn footprint_minimum(ctx: &RuleContext<'_>) -> ValidationResult {
    match derive::footprint_area(ctx.record) {
        Some(footprint) if footprint < MIN_FOOTPRINT => ValidationResult::blocker(format!(
            "Conditioned floor area per story above grade is {}; footprint must be greater than {}",
            footprint, MIN_FOOTPRINT
        )),
        _ => ValidationResult::pass(),
    }
}

//! Solar electric generation rules

use super::registry::Registry;
use super::{installation_year, not_applicable};
use crate::checks::{check_bool, check_enum, check_float, check_int, Interval};
use crate::field::FieldKind as K;
use crate::result::ValidationResult;
use crate::tables::{ARRAY_TILTS, MIN_SOLAR_YEAR, ORIENTATIONS};

pub fn register(r: &mut Registry) {
    r.add(K::SolarCapacityKnown, "bool", |_, _, v| ValidationResult::blocker_if(check_bool(v)));
    r.add(K::SolarSystemCapacity, "range", |_, _, v| {
        ValidationResult::blocker_if(check_float(v, 0.05, 100.0, Interval::Closed))
    })
    .add(K::SolarSystemCapacity, "capacity_known", |ctx, _, _| {
        match ctx.building(K::SolarCapacityKnown).flag() {
            Some(false) => not_applicable("system_capacity", "capacity_known is false"),
            _ => ValidationResult::pass(),
        }
    });
    r.add(K::SolarNumPanels, "range", |_, _, v| ValidationResult::blocker_if(check_int(v, 1, 100)))
        .add(K::SolarNumPanels, "capacity_unknown", |ctx, _, _| {
            match ctx.building(K::SolarCapacityKnown).flag() {
                Some(true) => not_applicable("num_panels", "capacity_known is true"),
                _ => ValidationResult::pass(),
            }
        });
    r.add(K::SolarYear, "installation_year", |ctx, _, v| installation_year(ctx, v, MIN_SOLAR_YEAR));
    r.add(K::SolarArrayAzimuth, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, ORIENTATIONS)));
    r.add(K::SolarArrayTilt, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, ARRAY_TILTS)));
}

//! Domestic hot water rules

use super::registry::Registry;
use super::{installation_year, not_applicable, RuleContext};
use crate::checks::{check_enum, check_float, check_number, Interval};
use crate::field::{FieldId, FieldKind as K};
use crate::record::FieldValue;
use crate::result::ValidationResult;
use crate::tables::{
    energy_factor_range, BOILER_FED_HOT_WATER_TYPES, EFFICIENCY_METHODS, HOT_WATER_CATEGORIES, HOT_WATER_FUELS,
    HOT_WATER_TYPES, HOT_WATER_USER_ONLY_TYPES, MIN_HOT_WATER_YEAR,
};

pub fn register(r: &mut Registry) {
    r.add(K::HotWaterCategory, "enum", |_, _, v| {
        ValidationResult::blocker_if(check_enum(v, HOT_WATER_CATEGORIES))
    })
    .add(K::HotWaterCategory, "boiler_present", |ctx, _, v| {
        let boiler = ctx.record.hvac.iter().any(|h| h.heating.kind.is("boiler"));
        if v.is("combined") && !boiler {
            ValidationResult::error("Combined hot water requires a boiler heating system")
        } else {
            ValidationResult::pass()
        }
    });
    r.add(K::HotWaterType, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, HOT_WATER_TYPES)))
        .add(K::HotWaterType, "category_pairing", category_pairing)
        .add(K::HotWaterType, "fuel_supplied", |ctx, _, v| {
            let fuel_burning = v.text().is_some_and(|t| !BOILER_FED_HOT_WATER_TYPES.contains(&t));
            if fuel_burning && ctx.building(K::HotWaterFuel).is_blank() {
                ValidationResult::error(format!("Hot water fuel is required for type {}", v.display()))
            } else {
                ValidationResult::pass()
            }
        });
    r.add(K::HotWaterFuel, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, HOT_WATER_FUELS)))
        .add(K::HotWaterFuel, "fuel_for_type", fuel_for_type);
    r.add(K::HotWaterEfficiencyMethod, "enum", |_, _, v| {
        ValidationResult::blocker_if(check_enum(v, EFFICIENCY_METHODS))
    })
    .add(K::HotWaterEfficiencyMethod, "method_gating", |ctx, _, v| {
        match ctx.building(K::HotWaterType).text() {
            Some(t) if HOT_WATER_USER_ONLY_TYPES.contains(&t) && v.is("shipment_weighted") => {
                ValidationResult::error(format!(
                    "shipment_weighted is not a valid efficiency method for hot water type {}; use user",
                    t
                ))
            }
            _ => ValidationResult::pass(),
        }
    });
    r.add(K::HotWaterYear, "installation_year", |ctx, _, v| installation_year(ctx, v, MIN_HOT_WATER_YEAR));
    r.add(K::HotWaterEnergyFactor, "number", |_, _, v| ValidationResult::blocker_if(check_number(v)))
        .add(K::HotWaterEnergyFactor, "range_for_type", |ctx, _, v| {
            match ctx.building(K::HotWaterType).text().and_then(energy_factor_range) {
                Some(range) => ValidationResult::blocker_if(check_float(v, range.min, range.max, Interval::Closed)),
                None => ValidationResult::pass(),
            }
        })
        .add(K::HotWaterEnergyFactor, "rated_type", |ctx, _, _| {
            match ctx.building(K::HotWaterType).text() {
                Some(t) if BOILER_FED_HOT_WATER_TYPES.contains(&t) => {
                    not_applicable("energy_factor", format!("hot water type is {}", t))
                }
                _ => ValidationResult::pass(),
            }
        })
        .add(K::HotWaterEnergyFactor, "user_method", |ctx, _, _| {
            match ctx.building(K::HotWaterEfficiencyMethod).text() {
                Some(m) if m != "user" => not_applicable("energy_factor", format!("efficiency_method is {}", m)),
                _ => ValidationResult::pass(),
            }
        });
}

/// Boiler-fed types belong to the combined category, all others to unit
fn category_pairing(ctx: &RuleContext<'_>, _: FieldId, value: &FieldValue) -> ValidationResult {
    let (Some(kind), Some(category)) = (value.text(), ctx.building(K::HotWaterCategory).text()) else {
        return ValidationResult::pass();
    };
    let expected = if BOILER_FED_HOT_WATER_TYPES.contains(&kind) { "combined" } else { "unit" };
    if HOT_WATER_CATEGORIES.contains(&category) && category != expected {
        ValidationResult::error(format!(
            "{} is not a valid hot water type for category {}",
            kind, category
        ))
    } else {
        ValidationResult::pass()
    }
}

fn fuel_for_type(ctx: &RuleContext<'_>, _: FieldId, value: &FieldValue) -> ValidationResult {
    match ctx.building(K::HotWaterType).text() {
        Some(t) if BOILER_FED_HOT_WATER_TYPES.contains(&t) => {
            not_applicable("hot water fuel", format!("hot water type is {}", t))
        }
        Some("heat_pump") if !value.is("electric") => {
            ValidationResult::error("Hot water fuel must be electric for a heat pump water heater")
        }
        _ => ValidationResult::pass(),
    }
}

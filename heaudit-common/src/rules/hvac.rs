//! Heating and cooling rules

use super::registry::Registry;
use super::{installation_year, not_applicable, RuleContext};
use crate::checks::{check_enum, check_float, check_fraction_sum, check_number, Interval};
use crate::field::{FieldId, FieldKind as K};
use crate::record::FieldValue;
use crate::result::ValidationResult;
use crate::tables::{
    cooling_rating, heating_rating, heating_types_for_fuel, RatingRange, COOLING_TYPES,
    COOLING_TYPES_WITHOUT_METHOD, EFFICIENCY_METHODS, HEATING_FUELS, HEATING_TYPES,
    HEATING_TYPES_WITHOUT_METHOD, MIN_COOLING_YEAR, MIN_HEATING_YEAR, USER_METHOD_ONLY_TYPES,
};

pub fn register(r: &mut Registry) {
    r.add(K::HvacFraction, "range", |_, _, v| {
        ValidationResult::blocker_if(check_float(v, 0.0, 1.0, Interval::Closed))
    })
    .add(K::HvacFraction, "fractions_sum", |ctx, _, _| {
        let fractions: Vec<f64> = ctx.record.hvac.iter().filter_map(|h| h.hvac_fraction.number()).collect();
        ValidationResult::blocker_if(check_fraction_sum(&fractions))
    });

    // Heating
    r.add(K::HeatingFuel, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, HEATING_FUELS)))
        .add(K::HeatingFuel, "heating_present", |ctx, id, _| {
            if ctx.sibling(id, K::HeatingType).is("none") {
                not_applicable("heating fuel", "heating type is none")
            } else {
                ValidationResult::pass()
            }
        });
    r.add(K::HeatingType, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, HEATING_TYPES)))
        .add(K::HeatingType, "fuel_compatible", heating_fuel_compatible)
        .add(K::HeatingType, "not_both_none", not_both_none)
        .add(K::HeatingType, "cooling_compatible", |ctx, id, v| {
            heating_cooling_compatible(v, ctx.sibling(id, K::CoolingType))
        });
    r.add(K::HeatingEfficiencyMethod, "enum", |_, _, v| {
        ValidationResult::blocker_if(check_enum(v, EFFICIENCY_METHODS))
    })
    .add(K::HeatingEfficiencyMethod, "method_gating", heating_method);
    r.add(K::HeatingYear, "installation_year", |ctx, _, v| installation_year(ctx, v, MIN_HEATING_YEAR));
    r.add(K::HeatingEfficiency, "number", |_, _, v| ValidationResult::blocker_if(check_number(v)))
        .add(K::HeatingEfficiency, "rating", |ctx, id, v| {
            rated_efficiency(ctx.sibling(id, K::HeatingType), v, heating_rating, "heating")
        })
        .add(K::HeatingEfficiency, "user_method", |ctx, id, _| {
            user_method_only(ctx.sibling(id, K::HeatingEfficiencyMethod))
        });

    // Cooling
    r.add(K::CoolingType, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, COOLING_TYPES)))
        .add(K::CoolingType, "not_both_none", not_both_none);
    r.add(K::CoolingEfficiencyMethod, "enum", |_, _, v| {
        ValidationResult::blocker_if(check_enum(v, EFFICIENCY_METHODS))
    })
    .add(K::CoolingEfficiencyMethod, "method_gating", cooling_method);
    r.add(K::CoolingYear, "installation_year", |ctx, _, v| installation_year(ctx, v, MIN_COOLING_YEAR));
    r.add(K::CoolingEfficiency, "number", |_, _, v| ValidationResult::blocker_if(check_number(v)))
        .add(K::CoolingEfficiency, "rating", |ctx, id, v| {
            rated_efficiency(ctx.sibling(id, K::CoolingType), v, cooling_rating, "cooling")
        })
        .add(K::CoolingEfficiency, "user_method", |ctx, id, _| {
            user_method_only(ctx.sibling(id, K::CoolingEfficiencyMethod))
        });
}

fn heating_fuel_compatible(ctx: &RuleContext<'_>, id: FieldId, value: &FieldValue) -> ValidationResult {
    let (Some(heating), Some(fuel)) = (value.text(), ctx.sibling(id, K::HeatingFuel).text()) else {
        return ValidationResult::pass();
    };
    match heating_types_for_fuel(fuel) {
        Some(types) if heating != "none" && !types.contains(&heating) => ValidationResult::error(format!(
            "{} is not an appropriate heating type with fuel {}",
            heating, fuel
        )),
        _ => ValidationResult::pass(),
    }
}

fn not_both_none(ctx: &RuleContext<'_>, id: FieldId, _: &FieldValue) -> ValidationResult {
    if ctx.sibling(id, K::HeatingType).is("none") && ctx.sibling(id, K::CoolingType).is("none") {
        ValidationResult::error("Heating and cooling types may not both be none")
    } else {
        ValidationResult::pass()
    }
}

/// Pairings of heating and cooling equipment that cannot coexist in one system
pub fn heating_cooling_compatible(heating: &FieldValue, cooling: &FieldValue) -> ValidationResult {
    let (Some(heating), Some(cooling)) = (heating.text(), cooling.text()) else {
        return ValidationResult::pass();
    };
    let compatible = match cooling {
        "heat_pump" | "gchp" => heating == cooling || heating == "wood_stove" || heating == "none",
        "mini_split" => !matches!(heating, "heat_pump" | "gchp"),
        "split_dx" => !matches!(heating, "heat_pump" | "gchp" | "mini_split"),
        "dec" => heating != "gchp",
        _ => true,
    };
    if compatible {
        ValidationResult::pass()
    } else {
        ValidationResult::error(format!(
            "{} is not an appropriate heating type with cooling type {}",
            heating, cooling
        ))
    }
}

fn heating_method(ctx: &RuleContext<'_>, id: FieldId, value: &FieldValue) -> ValidationResult {
    let Some(heating) = ctx.sibling(id, K::HeatingType).text() else {
        return ValidationResult::pass();
    };
    let fuel = ctx.sibling(id, K::HeatingFuel);
    if HEATING_TYPES_WITHOUT_METHOD.contains(&heating) || (heating == "central_furnace" && fuel.is("electric")) {
        return ValidationResult::error(format!(
            "Efficiency method may not be set for heating type {}",
            heating
        ));
    }
    let user_only = USER_METHOD_ONLY_TYPES.contains(&heating)
        || (heating == "wall_furnace" && fuel.text().is_some_and(|f| f != "natural_gas"));
    if user_only && value.is("shipment_weighted") {
        return ValidationResult::error(format!(
            "shipment_weighted is not a valid efficiency method for heating type {}; use user",
            heating
        ));
    }
    ValidationResult::pass()
}

fn cooling_method(ctx: &RuleContext<'_>, id: FieldId, value: &FieldValue) -> ValidationResult {
    let Some(cooling) = ctx.sibling(id, K::CoolingType).text() else {
        return ValidationResult::pass();
    };
    if COOLING_TYPES_WITHOUT_METHOD.contains(&cooling) {
        return ValidationResult::error(format!(
            "Efficiency method may not be set for cooling type {}",
            cooling
        ));
    }
    if USER_METHOD_ONLY_TYPES.contains(&cooling) && !value.is("user") {
        return ValidationResult::error(format!(
            "{} is not a valid efficiency method for cooling type {}; use user",
            value.display(),
            cooling
        ));
    }
    ValidationResult::pass()
}

/// Efficiency must match the rating metric of the equipment type
fn rated_efficiency(
    equipment: &FieldValue,
    value: &FieldValue,
    rating: fn(&str) -> Option<RatingRange>,
    class: &str,
) -> ValidationResult {
    let Some(equipment) = equipment.text() else {
        return ValidationResult::pass();
    };
    match rating(equipment) {
        Some(range) => ValidationResult::blocker_if(
            check_float(value, range.min, range.max, Interval::Closed)
                .map(|message| format!("{} {}", range.metric, message)),
        ),
        None => ValidationResult::error(format!(
            "Efficiency may not be set for {} type {}",
            class, equipment
        )),
    }
}

fn user_method_only(method: &FieldValue) -> ValidationResult {
    match method.text() {
        Some(m) if m != "user" => not_applicable("efficiency", format!("efficiency_method is {}", m)),
        _ => ValidationResult::pass(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AreaBounds, Clock};
    use crate::field::SystemIndex;
    use crate::record::{HvacSystem, Record};
    use crate::result::Severity;
    use crate::rules::registry::evaluate;
    use chrono::NaiveDate;
    use serde_json::json;

    fn run(record: &Record, id: FieldId) -> Vec<ValidationResult> {
        let clock = Clock { today: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), current_year: 2026 };
        let ctx = RuleContext::new(record, clock, AreaBounds::Legacy);
        evaluate(&ctx, id, record.value(id))
    }

    fn system(heating: &str, cooling: &str) -> HvacSystem {
        let mut system = HvacSystem::default();
        system.heating.kind = json!(heating).into();
        system.cooling.kind = json!(cooling).into();
        system
    }

    #[test]
    fn test_heating_cooling_compatibility() {
        let check = |h: &str, c: &str| heating_cooling_compatible(&json!(h).into(), &json!(c).into());
        assert_eq!(
            check("heat_pump", "split_dx").message.as_deref(),
            Some("heat_pump is not an appropriate heating type with cooling type split_dx")
        );
        assert!(!check("gchp", "mini_split").is_pass());
        assert!(check("central_furnace", "dec").is_pass());
        assert!(check("wood_stove", "heat_pump").is_pass());
        assert!(!check("boiler", "gchp").is_pass());
        assert!(check("heat_pump", "heat_pump").is_pass());
    }

    #[test]
    fn test_fraction_sum_tolerance() {
        let mut record = Record::default();
        record.hvac = vec![HvacSystem::default(), HvacSystem::default()];
        let id = FieldId::hvac(K::HvacFraction, SystemIndex::First);
        for (second, fires) in [(0.4, false), (0.39999999999, false), (0.3, true)] {
            record.hvac[0].hvac_fraction = json!(0.6).into();
            record.hvac[1].hvac_fraction = json!(second).into();
            let fired = run(&record, id);
            assert_eq!(!fired.is_empty(), fires, "second fraction {}", second);
            if fires {
                assert_eq!(fired[0].severity, Severity::Blocker);
            }
        }
    }

    #[test]
    fn test_fuel_type_allow_list() {
        let mut record = Record::default();
        record.hvac.push(system("central_furnace", "none"));
        record.hvac[0].heating.fuel = json!("cord_wood").into();
        let fired = run(&record, FieldId::hvac(K::HeatingType, SystemIndex::First));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].severity, Severity::Error);
    }

    #[test]
    fn test_both_none() {
        let mut record = Record::default();
        record.hvac.push(system("none", "none"));
        assert_eq!(run(&record, FieldId::hvac(K::CoolingType, SystemIndex::First)).len(), 1);
    }

    #[test]
    fn test_efficiency_rating_ranges() {
        let mut record = Record::default();
        record.hvac.push(system("central_furnace", "split_dx"));
        let id = FieldId::hvac(K::HeatingEfficiency, SystemIndex::First);
        record.hvac[0].heating.efficiency = json!(1.2).into();
        let fired = run(&record, id);
        assert_eq!(fired[0].severity, Severity::Blocker);
        assert!(fired[0].message.as_deref().unwrap().starts_with("AFUE"));

        record.hvac[0].heating.efficiency = json!(0.95).into();
        record.hvac[0].heating.efficiency_method = json!("shipment_weighted").into();
        assert_eq!(run(&record, id)[0].severity, Severity::Error);

        record.hvac[0].heating.kind = json!("baseboard").into();
        record.hvac[0].heating.efficiency_method = json!("user").into();
        assert!(run(&record, id)[0].message.as_deref().unwrap().contains("baseboard"));
    }

    #[test]
    fn test_method_gating() {
        let mut record = Record::default();
        record.hvac.push(system("gchp", "dec"));
        record.hvac[0].heating.efficiency_method = json!("shipment_weighted").into();
        record.hvac[0].cooling.efficiency_method = json!("user").into();
        assert_eq!(run(&record, FieldId::hvac(K::HeatingEfficiencyMethod, SystemIndex::First)).len(), 1);
        assert_eq!(run(&record, FieldId::hvac(K::CoolingEfficiencyMethod, SystemIndex::First)).len(), 1);

        record.hvac[0].heating.kind = json!("wall_furnace").into();
        record.hvac[0].heating.fuel = json!("natural_gas").into();
        assert!(run(&record, FieldId::hvac(K::HeatingEfficiencyMethod, SystemIndex::First)).is_empty());
    }

    #[test]
    fn test_wall_furnace_method_by_fuel() {
        let id = FieldId::hvac(K::HeatingEfficiencyMethod, SystemIndex::First);
        let mut record = Record::default();
        record.hvac.push(system("wall_furnace", "none"));
        record.hvac[0].heating.fuel = json!("lpg").into();
        record.hvac[0].heating.efficiency_method = json!("shipment_weighted").into();
        let fired = run(&record, id);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].severity, Severity::Error);
        assert_eq!(
            fired[0].message.as_deref(),
            Some("shipment_weighted is not a valid efficiency method for heating type wall_furnace; use user")
        );

        record.hvac[0].heating.efficiency_method = json!("user").into();
        assert!(run(&record, id).is_empty());

        record.hvac[0].heating.fuel = json!("natural_gas").into();
        record.hvac[0].heating.efficiency_method = json!("shipment_weighted").into();
        assert!(run(&record, id).is_empty());
    }

    #[test]
    fn test_user_only_cooling_method() {
        let id = FieldId::hvac(K::CoolingEfficiencyMethod, SystemIndex::First);
        for (heating, cooling) in [("central_furnace", "mini_split"), ("gchp", "gchp")] {
            let mut record = Record::default();
            record.hvac.push(system(heating, cooling));
            record.hvac[0].cooling.efficiency_method = json!("shipment_weighted").into();
            let fired = run(&record, id);
            assert_eq!(fired.len(), 1, "{}", cooling);
            assert_eq!(
                fired[0].message.as_deref().unwrap(),
                format!("shipment_weighted is not a valid efficiency method for cooling type {}; use user", cooling)
            );

            record.hvac[0].cooling.efficiency_method = json!("user").into();
            assert!(run(&record, id).is_empty(), "{}", cooling);
        }

        let mut record = Record::default();
        record.hvac.push(system("central_furnace", "split_dx"));
        record.hvac[0].cooling.efficiency_method = json!("shipment_weighted").into();
        assert!(run(&record, id).is_empty());
    }
}

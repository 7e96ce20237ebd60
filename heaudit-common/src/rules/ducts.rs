//! Duct distribution rules

use super::registry::Registry;
use super::RuleContext;
use crate::checks::{check_bool, check_enum, check_int, check_percent_sum};
use crate::field::{FieldId, FieldKind as K, Slot};
use crate::record::FieldValue;
use crate::result::ValidationResult;
use crate::tables::{DUCTED_COOLING_TYPES, DUCTED_HEATING_TYPES, DUCT_LOCATIONS, FOUNDATION_DUCT_LOCATIONS};

pub fn register(r: &mut Registry) {
    r.add(K::DuctLocation, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, DUCT_LOCATIONS)))
        .add(K::DuctLocation, "existing_space", duct_placement)
        .add(K::DuctLocation, "ducted_system", ducted_system);
    r.add(K::DuctFraction, "range", |_, _, v| ValidationResult::blocker_if(check_int(v, 0, 100)))
        .add(K::DuctFraction, "percent_sum", percent_sum);
    r.add(K::DuctInsulated, "bool", |_, _, v| ValidationResult::blocker_if(check_bool(v)));
    r.add(K::DuctSealed, "bool", |_, _, v| ValidationResult::blocker_if(check_bool(v)));
}

/// Ducts may only run through spaces the envelope declares
pub fn duct_placement(ctx: &RuleContext<'_>, _: FieldId, value: &FieldValue) -> ValidationResult {
    let Some(location) = value.text() else {
        return ValidationResult::pass();
    };
    let legal = match location {
        "cond_space" => true,
        "uncond_attic" => ctx.record.roofs.iter().any(|r| r.roof_type.is("vented_attic")),
        l if FOUNDATION_DUCT_LOCATIONS.contains(&l) => {
            ctx.record.floors.iter().any(|f| f.foundation_type.is(l))
        }
        _ => true,
    };
    if legal {
        ValidationResult::pass()
    } else {
        ValidationResult::error("Ducts may only be set with values in existing roof or foundation spaces")
    }
}

fn ducted_system(ctx: &RuleContext<'_>, id: FieldId, _: &FieldValue) -> ValidationResult {
    let Slot::Duct(system, _) = id.slot else {
        return ValidationResult::pass();
    };
    let Some(hvac) = ctx.record.system(system) else {
        return ValidationResult::pass();
    };
    let (Some(heating), Some(cooling)) = (hvac.heating.kind.text(), hvac.cooling.kind.text()) else {
        return ValidationResult::pass();
    };
    if DUCTED_HEATING_TYPES.contains(&heating) || DUCTED_COOLING_TYPES.contains(&cooling) {
        ValidationResult::pass()
    } else {
        ValidationResult::error(format!(
            "Ducts may not be defined for heating type {} with cooling type {}",
            heating, cooling
        ))
    }
}

/// Duct fractions of one system must account for all of its distribution
fn percent_sum(ctx: &RuleContext<'_>, id: FieldId, _: &FieldValue) -> ValidationResult {
    let Slot::Duct(system, _) = id.slot else {
        return ValidationResult::pass();
    };
    let fractions: Vec<f64> = ctx
        .record
        .system(system)
        .map(|h| h.ducts.iter().filter_map(|d| d.fraction.number()).collect())
        .unwrap_or_default();
    ValidationResult::blocker_if(check_percent_sum(&fractions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AreaBounds, Clock};
    use crate::field::{DuctIndex, SystemIndex};
    use crate::record::{Duct, FloorZone, HvacSystem, Record, RoofZone};
    use crate::result::Severity;
    use crate::rules::registry::evaluate;
    use chrono::NaiveDate;
    use serde_json::json;

    fn run(record: &Record, id: FieldId) -> Vec<ValidationResult> {
        let clock = Clock { today: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), current_year: 2026 };
        let ctx = RuleContext::new(record, clock, AreaBounds::Legacy);
        evaluate(&ctx, id, record.value(id))
    }

    fn ducted(locations: &[(&str, i64)]) -> Record {
        let mut system = HvacSystem::default();
        system.heating.kind = json!("central_furnace").into();
        system.cooling.kind = json!("split_dx").into();
        system.ducts = locations
            .iter()
            .map(|(location, fraction)| Duct {
                location: json!(location).into(),
                fraction: json!(fraction).into(),
                ..Default::default()
            })
            .collect();
        Record { hvac: vec![system], ..Default::default() }
    }

    #[test]
    fn test_duct_needs_matching_foundation() {
        let mut record = ducted(&[("vented_crawl", 100)]);
        let id = FieldId::duct(K::DuctLocation, SystemIndex::First, DuctIndex::First);
        let fired = run(&record, id);
        assert_eq!(
            fired[0].message.as_deref(),
            Some("Ducts may only be set with values in existing roof or foundation spaces")
        );

        record.floors.push(FloorZone { foundation_type: json!("vented_crawl").into(), ..Default::default() });
        assert!(run(&record, id).is_empty());
    }

    #[test]
    fn test_attic_duct_needs_vented_attic() {
        let mut record = ducted(&[("uncond_attic", 100)]);
        let id = FieldId::duct(K::DuctLocation, SystemIndex::First, DuctIndex::First);
        assert_eq!(run(&record, id).len(), 1);
        record.roofs.push(RoofZone { roof_type: json!("vented_attic").into(), ..Default::default() });
        assert!(run(&record, id).is_empty());
    }

    #[test]
    fn test_percent_sum_blocks_each_contributor() {
        let record = ducted(&[("cond_space", 50), ("cond_space", 30)]);
        for duct in [DuctIndex::First, DuctIndex::Second] {
            let fired = run(&record, FieldId::duct(K::DuctFraction, SystemIndex::First, duct));
            assert_eq!(fired[0].severity, Severity::Blocker);
            assert!(fired[0].message.as_deref().unwrap().contains("currently 80"));
        }
        let record = ducted(&[("cond_space", 50), ("cond_space", 50)]);
        assert!(run(&record, FieldId::duct(K::DuctFraction, SystemIndex::First, DuctIndex::Second)).is_empty());
    }

    #[test]
    fn test_non_ducted_system() {
        let mut record = ducted(&[("cond_space", 100)]);
        record.hvac[0].heating.kind = json!("baseboard").into();
        record.hvac[0].cooling.kind = json!("none").into();
        let fired = run(&record, FieldId::duct(K::DuctLocation, SystemIndex::First, DuctIndex::First));
        assert_eq!(fired.len(), 1);
        assert!(fired[0].message.as_deref().unwrap().contains("baseboard"));
    }
}

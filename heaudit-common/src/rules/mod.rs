//! Cross-field rules
//!
//! Every field kind owns an ordered list of [`Rule`]s, registered once per
//! process by the domain modules below. Rules are plain functions of the
//! [`RuleContext`]; they read the whole record and never mutate it.

pub mod about;
pub mod ducts;
pub mod envelope;
pub mod hot_water;
pub mod hvac;
pub mod registry;
pub mod solar;

use crate::checks::{check_string, fmt_number};
use crate::config::{AreaBounds, Clock};
use crate::field::{FieldId, FieldKind};
use crate::record::{FieldValue, Record};
use crate::result::ValidationResult;
use crate::tables::AssemblyCodeFamily;

pub use registry::{rules_for, OnFire, Rule};

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub record: &'a Record,
    pub clock: Clock,
    pub area_bounds: AreaBounds,
}

impl<'a> RuleContext<'a> {
    pub fn new(record: &'a Record, clock: Clock, area_bounds: AreaBounds) -> Self {
        Self { record, clock, area_bounds }
    }

    /// Value of another field in the same slot as `id`
    pub fn sibling(&self, id: FieldId, kind: FieldKind) -> &'a FieldValue {
        self.record.value(FieldId::new(kind, id.slot))
    }

    pub fn building(&self, kind: FieldKind) -> &'a FieldValue {
        self.record.value(FieldId::building(kind))
    }
}

/// Blocker unless the value is a member of an assembly-code family
pub(crate) fn assembly_code(value: &FieldValue, family: &AssemblyCodeFamily) -> ValidationResult {
    if let Some(message) = check_string(value, family.code_len()) {
        return ValidationResult::blocker(message);
    }
    match value.text() {
        Some(code) if family.accepts(code) => ValidationResult::pass(),
        _ => ValidationResult::blocker(format!(
            "{} is not a valid {} assembly code",
            value.display(),
            family.name
        )),
    }
}

/// Installation year of a piece of equipment
///
/// Outside `[min_year, current_year]` is a blocker. A year that satisfies the
/// hard floor but predates the building is an error, reported against the
/// year built as the effective lower bound.
pub(crate) fn installation_year(ctx: &RuleContext<'_>, value: &FieldValue, min_year: i64) -> ValidationResult {
    let Some(year) = value.integer() else {
        return ValidationResult::blocker(format!("{} is not an integer", value.display()));
    };
    let current = ctx.clock.current_year;
    if year < min_year || year > current {
        return ValidationResult::blocker(format!(
            "{} is outside the allowed range ({} - {})",
            year, min_year, current
        ));
    }
    match ctx.building(FieldKind::YearBuilt).integer() {
        Some(built) if year < built => ValidationResult::error(format!(
            "{} is outside the allowed range ({} - {})",
            year, built, current
        )),
        _ => ValidationResult::pass(),
    }
}

/// Error when a field is set although a governing field rules it out
pub(crate) fn not_applicable(name: &str, condition: impl std::fmt::Display) -> ValidationResult {
    ValidationResult::error(format!("{} may not be set when {}", name, condition))
}

/// Message body for a value outside a derived range
pub(crate) fn outside(value: f64, min: f64, max: f64) -> String {
    format!(
        "{} is outside the allowed range ({} - {})",
        fmt_number(value),
        fmt_number(min),
        fmt_number(max)
    )
}

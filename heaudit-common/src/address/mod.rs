//! Address translation front ends
//!
//! Two input shapes map onto the same [`Record`]:
//! - [`flat`]: one object of suffixed keys (`roof_area_1`, `window_area_front`,
//!   `duct_fraction_2_1`)
//! - [`nested`]: an `about` / `zone` / `systems` tree with arrays, addressed by
//!   JSON-pointer style paths (`/zone/zone_roof/1/roof_area`)
//!
//! The front ends only build records and paths; every rule is evaluated
//! against the record, so rule semantics are identical in both modes.

pub mod flat;
pub mod nested;
pub mod schema;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::{FieldId, Group, Slot, WallSide};
use crate::record::Record;
use crate::result::Violation;

/// Addressing mode of a submitted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Flat,
    Nested,
}

/// Top-level keys that mark a nested record
pub const NESTED_ROOT_KEYS: &[&str] = &["about", "zone", "systems"];

impl Mode {
    /// Nested when any nested root key is present or the input is not an
    /// object (the nested front end reports the shape problem)
    pub fn detect(input: &Value) -> Self {
        match input.as_object() {
            Some(map) if !NESTED_ROOT_KEYS.iter().any(|k| map.contains_key(*k)) => Mode::Flat,
            _ => Mode::Nested,
        }
    }

    /// Path string reported for a field in this mode
    pub fn path(self, id: FieldId) -> String {
        match self {
            Mode::Flat => flat_path(id),
            Mode::Nested => nested_path(id),
        }
    }
}

/// A violation raised by a front end before any rule runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralViolation {
    /// Leaf field the violation blocks, if it concerns one
    pub field: Option<FieldId>,
    pub violation: Violation,
}

/// Output of a front end
#[derive(Debug, Clone, Default)]
pub struct ParsedRecord {
    pub record: Record,
    pub structural: Vec<StructuralViolation>,
}

fn flat_path(id: FieldId) -> String {
    let spec = id.kind.spec();
    let base = spec.flat.unwrap_or(spec.nested);
    match id.slot {
        Slot::Building => base.to_string(),
        Slot::Roof(zone) | Slot::Floor(zone) => format!("{}_{}", base, zone.number()),
        Slot::Wall(position) => format!("{}_{}", base, WallSide::ALL[position]),
        Slot::Hvac(system) => format!("{}_{}", base, system.number()),
        Slot::Duct(system, duct) => format!("{}_{}_{}", base, system.number(), duct.number()),
    }
}

/// Path of the object holding a field in a nested record
pub fn nested_container(group: Group, slot: Slot) -> String {
    match (group, slot) {
        (Group::About, _) => "/about".to_string(),
        (Group::HotWater, _) => "/systems/domestic_hot_water".to_string(),
        (Group::Solar, _) => "/systems/generation/solar_electric".to_string(),
        (Group::Roof, Slot::Roof(z)) => format!("/zone/zone_roof/{}", z.position()),
        (Group::Skylight, Slot::Roof(z)) => format!("/zone/zone_roof/{}/zone_skylight", z.position()),
        (Group::KneeWall, Slot::Roof(z)) => format!("/zone/zone_roof/{}/knee_wall", z.position()),
        (Group::Floor, Slot::Floor(z)) => format!("/zone/zone_floor/{}", z.position()),
        (Group::Wall, Slot::Wall(p)) => format!("/zone/zone_wall/{}", p),
        (Group::Window, Slot::Wall(p)) => format!("/zone/zone_wall/{}/zone_window", p),
        (Group::Hvac, Slot::Hvac(s)) => format!("/systems/hvac/{}", s.position()),
        (Group::Heating, Slot::Hvac(s)) => format!("/systems/hvac/{}/heating", s.position()),
        (Group::Cooling, Slot::Hvac(s)) => format!("/systems/hvac/{}/cooling", s.position()),
        (Group::Duct, Slot::Duct(s, d)) => format!(
            "/systems/hvac/{}/hvac_distribution/duct/{}",
            s.position(),
            d.position()
        ),
        (group, slot) => unreachable!("group {:?} cannot live in slot {:?}", group, slot),
    }
}

fn nested_path(id: FieldId) -> String {
    let spec = id.kind.spec();
    format!("{}/{}", nested_container(spec.group, id.slot), spec.nested)
}

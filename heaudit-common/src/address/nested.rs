//! Nested front end
//!
//! Walks the `about` / `zone` / `systems` tree, builds the record and runs
//! the structural pass from [`schema`](super::schema) along the way.

use serde_json::{Map, Value};
use tracing::debug;

use super::schema::{self, Cardinality};
use super::{nested_container, ParsedRecord, StructuralViolation};
use crate::field::{DuctIndex, FieldId, FieldKind, Group, Slot, SystemIndex, ZoneIndex};
use crate::record::{Duct, FloorZone, HvacSystem, Record, RoofZone, SolarElectric, WallZone};
use crate::result::{Severity, Violation};

/// Build a record from a nested value
pub fn parse(input: &Value) -> ParsedRecord {
    let mut walker = Walker::default();
    walker.root(input);
    debug!(
        "Nested record parsed with {} structural violation(s)",
        walker.structural.len()
    );
    ParsedRecord { record: walker.record, structural: walker.structural }
}

#[derive(Default)]
struct Walker {
    record: Record,
    structural: Vec<StructuralViolation>,
}

impl Walker {
    fn block(&mut self, field: Option<FieldId>, path: String, message: String) {
        self.structural.push(StructuralViolation {
            field,
            violation: Violation::new(path, message, Severity::Blocker),
        });
    }

    fn object<'a>(&mut self, value: &'a Value, path: &str, name: &str) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                let message = schema::wrong_container(name, "object", other);
                self.block(None, display_path(path), message);
                None
            }
        }
    }

    /// Array items within cardinality; extra items are reported and dropped
    fn array<'a>(&mut self, value: &'a Value, path: &str, bounds: Cardinality) -> &'a [Value] {
        let Value::Array(items) = value else {
            if !value.is_null() {
                let message = schema::wrong_container(bounds.name, "array", value);
                self.block(None, path.to_string(), message);
            }
            return &[];
        };
        if let Some(message) = schema::check_cardinality(bounds, items) {
            self.block(None, path.to_string(), message);
        }
        &items[..items.len().min(bounds.max)]
    }

    fn unknown(&mut self, object: &Map<String, Value>, path: &str, leaves: &[FieldKind], children: &[&str]) {
        for key in schema::unknown_keys(object, leaves, children) {
            self.block(None, format!("{}/{}", path, key), schema::additional_property(key));
        }
    }

    /// Store the leaves of one group object into the record
    fn leaves(&mut self, object: &Map<String, Value>, group: Group, slot: Slot, children: &[&str]) {
        let path = nested_container(group, slot);
        let kinds: Vec<FieldKind> = FieldKind::in_group(group).collect();
        self.unknown(object, &path, &kinds, children);

        for kind in kinds {
            let Some(value) = object.get(kind.spec().nested) else {
                continue;
            };
            let id = FieldId::new(kind, slot);
            if let Some(message) = schema::check_leaf(kind, value) {
                self.block(Some(id), format!("{}/{}", path, kind.spec().nested), message);
            }
            if let Some(target) = self.record.get_mut(id) {
                *target = value.clone().into();
            }
        }
    }

    fn root(&mut self, input: &Value) {
        let Some(root) = self.object(input, "", "record") else {
            if input.is_null() {
                self.block(None, "/".to_string(), "record must be of type object (found null)".to_string());
            }
            return;
        };
        self.unknown(root, "", &[], super::NESTED_ROOT_KEYS);

        if let Some(about) = root.get("about") {
            if let Some(about) = self.object(about, "/about", "about") {
                self.leaves(about, Group::About, Slot::Building, &[]);
            }
        }
        if let Some(zone) = root.get("zone") {
            if let Some(zone) = self.object(zone, "/zone", "zone") {
                self.zone(zone);
            }
        }
        if let Some(systems) = root.get("systems") {
            if let Some(systems) = self.object(systems, "/systems", "systems") {
                self.systems(systems);
            }
        }
    }

    fn zone(&mut self, zone: &Map<String, Value>) {
        self.unknown(zone, "/zone", &[], &["zone_roof", "zone_floor", "zone_wall"]);

        if let Some(roofs) = zone.get("zone_roof") {
            for (position, item) in self.array(roofs, "/zone/zone_roof", schema::ZONE_ROOF).iter().enumerate() {
                let slot = Slot::Roof(ZoneIndex::nth(position));
                self.record.roofs.push(RoofZone::default());
                let path = nested_container(Group::Roof, slot);
                let Some(roof) = self.object(item, &path, "zone_roof item") else {
                    continue;
                };
                self.leaves(roof, Group::Roof, slot, &["zone_skylight", "knee_wall"]);
                self.child(roof, "zone_skylight", Group::Skylight, slot);
                self.child(roof, "knee_wall", Group::KneeWall, slot);
            }
        }

        if let Some(floors) = zone.get("zone_floor") {
            for (position, item) in self.array(floors, "/zone/zone_floor", schema::ZONE_FLOOR).iter().enumerate() {
                let slot = Slot::Floor(ZoneIndex::nth(position));
                self.record.floors.push(FloorZone::default());
                let path = nested_container(Group::Floor, slot);
                if let Some(floor) = self.object(item, &path, "zone_floor item") {
                    self.leaves(floor, Group::Floor, slot, &[]);
                }
            }
        }

        if let Some(walls) = zone.get("zone_wall") {
            for (position, item) in self.array(walls, "/zone/zone_wall", schema::ZONE_WALL).iter().enumerate() {
                let slot = Slot::Wall(position);
                self.record.walls.push(WallZone::default());
                let path = nested_container(Group::Wall, slot);
                let Some(wall) = self.object(item, &path, "zone_wall item") else {
                    continue;
                };
                self.leaves(wall, Group::Wall, slot, &["zone_window"]);
                self.child(wall, "zone_window", Group::Window, slot);
            }
        }
    }

    fn child(&mut self, parent: &Map<String, Value>, name: &str, group: Group, slot: Slot) {
        let Some(value) = parent.get(name) else {
            return;
        };
        let path = nested_container(group, slot);
        if let Some(object) = self.object(value, &path, name) {
            self.leaves(object, group, slot, &[]);
        }
    }

    fn systems(&mut self, systems: &Map<String, Value>) {
        self.unknown(systems, "/systems", &[], &["hvac", "domestic_hot_water", "generation"]);

        if let Some(hvac) = systems.get("hvac") {
            for (position, item) in self.array(hvac, "/systems/hvac", schema::HVAC).iter().enumerate() {
                let system = SystemIndex::nth(position);
                self.hvac(item, system);
            }
        }

        if let Some(hot_water) = systems.get("domestic_hot_water") {
            let path = nested_container(Group::HotWater, Slot::Building);
            if let Some(hot_water) = self.object(hot_water, &path, "domestic_hot_water") {
                self.leaves(hot_water, Group::HotWater, Slot::Building, &[]);
            }
        }

        if let Some(generation) = systems.get("generation") {
            let Some(generation) = self.object(generation, "/systems/generation", "generation") else {
                return;
            };
            self.unknown(generation, "/systems/generation", &[], &["solar_electric"]);
            if let Some(solar) = generation.get("solar_electric") {
                let path = nested_container(Group::Solar, Slot::Building);
                if let Some(solar) = self.object(solar, &path, "solar_electric") {
                    self.record.solar = Some(SolarElectric::default());
                    self.leaves(solar, Group::Solar, Slot::Building, &[]);
                }
            }
        }
    }

    fn hvac(&mut self, item: &Value, system: SystemIndex) {
        let slot = Slot::Hvac(system);
        self.record.hvac.push(HvacSystem::default());
        let path = nested_container(Group::Hvac, slot);
        let Some(hvac) = self.object(item, &path, "hvac item") else {
            return;
        };
        self.leaves(hvac, Group::Hvac, slot, &["heating", "cooling", "hvac_distribution"]);
        self.child(hvac, "heating", Group::Heating, slot);
        self.child(hvac, "cooling", Group::Cooling, slot);

        let Some(distribution) = hvac.get("hvac_distribution") else {
            return;
        };
        let distribution_path = format!("{}/hvac_distribution", path);
        let Some(distribution) = self.object(distribution, &distribution_path, "hvac_distribution") else {
            return;
        };
        self.unknown(distribution, &distribution_path, &[], &["duct"]);
        let Some(ducts) = distribution.get("duct") else {
            return;
        };
        let ducts_path = format!("{}/duct", distribution_path);
        for (position, item) in self.array(ducts, &ducts_path, schema::DUCT).iter().enumerate() {
            let slot = Slot::Duct(system, DuctIndex::nth(position));
            if let Some(entry) = self.record.hvac.get_mut(system.position()) {
                entry.ducts.push(Duct::default());
            }
            let path = nested_container(Group::Duct, slot);
            if let Some(duct) = self.object(item, &path, "duct item") {
                self.leaves(duct, Group::Duct, slot, &[]);
            }
        }
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builds_record_from_tree() {
        let parsed = parse(&json!({
            "about": {"conditioned_floor_area": 2000, "shape": "rectangle"},
            "zone": {
                "zone_roof": [{"roof_area": 1000, "zone_skylight": {"skylight_area": 10}}],
                "zone_floor": [{"floor_area": 1000}, {"floor_area": 500}],
                "zone_wall": [{"side": "back", "zone_window": {"window_area": 30}}]
            },
            "systems": {
                "hvac": [{
                    "hvac_fraction": 1,
                    "heating": {"type": "boiler"},
                    "hvac_distribution": {"duct": [{"fraction": 100}]}
                }],
                "generation": {"solar_electric": {"year": 2015}}
            }
        }));
        assert!(parsed.structural.is_empty(), "{:?}", parsed.structural);
        let record = parsed.record;
        assert_eq!(record.roofs[0].skylight.area.number(), Some(10.0));
        assert_eq!(record.floors.len(), 2);
        assert_eq!(record.walls[0].wall_side(), Some(crate::field::WallSide::Back));
        assert_eq!(record.hvac[0].heating.kind.text(), Some("boiler"));
        assert_eq!(record.hvac[0].ducts[0].fraction.integer(), Some(100));
        assert!(record.solar.is_some());
    }

    #[test]
    fn test_type_mismatch_blocks_field() {
        let parsed = parse(&json!({"about": {"year_built": "1990", "zip_code": 94720}}));
        let blocked: Vec<Option<FieldId>> = parsed.structural.iter().map(|s| s.field).collect();
        assert!(blocked.contains(&Some(FieldId::building(FieldKind::YearBuilt))));
        let zip = parsed
            .structural
            .iter()
            .find(|s| s.violation.path == "/about/zip_code")
            .unwrap();
        assert_eq!(zip.violation.message, "zip_code must be a string of 5 digits");
    }

    #[test]
    fn test_unknown_property_and_cardinality() {
        let parsed = parse(&json!({
            "about": {"colour": "red"},
            "zone": {"zone_roof": [{}, {}, {}]}
        }));
        let paths: Vec<&str> = parsed.structural.iter().map(|s| s.violation.path.as_str()).collect();
        assert!(paths.contains(&"/about/colour"));
        assert!(paths.contains(&"/zone/zone_roof"));
        assert_eq!(parsed.record.roofs.len(), 2);
    }

    #[test]
    fn test_non_object_root() {
        let parsed = parse(&json!([1, 2, 3]));
        assert_eq!(parsed.structural.len(), 1);
        assert_eq!(parsed.structural[0].violation.path, "/");
    }
}

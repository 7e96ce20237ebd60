//! Logical audit record
//!
//! One entity model shared by both addressing modes. Values are kept raw
//! ([`FieldValue`]) so that type and range problems surface as violations
//! instead of parse failures.

use serde_json::Value;

use crate::field::{DuctIndex, FieldId, FieldKind, Slot, SystemIndex, WallSide, ZoneIndex};

/// A raw scalar as submitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValue(Value);

impl FieldValue {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Null, empty or whitespace-only strings count as absent
    pub fn is_blank(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric view; numeric strings are accepted (flat records carry them)
    pub fn number(&self) -> Option<f64> {
        match &self.0 {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Integer view; accepts integral floats such as `2.0`
    pub fn integer(&self) -> Option<i64> {
        match &self.0 {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
                    .map(|v| v as i64)
            }),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64)
                        .map(|v| v as i64)
                })
            }
            _ => None,
        }
    }

    /// Non-blank string view
    pub fn text(&self) -> Option<&str> {
        match &self.0 {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }

    /// Boolean view; `"true"`/`"false"` strings are accepted
    pub fn flag(&self) -> Option<bool> {
        match &self.0 {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is(&self, expected: &str) -> bool {
        self.text() == Some(expected)
    }

    pub fn is_any(&self, expected: &[&str]) -> bool {
        self.text().is_some_and(|s| expected.contains(&s))
    }

    /// True for values a common/interior wall may still carry (blank, zero, false)
    pub fn is_zero_like(&self) -> bool {
        self.is_blank() || self.number() == Some(0.0) || self.flag() == Some(false)
    }

    /// Display form used inside messages
    pub fn display(&self) -> String {
        match &self.0 {
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Building-level facts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct About {
    pub assessment_date: FieldValue,
    pub zip_code: FieldValue,
    pub year_built: FieldValue,
    pub number_bedrooms: FieldValue,
    pub num_floor_above_grade: FieldValue,
    pub floor_to_ceiling_height: FieldValue,
    pub conditioned_floor_area: FieldValue,
    pub orientation: FieldValue,
    pub shape: FieldValue,
    pub town_house_walls: FieldValue,
    pub blower_door_test: FieldValue,
    pub air_sealing_present: FieldValue,
    pub envelope_leakage: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skylight {
    pub area: FieldValue,
    pub method: FieldValue,
    pub code: FieldValue,
    pub u_value: FieldValue,
    pub shgc: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KneeWall {
    pub area: FieldValue,
    pub assembly_code: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoofZone {
    pub roof_area: FieldValue,
    pub roof_assembly_code: FieldValue,
    pub roof_color: FieldValue,
    pub roof_absorptance: FieldValue,
    pub roof_type: FieldValue,
    pub ceiling_area: FieldValue,
    pub ceiling_assembly_code: FieldValue,
    pub skylight: Skylight,
    pub knee_wall: KneeWall,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorZone {
    pub floor_area: FieldValue,
    pub foundation_type: FieldValue,
    pub foundation_insulation_level: FieldValue,
    pub floor_assembly_code: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Window {
    pub area: FieldValue,
    pub method: FieldValue,
    pub code: FieldValue,
    pub u_value: FieldValue,
    pub shgc: FieldValue,
    pub solar_screen: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallZone {
    pub side: FieldValue,
    pub wall_assembly_code: FieldValue,
    pub window: Window,
}

impl WallZone {
    pub fn wall_side(&self) -> Option<WallSide> {
        self.side.text().and_then(WallSide::parse)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Heating {
    pub fuel: FieldValue,
    pub kind: FieldValue,
    pub efficiency_method: FieldValue,
    pub year: FieldValue,
    pub efficiency: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cooling {
    pub kind: FieldValue,
    pub efficiency_method: FieldValue,
    pub year: FieldValue,
    pub efficiency: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Duct {
    pub location: FieldValue,
    pub fraction: FieldValue,
    pub insulated: FieldValue,
    pub sealed: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HvacSystem {
    pub hvac_fraction: FieldValue,
    pub heating: Heating,
    pub cooling: Cooling,
    pub ducts: Vec<Duct>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotWater {
    pub category: FieldValue,
    pub kind: FieldValue,
    pub fuel: FieldValue,
    pub efficiency_method: FieldValue,
    pub year: FieldValue,
    pub energy_factor: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolarElectric {
    pub capacity_known: FieldValue,
    pub system_capacity: FieldValue,
    pub num_panels: FieldValue,
    pub year: FieldValue,
    pub array_azimuth: FieldValue,
    pub array_tilt: FieldValue,
}

/// A complete audit submission
///
/// Collections are bounded by the front ends: at most two roof and floor
/// zones, four walls, two HVAC systems and three ducts per system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub about: About,
    pub roofs: Vec<RoofZone>,
    pub floors: Vec<FloorZone>,
    pub walls: Vec<WallZone>,
    pub hvac: Vec<HvacSystem>,
    pub hot_water: HotWater,
    pub solar: Option<SolarElectric>,
}

impl Record {
    pub fn roof(&self, zone: ZoneIndex) -> Option<&RoofZone> {
        self.roofs.get(zone.position())
    }

    pub fn floor(&self, zone: ZoneIndex) -> Option<&FloorZone> {
        self.floors.get(zone.position())
    }

    pub fn system(&self, system: SystemIndex) -> Option<&HvacSystem> {
        self.hvac.get(system.position())
    }

    pub fn duct(&self, system: SystemIndex, duct: DuctIndex) -> Option<&Duct> {
        self.system(system).and_then(|s| s.ducts.get(duct.position()))
    }

    /// Value stored for a field; `None` when its entity does not exist
    pub fn get(&self, id: FieldId) -> Option<&FieldValue> {
        use FieldKind as K;
        match id.slot {
            Slot::Building => {
                let a = &self.about;
                let w = &self.hot_water;
                Some(match id.kind {
                    K::AssessmentDate => &a.assessment_date,
                    K::ZipCode => &a.zip_code,
                    K::YearBuilt => &a.year_built,
                    K::NumberBedrooms => &a.number_bedrooms,
                    K::NumFloorAboveGrade => &a.num_floor_above_grade,
                    K::FloorToCeilingHeight => &a.floor_to_ceiling_height,
                    K::ConditionedFloorArea => &a.conditioned_floor_area,
                    K::Orientation => &a.orientation,
                    K::Shape => &a.shape,
                    K::TownHouseWalls => &a.town_house_walls,
                    K::BlowerDoorTest => &a.blower_door_test,
                    K::AirSealingPresent => &a.air_sealing_present,
                    K::EnvelopeLeakage => &a.envelope_leakage,
                    K::HotWaterCategory => &w.category,
                    K::HotWaterType => &w.kind,
                    K::HotWaterFuel => &w.fuel,
                    K::HotWaterEfficiencyMethod => &w.efficiency_method,
                    K::HotWaterYear => &w.year,
                    K::HotWaterEnergyFactor => &w.energy_factor,
                    _ => {
                        let s = self.solar.as_ref()?;
                        match id.kind {
                            K::SolarCapacityKnown => &s.capacity_known,
                            K::SolarSystemCapacity => &s.system_capacity,
                            K::SolarNumPanels => &s.num_panels,
                            K::SolarYear => &s.year,
                            K::SolarArrayAzimuth => &s.array_azimuth,
                            K::SolarArrayTilt => &s.array_tilt,
                            _ => return None,
                        }
                    }
                })
            }
            Slot::Roof(zone) => {
                let r = self.roof(zone)?;
                Some(match id.kind {
                    K::RoofArea => &r.roof_area,
                    K::RoofAssemblyCode => &r.roof_assembly_code,
                    K::RoofColor => &r.roof_color,
                    K::RoofAbsorptance => &r.roof_absorptance,
                    K::RoofType => &r.roof_type,
                    K::CeilingArea => &r.ceiling_area,
                    K::CeilingAssemblyCode => &r.ceiling_assembly_code,
                    K::SkylightArea => &r.skylight.area,
                    K::SkylightMethod => &r.skylight.method,
                    K::SkylightCode => &r.skylight.code,
                    K::SkylightUValue => &r.skylight.u_value,
                    K::SkylightShgc => &r.skylight.shgc,
                    K::KneeWallArea => &r.knee_wall.area,
                    K::KneeWallAssemblyCode => &r.knee_wall.assembly_code,
                    _ => return None,
                })
            }
            Slot::Floor(zone) => {
                let f = self.floor(zone)?;
                Some(match id.kind {
                    K::FloorArea => &f.floor_area,
                    K::FoundationType => &f.foundation_type,
                    K::FoundationInsulationLevel => &f.foundation_insulation_level,
                    K::FloorAssemblyCode => &f.floor_assembly_code,
                    _ => return None,
                })
            }
            Slot::Wall(position) => {
                let w = self.walls.get(position)?;
                Some(match id.kind {
                    K::WallSide => &w.side,
                    K::WallAssemblyCode => &w.wall_assembly_code,
                    K::WindowArea => &w.window.area,
                    K::WindowMethod => &w.window.method,
                    K::WindowCode => &w.window.code,
                    K::WindowUValue => &w.window.u_value,
                    K::WindowShgc => &w.window.shgc,
                    K::SolarScreen => &w.window.solar_screen,
                    _ => return None,
                })
            }
            Slot::Hvac(system) => {
                let h = self.system(system)?;
                Some(match id.kind {
                    K::HvacFraction => &h.hvac_fraction,
                    K::HeatingFuel => &h.heating.fuel,
                    K::HeatingType => &h.heating.kind,
                    K::HeatingEfficiencyMethod => &h.heating.efficiency_method,
                    K::HeatingYear => &h.heating.year,
                    K::HeatingEfficiency => &h.heating.efficiency,
                    K::CoolingType => &h.cooling.kind,
                    K::CoolingEfficiencyMethod => &h.cooling.efficiency_method,
                    K::CoolingYear => &h.cooling.year,
                    K::CoolingEfficiency => &h.cooling.efficiency,
                    _ => return None,
                })
            }
            Slot::Duct(system, duct) => {
                let d = self.duct(system, duct)?;
                Some(match id.kind {
                    K::DuctLocation => &d.location,
                    K::DuctFraction => &d.fraction,
                    K::DuctInsulated => &d.insulated,
                    K::DuctSealed => &d.sealed,
                    _ => return None,
                })
            }
        }
    }

    /// Mutable access used by the front ends while building a record
    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut FieldValue> {
        use FieldKind as K;
        match id.slot {
            Slot::Building => {
                let a = &mut self.about;
                let w = &mut self.hot_water;
                Some(match id.kind {
                    K::AssessmentDate => &mut a.assessment_date,
                    K::ZipCode => &mut a.zip_code,
                    K::YearBuilt => &mut a.year_built,
                    K::NumberBedrooms => &mut a.number_bedrooms,
                    K::NumFloorAboveGrade => &mut a.num_floor_above_grade,
                    K::FloorToCeilingHeight => &mut a.floor_to_ceiling_height,
                    K::ConditionedFloorArea => &mut a.conditioned_floor_area,
                    K::Orientation => &mut a.orientation,
                    K::Shape => &mut a.shape,
                    K::TownHouseWalls => &mut a.town_house_walls,
                    K::BlowerDoorTest => &mut a.blower_door_test,
                    K::AirSealingPresent => &mut a.air_sealing_present,
                    K::EnvelopeLeakage => &mut a.envelope_leakage,
                    K::HotWaterCategory => &mut w.category,
                    K::HotWaterType => &mut w.kind,
                    K::HotWaterFuel => &mut w.fuel,
                    K::HotWaterEfficiencyMethod => &mut w.efficiency_method,
                    K::HotWaterYear => &mut w.year,
                    K::HotWaterEnergyFactor => &mut w.energy_factor,
                    _ => {
                        let s = self.solar.as_mut()?;
                        match id.kind {
                            K::SolarCapacityKnown => &mut s.capacity_known,
                            K::SolarSystemCapacity => &mut s.system_capacity,
                            K::SolarNumPanels => &mut s.num_panels,
                            K::SolarYear => &mut s.year,
                            K::SolarArrayAzimuth => &mut s.array_azimuth,
                            K::SolarArrayTilt => &mut s.array_tilt,
                            _ => return None,
                        }
                    }
                })
            }
            Slot::Roof(zone) => {
                let r = self.roofs.get_mut(zone.position())?;
                Some(match id.kind {
                    K::RoofArea => &mut r.roof_area,
                    K::RoofAssemblyCode => &mut r.roof_assembly_code,
                    K::RoofColor => &mut r.roof_color,
                    K::RoofAbsorptance => &mut r.roof_absorptance,
                    K::RoofType => &mut r.roof_type,
                    K::CeilingArea => &mut r.ceiling_area,
                    K::CeilingAssemblyCode => &mut r.ceiling_assembly_code,
                    K::SkylightArea => &mut r.skylight.area,
                    K::SkylightMethod => &mut r.skylight.method,
                    K::SkylightCode => &mut r.skylight.code,
                    K::SkylightUValue => &mut r.skylight.u_value,
                    K::SkylightShgc => &mut r.skylight.shgc,
                    K::KneeWallArea => &mut r.knee_wall.area,
                    K::KneeWallAssemblyCode => &mut r.knee_wall.assembly_code,
                    _ => return None,
                })
            }
            Slot::Floor(zone) => {
                let f = self.floors.get_mut(zone.position())?;
                Some(match id.kind {
                    K::FloorArea => &mut f.floor_area,
                    K::FoundationType => &mut f.foundation_type,
                    K::FoundationInsulationLevel => &mut f.foundation_insulation_level,
                    K::FloorAssemblyCode => &mut f.floor_assembly_code,
                    _ => return None,
                })
            }
            Slot::Wall(position) => {
                let w = self.walls.get_mut(position)?;
                Some(match id.kind {
                    K::WallSide => &mut w.side,
                    K::WallAssemblyCode => &mut w.wall_assembly_code,
                    K::WindowArea => &mut w.window.area,
                    K::WindowMethod => &mut w.window.method,
                    K::WindowCode => &mut w.window.code,
                    K::WindowUValue => &mut w.window.u_value,
                    K::WindowShgc => &mut w.window.shgc,
                    K::SolarScreen => &mut w.window.solar_screen,
                    _ => return None,
                })
            }
            Slot::Hvac(system) => {
                let h = self.hvac.get_mut(system.position())?;
                Some(match id.kind {
                    K::HvacFraction => &mut h.hvac_fraction,
                    K::HeatingFuel => &mut h.heating.fuel,
                    K::HeatingType => &mut h.heating.kind,
                    K::HeatingEfficiencyMethod => &mut h.heating.efficiency_method,
                    K::HeatingYear => &mut h.heating.year,
                    K::HeatingEfficiency => &mut h.heating.efficiency,
                    K::CoolingType => &mut h.cooling.kind,
                    K::CoolingEfficiencyMethod => &mut h.cooling.efficiency_method,
                    K::CoolingYear => &mut h.cooling.year,
                    K::CoolingEfficiency => &mut h.cooling.efficiency,
                    _ => return None,
                })
            }
            Slot::Duct(system, duct) => {
                let d = self
                    .hvac
                    .get_mut(system.position())?
                    .ducts
                    .get_mut(duct.position())?;
                Some(match id.kind {
                    K::DuctLocation => &mut d.location,
                    K::DuctFraction => &mut d.fraction,
                    K::DuctInsulated => &mut d.insulated,
                    K::DuctSealed => &mut d.sealed,
                    _ => return None,
                })
            }
        }
    }

    /// Slots of every entity present in the record
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = vec![Slot::Building];
        slots.extend((0..self.roofs.len()).filter_map(ZoneIndex::from_position).map(Slot::Roof));
        slots.extend((0..self.floors.len()).filter_map(ZoneIndex::from_position).map(Slot::Floor));
        slots.extend((0..self.walls.len()).map(Slot::Wall));
        for (position, system) in self.hvac.iter().enumerate() {
            let Some(index) = SystemIndex::from_position(position) else {
                continue;
            };
            slots.push(Slot::Hvac(index));
            slots.extend(
                (0..system.ducts.len())
                    .filter_map(DuctIndex::from_position)
                    .map(|duct| Slot::Duct(index, duct)),
            );
        }
        slots
    }

    /// Every addressable field of the record with its value, in model order
    pub fn fields(&self) -> Vec<(FieldId, &FieldValue)> {
        let mut fields = Vec::new();
        for slot in self.slots() {
            for kind in FieldKind::ALL.iter().copied().filter(|k| k.slot_kind() == slot.kind()) {
                let id = FieldId::new(kind, slot);
                if let Some(value) = self.get(id) {
                    fields.push((id, value));
                }
            }
        }
        fields
    }

    /// Value of a field, or a shared blank when the entity is absent
    pub fn value(&self, id: FieldId) -> &FieldValue {
        static BLANK: FieldValue = FieldValue(Value::Null);
        self.get(id).unwrap_or(&BLANK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_views() {
        let v = FieldValue::new(json!(" 1200 "));
        assert_eq!(v.number(), Some(1200.0));
        assert_eq!(v.integer(), Some(1200));
        assert!(!v.is_blank());

        assert!(FieldValue::new(json!("   ")).is_blank());
        assert!(FieldValue::default().is_blank());
        assert_eq!(FieldValue::new(json!(2.0)).integer(), Some(2));
        assert_eq!(FieldValue::new(json!(2.5)).integer(), None);
        assert_eq!(FieldValue::new(json!("true")).flag(), Some(true));
        assert_eq!(FieldValue::new(json!("abc")).number(), None);
        assert!(FieldValue::new(json!(0)).is_zero_like());
    }

    #[test]
    fn test_get_and_fields_cover_nested_entities() {
        let mut record = Record::default();
        record.roofs.push(RoofZone::default());
        record.hvac.push(HvacSystem { ducts: vec![Duct::default(), Duct::default()], ..Default::default() });

        let duct = FieldId::duct(FieldKind::DuctFraction, SystemIndex::First, DuctIndex::Second);
        *record.get_mut(duct).unwrap() = FieldValue::new(json!(40));
        assert_eq!(record.value(duct).integer(), Some(40));

        let missing = FieldId::duct(FieldKind::DuctFraction, SystemIndex::First, DuctIndex::Third);
        assert!(record.get(missing).is_none());
        assert!(record.value(missing).is_blank());

        let solar = FieldId::building(FieldKind::SolarYear);
        assert!(record.get(solar).is_none());

        let ids: Vec<FieldId> = record.fields().into_iter().map(|(id, _)| id).collect();
        assert!(ids.contains(&duct));
        assert!(ids.contains(&FieldId::roof(FieldKind::KneeWallArea, ZoneIndex::First)));
        assert!(!ids.contains(&solar));
    }
}

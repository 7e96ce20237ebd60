//! Required-field resolution
//!
//! Works out which fields must carry a value for this particular record.
//! Several requirements depend on sibling values (a ceiling area only for an
//! attic roof, an efficiency only when the method is `user`), and a few
//! requirements are waived where another rule already reports the omission.

use std::collections::BTreeSet;

use crate::field::{DuctIndex, FieldId, FieldKind as K, Slot, SystemIndex, WallSide, ZoneIndex, MAX_WALLS};
use crate::record::{FieldValue, Record};
use crate::tables::{
    exterior_sides, COOLING_TYPES_WITHOUT_METHOD, DUCTED_COOLING_TYPES, DUCTED_HEATING_TYPES,
    FRAMED_FLOOR_FOUNDATIONS, HEATING_TYPES_WITHOUT_METHOD, TOWN_HOUSE_WALLS,
};

/// Hot water types that take an efficiency method
const RATED_HOT_WATER_TYPES: &[&str] = &["storage", "heat_pump", "tankless"];

/// Fields that must be non-blank
///
/// The first roof zone, floor zone, wall and HVAC system are always
/// considered, even when the record omits them entirely.
pub fn resolve(record: &Record) -> BTreeSet<FieldId> {
    let mut required = Required { record, fields: BTreeSet::new() };
    required.about();
    for zone in ZoneIndex::ALL.iter().take(record.roofs.len().max(1)) {
        required.roof(Slot::Roof(*zone));
    }
    for zone in ZoneIndex::ALL.iter().take(record.floors.len().max(1)) {
        required.floor(Slot::Floor(*zone));
    }
    for position in 0..record.walls.len().clamp(1, MAX_WALLS) {
        required.wall(Slot::Wall(position));
    }
    for system in SystemIndex::ALL.iter().take(record.hvac.len().max(1)) {
        required.hvac(*system);
    }
    required.hot_water();
    required.solar();
    required.fields
}

struct Required<'a> {
    record: &'a Record,
    fields: BTreeSet<FieldId>,
}

impl<'a> Required<'a> {
    fn value(&self, kind: K, slot: Slot) -> &'a FieldValue {
        self.record.value(FieldId::new(kind, slot))
    }

    fn require(&mut self, slot: Slot, kinds: &[K]) {
        self.fields.extend(kinds.iter().map(|kind| FieldId::new(*kind, slot)));
    }

    fn require_if(&mut self, condition: bool, slot: Slot, kinds: &[K]) {
        if condition {
            self.require(slot, kinds);
        }
    }

    /// Glazing details required once a glazed area is declared
    fn glazing(&mut self, slot: Slot, area: K, method: K, code: K, custom: &[K]) {
        if !self.value(area, slot).number().is_some_and(|a| a > 0.0) {
            return;
        }
        self.require(slot, &[method]);
        let method = self.value(method, slot);
        self.require_if(method.is("code"), slot, &[code]);
        self.require_if(method.is("custom"), slot, custom);
    }

    fn about(&mut self) {
        let b = Slot::Building;
        self.require(
            b,
            &[
                K::AssessmentDate,
                K::ZipCode,
                K::YearBuilt,
                K::NumberBedrooms,
                K::NumFloorAboveGrade,
                K::FloorToCeilingHeight,
                K::ConditionedFloorArea,
                K::Orientation,
                K::Shape,
                K::BlowerDoorTest,
            ],
        );
        self.require_if(self.value(K::Shape, b).is("town_house"), b, &[K::TownHouseWalls]);
        match self.value(K::BlowerDoorTest, b).flag() {
            Some(true) => self.require(b, &[K::EnvelopeLeakage]),
            Some(false) => self.require(b, &[K::AirSealingPresent]),
            None => {}
        }
    }

    fn roof(&mut self, slot: Slot) {
        self.require(slot, &[K::RoofType, K::RoofArea, K::RoofAssemblyCode, K::RoofColor]);
        let attic = self.value(K::RoofType, slot).is("vented_attic");
        self.require_if(attic, slot, &[K::CeilingArea, K::CeilingAssemblyCode]);
        let cool = self.value(K::RoofColor, slot).is("cool_color");
        self.require_if(cool, slot, &[K::RoofAbsorptance]);
        self.glazing(
            slot,
            K::SkylightArea,
            K::SkylightMethod,
            K::SkylightCode,
            &[K::SkylightUValue, K::SkylightShgc],
        );
        let knee_wall = self.value(K::KneeWallArea, slot).number().is_some_and(|a| a > 0.0);
        self.require_if(knee_wall, slot, &[K::KneeWallAssemblyCode]);
    }

    fn floor(&mut self, slot: Slot) {
        self.require(slot, &[K::FloorArea, K::FoundationType, K::FoundationInsulationLevel]);
        let framed = self.value(K::FoundationType, slot).is_any(FRAMED_FLOOR_FOUNDATIONS);
        self.require_if(framed, slot, &[K::FloorAssemblyCode]);
    }

    fn is_exterior(&self, slot: Slot) -> bool {
        let b = Slot::Building;
        if !self.value(K::Shape, b).is("town_house") {
            return true;
        }
        let Some(walls) = self.value(K::TownHouseWalls, b).text().filter(|w| TOWN_HOUSE_WALLS.contains(w)) else {
            return true;
        };
        match self.value(K::WallSide, slot).text().and_then(WallSide::parse) {
            Some(side) => exterior_sides(walls).contains(&side.as_str()),
            None => true,
        }
    }

    fn wall(&mut self, slot: Slot) {
        self.require(slot, &[K::WallSide]);
        if !self.is_exterior(slot) {
            return;
        }
        self.require(slot, &[K::WallAssemblyCode]);
        self.glazing(
            slot,
            K::WindowArea,
            K::WindowMethod,
            K::WindowCode,
            &[K::WindowUValue, K::WindowShgc],
        );
    }

    fn hvac(&mut self, system: SystemIndex) {
        let slot = Slot::Hvac(system);
        self.require(slot, &[K::HvacFraction, K::HeatingType, K::CoolingType]);

        let heating = self.value(K::HeatingType, slot).text();
        let fuel = self.value(K::HeatingFuel, slot);
        if let Some(heating) = heating.filter(|h| *h != "none") {
            self.require(slot, &[K::HeatingFuel]);
            let rated = !HEATING_TYPES_WITHOUT_METHOD.contains(&heating)
                && !(heating == "central_furnace" && fuel.is("electric"));
            self.require_if(rated, slot, &[K::HeatingEfficiencyMethod]);
        }
        self.method_details(slot, K::HeatingEfficiencyMethod, K::HeatingYear, K::HeatingEfficiency);

        let cooling = self.value(K::CoolingType, slot).text();
        if let Some(cooling) = cooling {
            let rated = !COOLING_TYPES_WITHOUT_METHOD.contains(&cooling);
            self.require_if(rated, slot, &[K::CoolingEfficiencyMethod]);
        }
        self.method_details(slot, K::CoolingEfficiencyMethod, K::CoolingYear, K::CoolingEfficiency);

        let ducted = heating.is_some_and(|h| DUCTED_HEATING_TYPES.contains(&h))
            || cooling.is_some_and(|c| DUCTED_COOLING_TYPES.contains(&c));
        let present = self.record.system(system).map_or(0, |h| h.ducts.len());
        let count = if ducted { present.max(1) } else { present };
        for duct in DuctIndex::ALL.iter().take(count) {
            self.require(
                Slot::Duct(system, *duct),
                &[K::DuctLocation, K::DuctFraction, K::DuctInsulated, K::DuctSealed],
            );
        }
    }

    /// Shipment-weighted efficiency needs an installation year, user
    /// efficiency needs the rating itself
    fn method_details(&mut self, slot: Slot, method: K, year: K, rating: K) {
        let method = self.value(method, slot);
        self.require_if(method.is("shipment_weighted"), slot, &[year]);
        self.require_if(method.is("user"), slot, &[rating]);
    }

    fn hot_water(&mut self) {
        let b = Slot::Building;
        self.require(b, &[K::HotWaterCategory, K::HotWaterType]);
        let kind = self.value(K::HotWaterType, b);
        // The type rule reports a missing fuel once a type is given
        self.require_if(kind.is_blank(), b, &[K::HotWaterFuel]);
        self.require_if(kind.is_any(RATED_HOT_WATER_TYPES), b, &[K::HotWaterEfficiencyMethod]);
        self.method_details(b, K::HotWaterEfficiencyMethod, K::HotWaterYear, K::HotWaterEnergyFactor);
    }

    fn solar(&mut self) {
        if self.record.solar.is_none() {
            return;
        }
        let b = Slot::Building;
        self.require(b, &[K::SolarCapacityKnown, K::SolarYear, K::SolarArrayAzimuth, K::SolarArrayTilt]);
        match self.value(K::SolarCapacityKnown, b).flag() {
            Some(true) => self.require(b, &[K::SolarSystemCapacity]),
            Some(false) => self.require(b, &[K::SolarNumPanels]),
            None => {}
        }
    }
}

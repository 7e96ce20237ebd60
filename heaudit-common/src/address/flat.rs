//! Flat front end
//!
//! Maps suffixed keys onto record slots. Repeated structures exist only when
//! at least one of their keys carries a value: `roof_area_2 = ""` does not
//! create a second roof zone.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use tracing::debug;

use super::{Mode, ParsedRecord};
use crate::field::{DuctIndex, FieldId, FieldKind, Slot, SlotKind, SystemIndex, WallSide, ZoneIndex, MAX_WALLS};
use crate::record::{Duct, FieldValue, FloorZone, HvacSystem, Record, RoofZone, SolarElectric, WallZone};

/// Every flat key the front end understands
static FLAT_NAMES: Lazy<HashMap<String, FieldId>> = Lazy::new(|| {
    let mut names = HashMap::new();
    for kind in FieldKind::ALL.iter().copied() {
        if kind.spec().flat.is_none() {
            continue;
        }
        for slot in slots_for(kind.slot_kind()) {
            let id = FieldId::new(kind, slot);
            names.insert(Mode::Flat.path(id), id);
        }
    }
    names
});

fn slots_for(kind: SlotKind) -> Vec<Slot> {
    match kind {
        SlotKind::Building => vec![Slot::Building],
        SlotKind::Roof => ZoneIndex::ALL.iter().map(|z| Slot::Roof(*z)).collect(),
        SlotKind::Floor => ZoneIndex::ALL.iter().map(|z| Slot::Floor(*z)).collect(),
        SlotKind::Wall => (0..MAX_WALLS).map(Slot::Wall).collect(),
        SlotKind::Hvac => SystemIndex::ALL.iter().map(|s| Slot::Hvac(*s)).collect(),
        SlotKind::Duct => SystemIndex::ALL
            .iter()
            .flat_map(|s| DuctIndex::ALL.iter().map(move |d| Slot::Duct(*s, *d)))
            .collect(),
    }
}

/// Resolve a flat key to its field
pub fn field_for_key(key: &str) -> Option<FieldId> {
    FLAT_NAMES.get(key).copied()
}

/// Build a record from a flat object
pub fn parse(input: &Map<String, Value>) -> ParsedRecord {
    let mut values: Vec<(FieldId, FieldValue)> = Vec::with_capacity(input.len());
    for (key, value) in input {
        match field_for_key(key) {
            Some(id) => values.push((id, FieldValue::new(value.clone()))),
            None => debug!("Ignoring unknown flat key {}", key),
        }
    }

    let present = |pred: &dyn Fn(Slot) -> bool| values.iter().any(|(id, v)| pred(id.slot) && !v.is_blank());

    let zones = |second: &dyn Fn(Slot) -> bool| if present(second) { 2 } else { 1 };
    let roof_count = zones(&|s| s == Slot::Roof(ZoneIndex::Second));
    let floor_count = zones(&|s| s == Slot::Floor(ZoneIndex::Second));
    let system_count = zones(&|s| matches!(s, Slot::Hvac(SystemIndex::Second) | Slot::Duct(SystemIndex::Second, _)));

    let duct_count = |system: SystemIndex| {
        DuctIndex::ALL
            .iter()
            .rev()
            .find(|d| present(&|s| s == Slot::Duct(system, **d)))
            .map_or(0, |d| d.number())
    };

    let mut record = Record {
        roofs: vec![RoofZone::default(); roof_count],
        floors: vec![FloorZone::default(); floor_count],
        walls: WallSide::ALL
            .iter()
            .map(|side| WallZone {
                side: FieldValue::new(Value::String(side.as_str().to_string())),
                ..Default::default()
            })
            .collect(),
        hvac: SystemIndex::ALL[..system_count]
            .iter()
            .map(|s| HvacSystem { ducts: vec![Duct::default(); duct_count(*s)], ..Default::default() })
            .collect(),
        ..Default::default()
    };
    if values.iter().any(|(id, v)| id.kind.spec().group == crate::field::Group::Solar && !v.is_blank()) {
        record.solar = Some(SolarElectric::default());
    }

    for (id, value) in values {
        if let Some(slot) = record.get_mut(id) {
            *slot = value;
        }
    }

    ParsedRecord { record, structural: Vec::new() }
}

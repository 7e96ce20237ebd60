//! Field identifiers
//!
//! Every addressable value in a [`Record`](crate::record::Record) is named by
//! a [`FieldId`]: a [`FieldKind`] from a closed set plus a [`Slot`] carrying
//! the typed discriminators (zone index, wall position, system index, duct
//! index). Both addressing front ends translate to and from this form, so the
//! rule registry never parses field names.

use std::fmt;

macro_rules! ordinal_index {
    ($(#[$meta:meta])* $name:ident, $what:literal, [$($variant:ident),+]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Index for a zero-based position, `None` when out of domain
            pub fn from_position(position: usize) -> Option<Self> {
                Self::ALL.get(position).copied()
            }

            /// Index for a one-based number, `None` when out of domain
            pub fn from_number(number: usize) -> Option<Self> {
                number.checked_sub(1).and_then(Self::from_position)
            }

            /// Index for a zero-based position
            ///
            /// # Panics
            /// Panics when `position` is outside the declared domain; callers
            /// own the bound check.
            pub fn nth(position: usize) -> Self {
                match Self::from_position(position) {
                    Some(index) => index,
                    None => panic!(
                        "{} position {} outside 0..{}",
                        $what,
                        position,
                        Self::ALL.len()
                    ),
                }
            }

            /// Zero-based position
            pub fn position(self) -> usize {
                self as usize
            }

            /// One-based number used in flat field suffixes
            pub fn number(self) -> usize {
                self.position() + 1
            }
        }
    };
}

ordinal_index!(
    /// Roof or floor zone (a building has one or two of each)
    ZoneIndex,
    "zone",
    [First, Second]
);

ordinal_index!(
    /// HVAC system (a building has one or two)
    SystemIndex,
    "system",
    [First, Second]
);

ordinal_index!(
    /// Duct within one HVAC distribution system (up to three)
    DuctIndex,
    "duct",
    [First, Second, Third]
);

/// Maximum number of wall zones
pub const MAX_WALLS: usize = 4;

/// Wall orientation relative to the front of the building
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WallSide {
    Front,
    Back,
    Right,
    Left,
}

impl WallSide {
    /// Canonical order; flat records store walls in this order
    pub const ALL: [WallSide; 4] = [WallSide::Front, WallSide::Back, WallSide::Right, WallSide::Left];

    pub fn as_str(self) -> &'static str {
        match self {
            WallSide::Front => "front",
            WallSide::Back => "back",
            WallSide::Right => "right",
            WallSide::Left => "left",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|side| side.as_str() == s)
    }

    /// Front and back walls share the long dimension of the footprint
    pub fn is_front_back(self) -> bool {
        matches!(self, WallSide::Front | WallSide::Back)
    }
}

impl fmt::Display for WallSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity a field belongs to, which fixes the shape of its [`Slot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Building,
    Roof,
    Floor,
    Wall,
    Hvac,
    Duct,
}

/// Position of a field's entity within the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Building,
    Roof(ZoneIndex),
    Floor(ZoneIndex),
    /// Wall position (array index in nested records, canonical side order in flat ones)
    Wall(usize),
    Hvac(SystemIndex),
    Duct(SystemIndex, DuctIndex),
}

impl Slot {
    pub fn kind(self) -> SlotKind {
        match self {
            Slot::Building => SlotKind::Building,
            Slot::Roof(_) => SlotKind::Roof,
            Slot::Floor(_) => SlotKind::Floor,
            Slot::Wall(_) => SlotKind::Wall,
            Slot::Hvac(_) => SlotKind::Hvac,
            Slot::Duct(..) => SlotKind::Duct,
        }
    }
}

/// Sub-object a field lives in when the record is nested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    About,
    Roof,
    Skylight,
    KneeWall,
    Floor,
    Wall,
    Window,
    Hvac,
    Heating,
    Cooling,
    Duct,
    HotWater,
    Solar,
}

impl Group {
    pub fn slot_kind(self) -> SlotKind {
        match self {
            Group::About | Group::HotWater | Group::Solar => SlotKind::Building,
            Group::Roof | Group::Skylight | Group::KneeWall => SlotKind::Roof,
            Group::Floor => SlotKind::Floor,
            Group::Wall | Group::Window => SlotKind::Wall,
            Group::Hvac | Group::Heating | Group::Cooling => SlotKind::Hvac,
            Group::Duct => SlotKind::Duct,
        }
    }
}

/// JSON type a field must carry in a nested record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Number,
    String,
    Boolean,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Integer => "integer",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
        }
    }
}

/// Static description of a field kind
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub group: Group,
    /// Property name inside its nested object
    pub nested: &'static str,
    /// Flat key base name; `None` for fields that only exist in nested records
    pub flat: Option<&'static str>,
    pub value_type: ValueType,
    /// Replaces the generic nested type-mismatch message
    pub type_message: Option<&'static str>,
}

/// Closed set of addressable field kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    // About
    AssessmentDate,
    ZipCode,
    YearBuilt,
    NumberBedrooms,
    NumFloorAboveGrade,
    FloorToCeilingHeight,
    ConditionedFloorArea,
    Orientation,
    Shape,
    TownHouseWalls,
    BlowerDoorTest,
    AirSealingPresent,
    EnvelopeLeakage,
    // Roof zone
    RoofArea,
    RoofAssemblyCode,
    RoofColor,
    RoofAbsorptance,
    RoofType,
    CeilingArea,
    CeilingAssemblyCode,
    SkylightArea,
    SkylightMethod,
    SkylightCode,
    SkylightUValue,
    SkylightShgc,
    KneeWallArea,
    KneeWallAssemblyCode,
    // Floor zone
    FloorArea,
    FoundationType,
    FoundationInsulationLevel,
    FloorAssemblyCode,
    // Wall zone
    WallSide,
    WallAssemblyCode,
    WindowArea,
    WindowMethod,
    WindowCode,
    WindowUValue,
    WindowShgc,
    SolarScreen,
    // HVAC
    HvacFraction,
    HeatingFuel,
    HeatingType,
    HeatingEfficiencyMethod,
    HeatingYear,
    HeatingEfficiency,
    CoolingType,
    CoolingEfficiencyMethod,
    CoolingYear,
    CoolingEfficiency,
    DuctLocation,
    DuctFraction,
    DuctInsulated,
    DuctSealed,
    // Domestic hot water
    HotWaterCategory,
    HotWaterType,
    HotWaterFuel,
    HotWaterEfficiencyMethod,
    HotWaterYear,
    HotWaterEnergyFactor,
    // Solar electric generation
    SolarCapacityKnown,
    SolarSystemCapacity,
    SolarNumPanels,
    SolarYear,
    SolarArrayAzimuth,
    SolarArrayTilt,
}

const fn spec(group: Group, nested: &'static str, flat: &'static str, value_type: ValueType) -> FieldSpec {
    FieldSpec { group, nested, flat: Some(flat), value_type, type_message: None }
}

impl FieldKind {
    pub const ALL: &'static [FieldKind] = &[
        FieldKind::AssessmentDate,
        FieldKind::ZipCode,
        FieldKind::YearBuilt,
        FieldKind::NumberBedrooms,
        FieldKind::NumFloorAboveGrade,
        FieldKind::FloorToCeilingHeight,
        FieldKind::ConditionedFloorArea,
        FieldKind::Orientation,
        FieldKind::Shape,
        FieldKind::TownHouseWalls,
        FieldKind::BlowerDoorTest,
        FieldKind::AirSealingPresent,
        FieldKind::EnvelopeLeakage,
        FieldKind::RoofArea,
        FieldKind::RoofAssemblyCode,
        FieldKind::RoofColor,
        FieldKind::RoofAbsorptance,
        FieldKind::RoofType,
        FieldKind::CeilingArea,
        FieldKind::CeilingAssemblyCode,
        FieldKind::SkylightArea,
        FieldKind::SkylightMethod,
        FieldKind::SkylightCode,
        FieldKind::SkylightUValue,
        FieldKind::SkylightShgc,
        FieldKind::KneeWallArea,
        FieldKind::KneeWallAssemblyCode,
        FieldKind::FloorArea,
        FieldKind::FoundationType,
        FieldKind::FoundationInsulationLevel,
        FieldKind::FloorAssemblyCode,
        FieldKind::WallSide,
        FieldKind::WallAssemblyCode,
        FieldKind::WindowArea,
        FieldKind::WindowMethod,
        FieldKind::WindowCode,
        FieldKind::WindowUValue,
        FieldKind::WindowShgc,
        FieldKind::SolarScreen,
        FieldKind::HvacFraction,
        FieldKind::HeatingFuel,
        FieldKind::HeatingType,
        FieldKind::HeatingEfficiencyMethod,
        FieldKind::HeatingYear,
        FieldKind::HeatingEfficiency,
        FieldKind::CoolingType,
        FieldKind::CoolingEfficiencyMethod,
        FieldKind::CoolingYear,
        FieldKind::CoolingEfficiency,
        FieldKind::DuctLocation,
        FieldKind::DuctFraction,
        FieldKind::DuctInsulated,
        FieldKind::DuctSealed,
        FieldKind::HotWaterCategory,
        FieldKind::HotWaterType,
        FieldKind::HotWaterFuel,
        FieldKind::HotWaterEfficiencyMethod,
        FieldKind::HotWaterYear,
        FieldKind::HotWaterEnergyFactor,
        FieldKind::SolarCapacityKnown,
        FieldKind::SolarSystemCapacity,
        FieldKind::SolarNumPanels,
        FieldKind::SolarYear,
        FieldKind::SolarArrayAzimuth,
        FieldKind::SolarArrayTilt,
    ];

    pub fn spec(self) -> FieldSpec {
        use FieldKind::*;
        use Group as G;
        use ValueType::{Boolean, Integer, Number, String};
        match self {
            AssessmentDate => spec(G::About, "assessment_date", "assessment_date", String),
            ZipCode => FieldSpec {
                type_message: Some("zip_code must be a string of 5 digits"),
                ..spec(G::About, "zip_code", "zip_code", String)
            },
            YearBuilt => spec(G::About, "year_built", "year_built", Integer),
            NumberBedrooms => spec(G::About, "number_bedrooms", "number_bedrooms", Integer),
            NumFloorAboveGrade => spec(G::About, "num_floor_above_grade", "num_floor_above_grade", Integer),
            FloorToCeilingHeight => spec(G::About, "floor_to_ceiling_height", "floor_to_ceiling_height", Integer),
            ConditionedFloorArea => spec(G::About, "conditioned_floor_area", "conditioned_floor_area", Number),
            Orientation => spec(G::About, "orientation", "orientation", String),
            Shape => spec(G::About, "shape", "shape", String),
            TownHouseWalls => spec(G::About, "town_house_walls", "town_house_walls", String),
            BlowerDoorTest => spec(G::About, "blower_door_test", "blower_door_test", Boolean),
            AirSealingPresent => spec(G::About, "air_sealing_present", "air_sealing_present", Boolean),
            EnvelopeLeakage => spec(G::About, "envelope_leakage", "envelope_leakage", Number),

            RoofArea => spec(G::Roof, "roof_area", "roof_area", Number),
            RoofAssemblyCode => spec(G::Roof, "roof_assembly_code", "roof_assembly_code", String),
            RoofColor => spec(G::Roof, "roof_color", "roof_color", String),
            RoofAbsorptance => spec(G::Roof, "roof_absorptance", "roof_absorptance", Number),
            RoofType => spec(G::Roof, "roof_type", "roof_type", String),
            CeilingArea => spec(G::Roof, "ceiling_area", "ceiling_area", Number),
            CeilingAssemblyCode => spec(G::Roof, "ceiling_assembly_code", "ceiling_assembly_code", String),
            SkylightArea => spec(G::Skylight, "skylight_area", "skylight_area", Number),
            SkylightMethod => spec(G::Skylight, "skylight_method", "skylight_method", String),
            SkylightCode => spec(G::Skylight, "skylight_code", "skylight_code", String),
            SkylightUValue => spec(G::Skylight, "skylight_u_value", "skylight_u_value", Number),
            SkylightShgc => spec(G::Skylight, "skylight_shgc", "skylight_shgc", Number),
            KneeWallArea => spec(G::KneeWall, "knee_wall_area", "knee_wall_area", Number),
            KneeWallAssemblyCode => spec(G::KneeWall, "knee_wall_assembly_code", "knee_wall_assembly_code", String),

            FloorArea => spec(G::Floor, "floor_area", "floor_area", Number),
            FoundationType => spec(G::Floor, "foundation_type", "foundation_type", String),
            FoundationInsulationLevel => spec(
                G::Floor,
                "foundation_insulation_level",
                "foundation_insulation_level",
                Integer,
            ),
            FloorAssemblyCode => spec(G::Floor, "floor_assembly_code", "floor_assembly_code", String),

            FieldKind::WallSide => FieldSpec { flat: None, ..spec(G::Wall, "side", "side", String) },
            WallAssemblyCode => spec(G::Wall, "wall_assembly_code", "wall_assembly_code", String),
            WindowArea => spec(G::Window, "window_area", "window_area", Number),
            WindowMethod => spec(G::Window, "window_method", "window_method", String),
            WindowCode => spec(G::Window, "window_code", "window_code", String),
            WindowUValue => spec(G::Window, "window_u_value", "window_u_value", Number),
            WindowShgc => spec(G::Window, "window_shgc", "window_shgc", Number),
            SolarScreen => spec(G::Window, "solar_screen", "window_solar_screen", Boolean),

            HvacFraction => spec(G::Hvac, "hvac_fraction", "hvac_fraction", Number),
            HeatingFuel => spec(G::Heating, "fuel_primary", "heating_fuel", String),
            HeatingType => spec(G::Heating, "type", "heating_type", String),
            HeatingEfficiencyMethod => spec(G::Heating, "efficiency_method", "heating_efficiency_method", String),
            HeatingYear => spec(G::Heating, "year", "heating_year", Integer),
            HeatingEfficiency => spec(G::Heating, "efficiency", "heating_efficiency", Number),
            CoolingType => spec(G::Cooling, "type", "cooling_type", String),
            CoolingEfficiencyMethod => spec(G::Cooling, "efficiency_method", "cooling_efficiency_method", String),
            CoolingYear => spec(G::Cooling, "year", "cooling_year", Integer),
            CoolingEfficiency => spec(G::Cooling, "efficiency", "cooling_efficiency", Number),
            DuctLocation => spec(G::Duct, "location", "duct_location", String),
            DuctFraction => spec(G::Duct, "fraction", "duct_fraction", Integer),
            DuctInsulated => spec(G::Duct, "insulated", "duct_insulated", Boolean),
            DuctSealed => spec(G::Duct, "sealed", "duct_sealed", Boolean),

            HotWaterCategory => spec(G::HotWater, "category", "hot_water_category", String),
            HotWaterType => spec(G::HotWater, "type", "hot_water_type", String),
            HotWaterFuel => spec(G::HotWater, "fuel_primary", "hot_water_fuel", String),
            HotWaterEfficiencyMethod => spec(G::HotWater, "efficiency_method", "hot_water_efficiency_method", String),
            HotWaterYear => spec(G::HotWater, "year", "hot_water_year", Integer),
            HotWaterEnergyFactor => spec(G::HotWater, "energy_factor", "hot_water_energy_factor", Number),

            SolarCapacityKnown => spec(G::Solar, "capacity_known", "solar_electric_capacity_known", Boolean),
            SolarSystemCapacity => spec(G::Solar, "system_capacity", "solar_electric_system_capacity", Number),
            SolarNumPanels => spec(G::Solar, "num_panels", "solar_electric_num_panels", Integer),
            SolarYear => spec(G::Solar, "year", "solar_electric_year", Integer),
            SolarArrayAzimuth => spec(G::Solar, "array_azimuth", "solar_electric_array_azimuth", String),
            SolarArrayTilt => spec(G::Solar, "array_tilt", "solar_electric_array_tilt", String),
        }
    }

    pub fn group(self) -> Group {
        self.spec().group
    }

    pub fn slot_kind(self) -> SlotKind {
        self.group().slot_kind()
    }

    /// Kinds belonging to one nested group, in declaration order
    pub fn in_group(group: Group) -> impl Iterator<Item = FieldKind> {
        Self::ALL.iter().copied().filter(move |kind| kind.group() == group)
    }
}

/// A fully addressed field: kind plus its entity slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    pub kind: FieldKind,
    pub slot: Slot,
}

impl FieldId {
    /// Pair a field kind with the slot of its entity
    ///
    /// # Panics
    /// Panics when the slot does not match the entity the kind belongs to, or
    /// when a wall position is outside `0..MAX_WALLS`. Both are caller bugs.
    pub fn new(kind: FieldKind, slot: Slot) -> Self {
        assert_eq!(
            kind.slot_kind(),
            slot.kind(),
            "field {:?} addressed with slot {:?}",
            kind,
            slot
        );
        if let Slot::Wall(position) = slot {
            assert!(position < MAX_WALLS, "wall position {} outside 0..{}", position, MAX_WALLS);
        }
        Self { kind, slot }
    }

    pub fn building(kind: FieldKind) -> Self {
        Self::new(kind, Slot::Building)
    }

    pub fn roof(kind: FieldKind, zone: ZoneIndex) -> Self {
        Self::new(kind, Slot::Roof(zone))
    }

    pub fn floor(kind: FieldKind, zone: ZoneIndex) -> Self {
        Self::new(kind, Slot::Floor(zone))
    }

    pub fn wall(kind: FieldKind, position: usize) -> Self {
        Self::new(kind, Slot::Wall(position))
    }

    pub fn hvac(kind: FieldKind, system: SystemIndex) -> Self {
        Self::new(kind, Slot::Hvac(system))
    }

    pub fn duct(kind: FieldKind, system: SystemIndex, duct: DuctIndex) -> Self {
        Self::new(kind, Slot::Duct(system, duct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_indices() {
        assert_eq!(DuctIndex::from_number(3), Some(DuctIndex::Third));
        assert_eq!(DuctIndex::from_number(4), None);
        assert_eq!(DuctIndex::from_number(0), None);
        assert_eq!(SystemIndex::Second.number(), 2);
        assert_eq!(ZoneIndex::nth(1), ZoneIndex::Second);
    }

    #[test]
    #[should_panic(expected = "duct position 3 outside 0..3")]
    fn test_out_of_domain_duct_index_panics() {
        let _ = DuctIndex::nth(3);
    }

    #[test]
    #[should_panic(expected = "addressed with slot")]
    fn test_mismatched_slot_panics() {
        let _ = FieldId::new(FieldKind::DuctFraction, Slot::Roof(ZoneIndex::First));
    }

    #[test]
    #[should_panic(expected = "wall position 4")]
    fn test_wall_position_out_of_domain_panics() {
        let _ = FieldId::wall(FieldKind::WindowArea, 4);
    }

    #[test]
    fn test_every_kind_has_a_spec() {
        for kind in FieldKind::ALL {
            let spec = kind.spec();
            assert!(!spec.nested.is_empty());
            assert_eq!(spec.group, kind.group());
        }
        assert!(FieldKind::WallSide.spec().flat.is_none());
    }

    #[test]
    fn test_wall_side_parse() {
        assert_eq!(WallSide::parse("left"), Some(WallSide::Left));
        assert_eq!(WallSide::parse("top"), None);
        assert!(WallSide::Back.is_front_back());
        assert!(!WallSide::Right.is_front_back());
    }
}

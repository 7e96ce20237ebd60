//! Static constant tables
//!
//! Enumerations, fuel/type compatibility maps and assembly-code families
//! accepted by the scoring system. These are the only process-wide values in
//! the crate and are never mutated.

// ========================================
// Building
// ========================================

pub const ORIENTATIONS: &[&str] = &[
    "north",
    "north_east",
    "east",
    "south_east",
    "south",
    "south_west",
    "west",
    "north_west",
];

pub const SHAPES: &[&str] = &["rectangle", "town_house"];

pub const TOWN_HOUSE_WALLS: &[&str] = &[
    "stand_alone",
    "back_front",
    "back_right_front",
    "back_front_left",
];

/// Earliest accepted assessment date (ISO 8601)
pub const MIN_ASSESSMENT_DATE: &str = "2010-01-01";

pub const MIN_YEAR_BUILT: i64 = 1600;

// ========================================
// Envelope
// ========================================

pub const ROOF_COLORS: &[&str] = &["white", "light", "medium", "medium_dark", "dark", "cool_color"];

pub const ROOF_TYPES: &[&str] = &["vented_attic", "cath_ceiling"];

pub const GLAZING_METHODS: &[&str] = &["code", "custom"];

pub const WINDOW_CODES: &[&str] = &[
    "scna", "scnw", "stna", "stnw", "dcaa", "dcab", "dcaw", "dtaa", "dtab", "dtaw", "dpeaw",
    "dpeaab", "dpeaaw", "dseaa", "dseab", "dseaw", "dseaaw", "thmabw",
];

pub const FOUNDATION_TYPES: &[&str] = &[
    "slab_on_grade",
    "uncond_basement",
    "cond_basement",
    "vented_crawl",
    "unvented_crawl",
];

/// Foundations whose floor assembly separates conditioned space from an
/// unconditioned one below
pub const FRAMED_FLOOR_FOUNDATIONS: &[&str] = &["uncond_basement", "vented_crawl", "unvented_crawl"];

pub const SLAB_INSULATION_LEVELS: &[i64] = &[0, 5];

pub const BASEMENT_INSULATION_LEVELS: &[i64] = &[0, 11, 19];

pub const WALL_SIDES: &[&str] = &["front", "back", "right", "left"];

/// Standard door/opening deduction applied to front/back wall area (sq.ft.)
pub const DOOR_AREA: f64 = 20.0;

/// Absolute minimum conditioned footprint (sq.ft.)
pub const MIN_FOOTPRINT: i64 = 250;

pub const MAX_SKYLIGHT_AREA: f64 = 300.0;

pub const MAX_WINDOW_AREA: f64 = 999.0;

// ========================================
// Systems
// ========================================

pub const HEATING_FUELS: &[&str] = &[
    "natural_gas",
    "lpg",
    "fuel_oil",
    "electric",
    "cord_wood",
    "pellet_wood",
];

pub const HEATING_TYPES: &[&str] = &[
    "heat_pump",
    "central_furnace",
    "wall_furnace",
    "boiler",
    "gchp",
    "mini_split",
    "baseboard",
    "wood_stove",
    "none",
];

pub const COOLING_TYPES: &[&str] = &[
    "split_dx",
    "packaged_dx",
    "heat_pump",
    "gchp",
    "dec",
    "mini_split",
    "none",
];

pub const EFFICIENCY_METHODS: &[&str] = &["user", "shipment_weighted"];

/// Earliest installation year accepted per equipment class
pub const MIN_HEATING_YEAR: i64 = 1970;
pub const MIN_COOLING_YEAR: i64 = 1970;
pub const MIN_HOT_WATER_YEAR: i64 = 1972;
pub const MIN_SOLAR_YEAR: i64 = 2000;

/// Heating types allowed for each heating fuel
pub const HEATING_FUEL_TYPES: &[(&str, &[&str])] = &[
    ("natural_gas", &["central_furnace", "wall_furnace", "boiler"]),
    ("lpg", &["central_furnace", "wall_furnace", "boiler"]),
    ("fuel_oil", &["central_furnace", "wall_furnace", "boiler"]),
    (
        "electric",
        &["central_furnace", "heat_pump", "mini_split", "gchp", "baseboard", "boiler"],
    ),
    ("cord_wood", &["wood_stove"]),
    ("pellet_wood", &["wood_stove"]),
];

/// Heating types that never take an efficiency method
pub const HEATING_TYPES_WITHOUT_METHOD: &[&str] = &["baseboard", "wood_stove", "none"];

/// Cooling types that never take an efficiency method
pub const COOLING_TYPES_WITHOUT_METHOD: &[&str] = &["none", "dec"];

/// Equipment types whose efficiency must be entered by the user
pub const USER_METHOD_ONLY_TYPES: &[&str] = &["mini_split", "gchp"];

pub const DUCTED_HEATING_TYPES: &[&str] = &["central_furnace", "heat_pump", "gchp"];

pub const DUCTED_COOLING_TYPES: &[&str] = &["split_dx", "packaged_dx", "heat_pump", "gchp"];

pub const DUCT_LOCATIONS: &[&str] = &[
    "cond_space",
    "uncond_basement",
    "vented_crawl",
    "unvented_crawl",
    "uncond_attic",
];

/// Duct locations that need a matching floor zone foundation
pub const FOUNDATION_DUCT_LOCATIONS: &[&str] = &["uncond_basement", "vented_crawl", "unvented_crawl"];

pub const HOT_WATER_CATEGORIES: &[&str] = &["unit", "combined"];

pub const HOT_WATER_TYPES: &[&str] = &["storage", "indirect", "tankless_coil", "heat_pump", "tankless"];

/// Hot water types fed by a space-heating boiler (no fuel of their own)
pub const BOILER_FED_HOT_WATER_TYPES: &[&str] = &["indirect", "tankless_coil"];

pub const HOT_WATER_FUELS: &[&str] = &["natural_gas", "lpg", "fuel_oil", "electric"];

/// Hot water types that may not use shipment-weighted efficiency
pub const HOT_WATER_USER_ONLY_TYPES: &[&str] = &["heat_pump", "tankless", "tankless_coil"];

pub const ARRAY_TILTS: &[&str] = &["flat", "low_slope", "medium_slope", "steep_slope"];

/// Inclusive rating range for an equipment type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingRange {
    pub metric: &'static str,
    pub min: f64,
    pub max: f64,
}

const AFUE: RatingRange = RatingRange { metric: "AFUE", min: 0.6, max: 1.0 };
const HSPF: RatingRange = RatingRange { metric: "HSPF", min: 6.0, max: 20.0 };
const COP: RatingRange = RatingRange { metric: "COP", min: 2.0, max: 5.0 };
const SEER: RatingRange = RatingRange { metric: "SEER", min: 8.0, max: 40.0 };
const EER: RatingRange = RatingRange { metric: "EER", min: 5.0, max: 40.0 };

pub fn heating_rating(heating_type: &str) -> Option<RatingRange> {
    match heating_type {
        "central_furnace" | "wall_furnace" | "boiler" => Some(AFUE),
        "heat_pump" | "mini_split" => Some(HSPF),
        "gchp" => Some(COP),
        _ => None,
    }
}

pub fn cooling_rating(cooling_type: &str) -> Option<RatingRange> {
    match cooling_type {
        "split_dx" | "packaged_dx" | "heat_pump" | "mini_split" => Some(SEER),
        "gchp" => Some(EER),
        _ => None,
    }
}

pub fn energy_factor_range(hot_water_type: &str) -> Option<RatingRange> {
    let (min, max) = match hot_water_type {
        "storage" => (0.45, 0.95),
        "tankless" => (0.45, 0.99),
        "heat_pump" => (1.0, 4.0),
        _ => return None,
    };
    Some(RatingRange { metric: "energy factor", min, max })
}

/// Heating types compatible with a heating fuel; `None` for unknown fuels
pub fn heating_types_for_fuel(fuel: &str) -> Option<&'static [&'static str]> {
    HEATING_FUEL_TYPES
        .iter()
        .find(|(f, _)| *f == fuel)
        .map(|(_, types)| *types)
}

/// Sides declared exterior by a `town_house_walls` value
pub fn exterior_sides(town_house_walls: &str) -> &'static [&'static str] {
    match town_house_walls {
        "stand_alone" => &["front", "back", "right", "left"],
        "back_front" => &["back", "front"],
        "back_right_front" => &["back", "right", "front"],
        "back_front_left" => &["back", "front", "left"],
        _ => &[],
    }
}

// ========================================
// Assembly codes
// ========================================

/// An assembly-code family: `prefix + construction + R-value [+ finish]`,
/// e.g. `ewwf13vi` is a wood-frame wall with R-13 insulation and vinyl siding.
#[derive(Debug)]
pub struct AssemblyCodeFamily {
    pub name: &'static str,
    pub prefix: &'static str,
    pub constructions: &'static [&'static str],
    pub r_values: &'static [&'static str],
    pub finishes: &'static [&'static str],
}

impl AssemblyCodeFamily {
    /// True when `code` is a member of this family
    pub fn accepts(&self, code: &str) -> bool {
        let Some(rest) = code.strip_prefix(self.prefix) else {
            return false;
        };
        if !rest.is_ascii() || rest.len() < 4 {
            return false;
        }
        let (construction, rest) = rest.split_at(2);
        let (r_value, finish) = rest.split_at(2);
        let finish_ok = if self.finishes.is_empty() {
            finish.is_empty()
        } else {
            self.finishes.contains(&finish)
        };
        self.constructions.contains(&construction) && self.r_values.contains(&r_value) && finish_ok
    }

    /// Length shared by every code in the family
    pub fn code_len(&self) -> usize {
        self.prefix.len() + 4 + if self.finishes.is_empty() { 0 } else { 2 }
    }
}

pub const ROOF_CODES: AssemblyCodeFamily = AssemblyCodeFamily {
    name: "roof",
    prefix: "rf",
    constructions: &["wf", "ps", "rb"],
    r_values: &["00", "03", "07", "11", "13", "15", "19", "21", "27", "30"],
    finishes: &["co", "wo", "rc", "lc", "tg"],
};

pub const CEILING_CODES: AssemblyCodeFamily = AssemblyCodeFamily {
    name: "ceiling",
    prefix: "ec",
    constructions: &["wf"],
    r_values: &["00", "03", "06", "09", "11", "19", "21", "25", "30", "38", "44", "49", "60"],
    finishes: &[],
};

pub const FLOOR_CODES: AssemblyCodeFamily = AssemblyCodeFamily {
    name: "floor",
    prefix: "ef",
    constructions: &["wf"],
    r_values: &["00", "11", "13", "15", "19", "21", "25", "30", "38"],
    finishes: &["ca"],
};

pub const WALL_CODES: AssemblyCodeFamily = AssemblyCodeFamily {
    name: "wall",
    prefix: "ew",
    constructions: &["wf", "ps", "ov", "wb", "bb", "cb", "sb"],
    r_values: &["00", "03", "07", "11", "13", "15", "19", "21"],
    finishes: &["wo", "st", "vi", "al", "br", "nn"],
};

pub const KNEE_WALL_CODES: AssemblyCodeFamily = AssemblyCodeFamily {
    name: "knee wall",
    prefix: "kw",
    constructions: &["wf"],
    r_values: &["00", "03", "07", "11", "13", "15", "19", "21", "27", "30"],
    finishes: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembly_code_families() {
        assert!(WALL_CODES.accepts("ewwf13vi"));
        assert!(!WALL_CODES.accepts("ewwf14vi"));
        assert!(!WALL_CODES.accepts("ewwf13"));
        assert!(CEILING_CODES.accepts("ecwf49"));
        assert!(!CEILING_CODES.accepts("ecwf49xx"));
        assert!(ROOF_CODES.accepts("rfwf00co"));
        assert!(FLOOR_CODES.accepts("efwf19ca"));
        assert!(KNEE_WALL_CODES.accepts("kwwf13"));
        assert!(!KNEE_WALL_CODES.accepts("kw"));
        assert_eq!(WALL_CODES.code_len(), 8);
        assert_eq!(CEILING_CODES.code_len(), 6);
    }

    #[test]
    fn test_fuel_type_allow_list() {
        assert_eq!(heating_types_for_fuel("cord_wood"), Some(&["wood_stove"][..]));
        assert!(heating_types_for_fuel("electric").unwrap().contains(&"baseboard"));
        assert!(heating_types_for_fuel("coal").is_none());
    }

    #[test]
    fn test_exterior_sides() {
        assert_eq!(exterior_sides("back_front"), &["back", "front"]);
        assert_eq!(exterior_sides("stand_alone").len(), 4);
        assert!(exterior_sides("bogus").is_empty());
    }
}

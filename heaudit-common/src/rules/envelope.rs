//! Envelope rules: roof zones, skylights, knee walls, floors, walls, windows

use super::registry::Registry;
use super::{assembly_code, not_applicable, outside, RuleContext};
use crate::checks::{check_bool, check_enum, check_float, check_int, fmt_number, Interval};
use crate::derive;
use crate::field::{FieldId, FieldKind as K, Slot, WallSide};
use crate::record::FieldValue;
use crate::result::ValidationResult;
use crate::tables::{
    exterior_sides, BASEMENT_INSULATION_LEVELS, CEILING_CODES, FLOOR_CODES, FOUNDATION_TYPES, GLAZING_METHODS,
    KNEE_WALL_CODES, MAX_SKYLIGHT_AREA, MAX_WINDOW_AREA, ROOF_CODES, ROOF_COLORS, ROOF_TYPES,
    SLAB_INSULATION_LEVELS, TOWN_HOUSE_WALLS, WALL_CODES, WALL_SIDES, WINDOW_CODES,
};

/// Coverage threshold and conditioned range, as fractions of the reference area
const COVERAGE_RATIO: f64 = 0.95;
const MAX_FOOTPRINT_RATIO: f64 = 2.5;
const KNEE_WALL_RATIO: f64 = 2.0 / 3.0;

pub fn register(r: &mut Registry) {
    // Roof zone
    r.add(K::RoofArea, "area_bounds", |ctx, _, v| area_bounds(ctx, v))
        .gate(K::RoofArea, "roof_covers_floor", |ctx, id, _| roof_covers_floor(ctx, id))
        .add(K::RoofArea, "conditioned_range", |ctx, id, _| conditioned_range(ctx, id));
    r.add(K::RoofAssemblyCode, "assembly_code", |_, _, v| assembly_code(v, &ROOF_CODES));
    r.add(K::RoofColor, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, ROOF_COLORS)));
    r.add(K::RoofAbsorptance, "range", |_, _, v| {
        ValidationResult::blocker_if(check_float(v, 0.0, 1.0, Interval::Closed))
    })
    .add(K::RoofAbsorptance, "cool_color_only", |ctx, id, _| {
        match ctx.sibling(id, K::RoofColor).text() {
            Some(color) if color != "cool_color" => {
                not_applicable("roof_absorptance", format!("roof_color is {}", color))
            }
            _ => ValidationResult::pass(),
        }
    });
    r.add(K::RoofType, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, ROOF_TYPES)));
    r.add(K::CeilingArea, "area_bounds", |ctx, _, v| area_bounds(ctx, v))
        .add(K::CeilingArea, "attic_only", |ctx, id, _| attic_only(ctx, id, "ceiling_area"))
        .gate(K::CeilingArea, "roof_covers_floor", |ctx, id, _| roof_covers_floor(ctx, id))
        .add(K::CeilingArea, "conditioned_range", |ctx, id, _| conditioned_range(ctx, id));
    r.add(K::CeilingAssemblyCode, "assembly_code", |_, _, v| assembly_code(v, &CEILING_CODES))
        .add(K::CeilingAssemblyCode, "attic_only", |ctx, id, _| {
            attic_only(ctx, id, "ceiling_assembly_code")
        });

    // Skylight
    r.add(K::SkylightArea, "range", |_, _, v| {
        ValidationResult::blocker_if(check_float(v, 0.0, MAX_SKYLIGHT_AREA, Interval::Closed))
    })
    .add(K::SkylightArea, "within_footprint", |ctx, _, v| {
        match derive::footprint_area(ctx.record) {
            Some(footprint) => {
                ValidationResult::blocker_if(check_float(v, 0.0, footprint as f64, Interval::Closed))
            }
            None => ValidationResult::pass(),
        }
    })
    .add(K::SkylightArea, "combined_within_footprint", |ctx, _, _| {
        let combined = derive::combined_skylight_area(ctx.record);
        match derive::footprint_area(ctx.record) {
            Some(footprint) if combined > footprint => ValidationResult::error(format!(
                "Combined skylight area {} exceeds the footprint ({})",
                combined, footprint
            )),
            _ => ValidationResult::pass(),
        }
    });
    r.add(K::SkylightMethod, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, GLAZING_METHODS)));
    r.add(K::SkylightCode, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, WINDOW_CODES)))
        .add(K::SkylightCode, "method", |ctx, id, _| {
            glazing_method(ctx.sibling(id, K::SkylightMethod), "skylight_code", "code")
        });
    r.add(K::SkylightUValue, "range", |_, _, v| {
        ValidationResult::blocker_if(check_float(v, 0.01, 5.0, Interval::Closed))
    })
    .add(K::SkylightUValue, "method", |ctx, id, _| {
        glazing_method(ctx.sibling(id, K::SkylightMethod), "skylight_u_value", "custom")
    });
    r.add(K::SkylightShgc, "range", |_, _, v| ValidationResult::blocker_if(check_float(v, 0.0, 1.0, Interval::Open)))
        .add(K::SkylightShgc, "method", |ctx, id, _| {
            glazing_method(ctx.sibling(id, K::SkylightMethod), "skylight_shgc", "custom")
        });

    // Knee wall
    r.add(K::KneeWallArea, "range", |_, _, v| {
        ValidationResult::blocker_if(check_float(v, 0.0, 25000.0, Interval::Closed))
    })
    .add(K::KneeWallArea, "attic_only", |ctx, id, _| attic_only(ctx, id, "knee_wall_area"))
    .add(K::KneeWallArea, "combined_within_footprint", |ctx, _, _| {
        let combined = derive::combined_knee_wall_area(ctx.record);
        match derive::footprint_area(ctx.record) {
            Some(footprint) if combined as f64 > KNEE_WALL_RATIO * footprint as f64 => {
                ValidationResult::error(format!(
                    "Combined knee wall area {} exceeds two thirds of the footprint ({})",
                    combined,
                    fmt_number((KNEE_WALL_RATIO * footprint as f64).floor())
                ))
            }
            _ => ValidationResult::pass(),
        }
    });
    r.add(K::KneeWallAssemblyCode, "assembly_code", |_, _, v| assembly_code(v, &KNEE_WALL_CODES))
        .add(K::KneeWallAssemblyCode, "attic_only", |ctx, id, _| {
            attic_only(ctx, id, "knee_wall_assembly_code")
        });

    // Floor zone
    r.add(K::FloorArea, "area_bounds", |ctx, _, v| area_bounds(ctx, v))
        .gate(K::FloorArea, "roof_covers_floor", |ctx, id, _| roof_covers_floor(ctx, id))
        .add(K::FloorArea, "conditioned_range", |ctx, id, _| conditioned_range(ctx, id));
    r.add(K::FoundationType, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, FOUNDATION_TYPES)));
    r.add(K::FoundationInsulationLevel, "range", |_, _, v| ValidationResult::blocker_if(check_int(v, 0, 19)))
        .add(K::FoundationInsulationLevel, "level_for_foundation", |ctx, id, v| {
            insulation_level(ctx.sibling(id, K::FoundationType), v)
        });
    r.add(K::FloorAssemblyCode, "assembly_code", |_, _, v| assembly_code(v, &FLOOR_CODES))
        .add(K::FloorAssemblyCode, "framed_floor_only", |ctx, id, _| {
            match ctx.sibling(id, K::FoundationType).text() {
                Some(f @ ("cond_basement" | "slab_on_grade")) => {
                    not_applicable("floor_assembly_code", format!("foundation_type is {}", f))
                }
                _ => ValidationResult::pass(),
            }
        });

    // Wall zone
    r.add(K::WallSide, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, WALL_SIDES)))
        .add(K::WallSide, "unique", |ctx, id, v| duplicate_side(ctx, id, v));
    r.add(K::WallAssemblyCode, "assembly_code", |_, _, v| assembly_code(v, &WALL_CODES))
        .add(K::WallAssemblyCode, "exterior_wall", interior_wall);

    // Window
    r.add(K::WindowArea, "range", |_, _, v| {
        ValidationResult::blocker_if(check_float(v, 0.0, MAX_WINDOW_AREA, Interval::Closed))
    })
    .add(K::WindowArea, "exterior_wall", interior_wall)
    .add(K::WindowArea, "within_wall", window_within_wall);
    r.add(K::WindowMethod, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, GLAZING_METHODS)))
        .add(K::WindowMethod, "exterior_wall", interior_wall);
    r.add(K::WindowCode, "enum", |_, _, v| ValidationResult::blocker_if(check_enum(v, WINDOW_CODES)))
        .add(K::WindowCode, "exterior_wall", interior_wall)
        .add(K::WindowCode, "method", |ctx, id, _| {
            glazing_method(ctx.sibling(id, K::WindowMethod), "window_code", "code")
        });
    r.add(K::WindowUValue, "range", |_, _, v| {
        ValidationResult::blocker_if(check_float(v, 0.01, 5.0, Interval::Closed))
    })
    .add(K::WindowUValue, "exterior_wall", interior_wall)
    .add(K::WindowUValue, "method", |ctx, id, _| {
        glazing_method(ctx.sibling(id, K::WindowMethod), "window_u_value", "custom")
    });
    r.add(K::WindowShgc, "range", |_, _, v| ValidationResult::blocker_if(check_float(v, 0.0, 1.0, Interval::Open)))
        .add(K::WindowShgc, "exterior_wall", interior_wall)
        .add(K::WindowShgc, "method", |ctx, id, _| {
            glazing_method(ctx.sibling(id, K::WindowMethod), "window_shgc", "custom")
        });
    r.add(K::SolarScreen, "bool", |_, _, v| ValidationResult::blocker_if(check_bool(v)))
        .add(K::SolarScreen, "exterior_wall", interior_wall);
}

/// Roof, ceiling and floor areas use the configured bound set
fn area_bounds(ctx: &RuleContext<'_>, value: &FieldValue) -> ValidationResult {
    let (min, max, interval) = ctx.area_bounds.range();
    ValidationResult::blocker_if(check_float(value, min, max, interval))
}

/// Whether an area field takes part in the coverage and range checks
fn participates(ctx: &RuleContext<'_>, id: FieldId) -> bool {
    match id.kind {
        K::RoofArea => ctx.sibling(id, K::RoofType).is("cath_ceiling"),
        K::CeilingArea => ctx.sibling(id, K::RoofType).is("vented_attic"),
        K::FloorArea => true,
        _ => false,
    }
}

fn roof_covers_floor(ctx: &RuleContext<'_>, id: FieldId) -> ValidationResult {
    if !participates(ctx, id) {
        return ValidationResult::pass();
    }
    let roof = derive::combined_roof_ceiling_area(ctx.record);
    let floor = derive::combined_floor_area(ctx.record);
    if roof as f64 <= COVERAGE_RATIO * floor as f64 {
        ValidationResult::error(format!(
            "Combined roof/ceiling area {} is not more than 95% of combined floor area {}: roof does not cover the floor",
            roof, floor
        ))
    } else {
        ValidationResult::pass()
    }
}

fn conditioned_range(ctx: &RuleContext<'_>, id: FieldId) -> ValidationResult {
    if !participates(ctx, id) {
        return ValidationResult::pass();
    }
    let Some(footprint) = derive::footprint_area(ctx.record) else {
        return ValidationResult::pass();
    };
    let (label, area) = if id.kind == K::FloorArea {
        ("floor", derive::combined_floor_area(ctx.record))
    } else {
        ("roof/ceiling", derive::combined_roof_ceiling_area(ctx.record))
    };
    let min = COVERAGE_RATIO * footprint as f64;
    let max = MAX_FOOTPRINT_RATIO * footprint as f64;
    let area = area as f64;
    if area < min || area > max {
        ValidationResult::error(format!(
            "Combined {} area: {} (derived from a footprint of {})",
            label,
            outside(area, min, max),
            footprint
        ))
    } else {
        ValidationResult::pass()
    }
}

/// Ceiling and knee-wall fields describe an attic
fn attic_only(ctx: &RuleContext<'_>, id: FieldId, name: &str) -> ValidationResult {
    match ctx.sibling(id, K::RoofType).text() {
        Some(roof_type) if roof_type != "vented_attic" => {
            not_applicable(name, format!("roof_type is {}", roof_type))
        }
        _ => ValidationResult::pass(),
    }
}

/// Glazing code pairs with method `code`; U-value and SHGC with `custom`
fn glazing_method(method: &FieldValue, name: &str, expected: &str) -> ValidationResult {
    match method.text() {
        Some(m) if m != expected => not_applicable(name, format!("the method is {}", m)),
        _ => ValidationResult::pass(),
    }
}

fn insulation_level(foundation: &FieldValue, value: &FieldValue) -> ValidationResult {
    let (Some(foundation), Some(level)) = (foundation.text(), value.integer()) else {
        return ValidationResult::pass();
    };
    if !FOUNDATION_TYPES.contains(&foundation) {
        return ValidationResult::pass();
    }
    let allowed = if foundation == "slab_on_grade" {
        SLAB_INSULATION_LEVELS
    } else {
        BASEMENT_INSULATION_LEVELS
    };
    if allowed.contains(&level) {
        return ValidationResult::pass();
    }
    let allowed: Vec<String> = allowed.iter().map(i64::to_string).collect();
    ValidationResult::error(format!(
        "{} is not a valid insulation level for {} ({})",
        level,
        foundation,
        allowed.join(", ")
    ))
}

fn duplicate_side(ctx: &RuleContext<'_>, id: FieldId, value: &FieldValue) -> ValidationResult {
    let Slot::Wall(position) = id.slot else {
        return ValidationResult::pass();
    };
    let duplicated = ctx
        .record
        .walls
        .iter()
        .enumerate()
        .any(|(other, wall)| other != position && wall.side.text().is_some() && wall.side.text() == value.text());
    if duplicated {
        ValidationResult::error(format!("Duplicate wall side {}", value.display()))
    } else {
        ValidationResult::pass()
    }
}

/// Side of the wall owning a field
fn wall_side(ctx: &RuleContext<'_>, id: FieldId) -> Option<WallSide> {
    match id.slot {
        Slot::Wall(position) => ctx.record.walls.get(position).and_then(|w| w.wall_side()),
        _ => None,
    }
}

/// Town houses may only describe the exterior walls they declare
fn interior_wall(ctx: &RuleContext<'_>, id: FieldId, value: &FieldValue) -> ValidationResult {
    if !ctx.building(K::Shape).is("town_house") || value.is_zero_like() {
        return ValidationResult::pass();
    }
    let Some(walls) = ctx.building(K::TownHouseWalls).text().filter(|w| TOWN_HOUSE_WALLS.contains(w)) else {
        return ValidationResult::pass();
    };
    let Some(side) = wall_side(ctx, id) else {
        return ValidationResult::pass();
    };
    if exterior_sides(walls).contains(&side.as_str()) {
        ValidationResult::pass()
    } else {
        ValidationResult::error(format!(
            "{} on the {} wall may not be defined for common/interior walls",
            id.kind.spec().nested,
            side
        ))
    }
}

/// Window area must stay below the derived area of its wall: `[-1, wall_area)`
fn window_within_wall(ctx: &RuleContext<'_>, id: FieldId, value: &FieldValue) -> ValidationResult {
    let (Some(side), Some(area)) = (wall_side(ctx, id), value.number()) else {
        return ValidationResult::pass();
    };
    let Some(wall_area) = derive::wall_area(ctx.record, side) else {
        return ValidationResult::pass();
    };
    if Interval::HalfOpen.contains(-1.0, wall_area as f64, area) {
        ValidationResult::pass()
    } else {
        ValidationResult::error(format!(
            "Window area {} must be less than the {} wall area ({})",
            fmt_number(area),
            side,
            wall_area
        ))
    }
}

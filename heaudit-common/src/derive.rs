//! Derived geometry
//!
//! Pure functions of a [`Record`]. `None` means indeterminate: a required
//! input is missing, non-numeric or non-positive. Every area is truncated with
//! `floor`, never rounded.

use crate::field::WallSide;
use crate::record::Record;
use crate::tables::DOOR_AREA;

/// Conditioned area per above-grade story, excluding conditioned basements
pub fn footprint_area(record: &Record) -> Option<i64> {
    let cfa = record.about.conditioned_floor_area.number().filter(|v| *v > 0.0)?;
    let stories = record.about.num_floor_above_grade.number().filter(|v| *v > 0.0)?;
    let basement: f64 = record
        .floors
        .iter()
        .filter(|f| f.foundation_type.is("cond_basement"))
        .filter_map(|f| f.floor_area.number())
        .sum();
    Some(((cfa - basement) / stories).floor() as i64)
}

/// Length of the left and right walls
pub fn left_right_dimension(record: &Record) -> Option<i64> {
    let footprint = footprint_area(record).filter(|fp| *fp > 0)?;
    Some((3.0 * footprint as f64 / 5.0).sqrt().floor() as i64)
}

/// Length of the front and back walls (not truncated); the footprint is
/// assumed to be a 5:3 rectangle
pub fn front_back_dimension(record: &Record) -> Option<f64> {
    left_right_dimension(record).map(|lr| lr as f64 * 5.0 / 3.0)
}

/// Gross wall area of one side of the building
pub fn wall_area(record: &Record, side: WallSide) -> Option<i64> {
    let height = record.about.floor_to_ceiling_height.number()?;
    let stories = record.about.num_floor_above_grade.number()?;
    let area = if side.is_front_back() {
        (front_back_dimension(record)? * height - DOOR_AREA) * stories
    } else {
        left_right_dimension(record)? as f64 * height * stories
    };
    Some(area.floor() as i64)
}

/// Sum of floor areas over every floor zone; missing areas count as zero
pub fn combined_floor_area(record: &Record) -> i64 {
    let sum: f64 = record.floors.iter().filter_map(|f| f.floor_area.number()).sum();
    sum.floor() as i64
}

/// Roof area of cathedral-ceiling zones plus ceiling area of attic zones
pub fn combined_roof_ceiling_area(record: &Record) -> i64 {
    let sum: f64 = record
        .roofs
        .iter()
        .filter_map(|r| {
            if r.roof_type.is("cath_ceiling") {
                r.roof_area.number()
            } else if r.roof_type.is("vented_attic") {
                r.ceiling_area.number()
            } else {
                None
            }
        })
        .sum();
    sum.floor() as i64
}

pub fn combined_skylight_area(record: &Record) -> i64 {
    let sum: f64 = record.roofs.iter().filter_map(|r| r.skylight.area.number()).sum();
    sum.floor() as i64
}

pub fn combined_knee_wall_area(record: &Record) -> i64 {
    let sum: f64 = record.roofs.iter().filter_map(|r| r.knee_wall.area.number()).sum();
    sum.floor() as i64
}

/// Snapshot of every derived quantity, used for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedGeometry {
    pub footprint: Option<i64>,
    pub front_back_wall_area: Option<i64>,
    pub left_right_wall_area: Option<i64>,
    pub combined_roof_ceiling_area: i64,
    pub combined_floor_area: i64,
    pub combined_skylight_area: i64,
    pub combined_knee_wall_area: i64,
}

impl DerivedGeometry {
    pub fn compute(record: &Record) -> Self {
        Self {
            footprint: footprint_area(record),
            front_back_wall_area: wall_area(record, WallSide::Front),
            left_right_wall_area: wall_area(record, WallSide::Left),
            combined_roof_ceiling_area: combined_roof_ceiling_area(record),
            combined_floor_area: combined_floor_area(record),
            combined_skylight_area: combined_skylight_area(record),
            combined_knee_wall_area: combined_knee_wall_area(record),
        }
    }
}

//! Primitive checkers
//!
//! Stateless single-value checks. Each returns `None` when the value passes
//! and a human-readable message otherwise; none of them know about the rest
//! of the record.

use chrono::NaiveDate;

use crate::record::FieldValue;

/// Tolerance applied to fraction and percentage sums
pub const SUM_TOLERANCE: f64 = 1e-10;

/// Which ends of a float range are inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    /// `[min, max]`
    Closed,
    /// `[min, max)`
    HalfOpen,
    /// `(min, max)`
    Open,
}

impl Interval {
    pub fn contains(self, min: f64, max: f64, v: f64) -> bool {
        match self {
            Interval::Closed => min <= v && v <= max,
            Interval::HalfOpen => min <= v && v < max,
            Interval::Open => min < v && v < max,
        }
    }

    fn describe(self, min: f64, max: f64) -> String {
        match self {
            Interval::Closed => format!("{} - {}", fmt_number(min), fmt_number(max)),
            Interval::HalfOpen => format!("{} - {} (exclusive)", fmt_number(min), fmt_number(max)),
            Interval::Open => format!("{} - {} (both exclusive)", fmt_number(min), fmt_number(max)),
        }
    }
}

/// Format a number without a trailing `.0` for whole values
pub fn fmt_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

pub fn check_int(value: &FieldValue, min: i64, max: i64) -> Option<String> {
    let Some(v) = value.integer() else {
        return Some(format!("{} is not an integer", value.display()));
    };
    if !(min..=max).contains(&v) {
        return Some(format!("{} is outside the allowed range ({} - {})", v, min, max));
    }
    None
}

pub fn check_float(value: &FieldValue, min: f64, max: f64, interval: Interval) -> Option<String> {
    let Some(v) = value.number() else {
        return Some(format!("{} is not a number", value.display()));
    };
    if !interval.contains(min, max, v) {
        return Some(format!(
            "{} is outside the allowed range ({})",
            fmt_number(v),
            interval.describe(min, max)
        ));
    }
    None
}

/// Numeric type check without bounds
pub fn check_number(value: &FieldValue) -> Option<String> {
    match value.number() {
        Some(_) => None,
        None => Some(format!("{} is not a number", value.display())),
    }
}

/// Five-digit zip code, optionally followed by `-` and four digits
pub fn check_zip(value: &FieldValue) -> Option<String> {
    let text = value.display();
    let (head, tail) = match text.split_once('-') {
        Some((head, tail)) => (head, Some(tail)),
        None => (text.as_str(), None),
    };
    let digits = |s: &str, n: usize| s.len() == n && s.bytes().all(|b| b.is_ascii_digit());
    if digits(head, 5) && tail.map_or(true, |t| digits(t, 4)) {
        None
    } else {
        Some(format!("{} is not a valid zip code", text))
    }
}

pub fn check_bool(value: &FieldValue) -> Option<String> {
    match value.flag() {
        Some(_) => None,
        None => Some(format!("{} is not a boolean", value.display())),
    }
}

pub fn check_enum(value: &FieldValue, allowed: &[&str]) -> Option<String> {
    match value.text() {
        Some(s) if allowed.contains(&s) => None,
        _ => Some(format!(
            "{} is not one of the allowed values ({})",
            value.display(),
            allowed.join(", ")
        )),
    }
}

pub fn check_string(value: &FieldValue, max_len: usize) -> Option<String> {
    match value.text() {
        Some(s) if s.chars().count() <= max_len => None,
        Some(s) => Some(format!("{} is longer than {} characters", s, max_len)),
        None => Some(format!("{} is not a string", value.display())),
    }
}

/// Non-empty percentages must add up to 100
pub fn check_percent_sum(values: &[f64]) -> Option<String> {
    let sum: f64 = values.iter().sum();
    if (sum - 100.0).abs() > SUM_TOLERANCE {
        Some(format!("Percentages must sum to 100 (currently {})", fmt_number(sum)))
    } else {
        None
    }
}

/// Non-empty fractions must add up to 1
pub fn check_fraction_sum(values: &[f64]) -> Option<String> {
    let sum: f64 = values.iter().sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        Some(format!("Fractions must sum to 1 (currently {})", fmt_number(sum)))
    } else {
        None
    }
}

/// ISO `YYYY-MM-DD` date within `[min, max]`
pub fn check_date(value: &FieldValue, min: NaiveDate, max: NaiveDate) -> Option<String> {
    let text = value.display();
    let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") else {
        return Some(format!("{} is not a valid date (expected YYYY-MM-DD)", text));
    };
    if date < min || date > max {
        return Some(format!("{} is outside the allowed range ({} - {})", date, min, max));
    }
    None
}

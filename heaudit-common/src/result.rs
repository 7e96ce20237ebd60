//! Validation result model and severity aggregation
//!
//! Violations are bucketed by severity, then grouped by field path in the
//! order they were discovered. Flat records keep one message per path and
//! bucket (the last one wins); nested records keep every distinct blocker
//! and error message for a path.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::address::Mode;

/// Consequence class of a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The scoring system cannot accept the value at all
    Blocker,
    /// Individually valid but inconsistent with the rest of the record
    Error,
    /// A required field was not supplied
    Mandatory,
}

/// Outcome of one rule for one field; no message means the rule passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub message: Option<String>,
    pub severity: Severity,
}

impl ValidationResult {
    pub fn pass() -> Self {
        Self { message: None, severity: Severity::Error }
    }

    pub fn blocker(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), severity: Severity::Blocker }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), severity: Severity::Error }
    }

    /// Blocker when a primitive check produced a message, pass otherwise
    pub fn blocker_if(message: Option<String>) -> Self {
        message.map_or_else(Self::pass, Self::blocker)
    }

    /// Error when a check produced a message, pass otherwise
    pub fn error_if(message: Option<String>) -> Self {
        message.map_or_else(Self::pass, Self::error)
    }

    pub fn is_pass(&self) -> bool {
        self.message.is_none()
    }
}

/// One rule firing against one field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self { path: path.into(), message: message.into(), severity }
    }
}

/// Messages for one severity, grouped by path in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    entries: Vec<(String, Vec<String>)>,
}

impl Bucket {
    fn insert(&mut self, path: String, message: String, accumulate: bool) {
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some((_, messages)) if accumulate => {
                if !messages.contains(&message) {
                    messages.push(message);
                }
            }
            Some((_, messages)) => *messages = vec![message],
            None => self.entries.push((path, vec![message])),
        }
    }

    /// All messages recorded for a path
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Most recent message recorded for a path
    pub fn message(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|m| m.last()).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(p, m)| (p.as_str(), m.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Final grouped result of one validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    mode: Mode,
    pub blocker: Bucket,
    pub error: Bucket,
    pub mandatory: Bucket,
}

impl ResultSet {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            blocker: Bucket::default(),
            error: Bucket::default(),
            mandatory: Bucket::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True when no violation of any severity was found
    pub fn is_acceptable(&self) -> bool {
        self.blocker.is_empty() && self.error.is_empty() && self.mandatory.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

struct BucketView<'a> {
    bucket: &'a Bucket,
    as_list: bool,
}

impl Serialize for BucketView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bucket.len()))?;
        for (path, messages) in self.bucket.iter() {
            if self.as_list {
                map.serialize_entry(path, messages)?;
            } else {
                map.serialize_entry(path, messages.last().map(String::as_str).unwrap_or_default())?;
            }
        }
        map.end()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let nested = self.mode == Mode::Nested;
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("blocker", &BucketView { bucket: &self.blocker, as_list: nested })?;
        map.serialize_entry("error", &BucketView { bucket: &self.error, as_list: nested })?;
        map.serialize_entry("mandatory", &BucketView { bucket: &self.mandatory, as_list: false })?;
        map.end()
    }
}

/// Collects violations into a [`ResultSet`]
#[derive(Debug)]
pub struct SeverityAggregator {
    result: ResultSet,
}

impl SeverityAggregator {
    pub fn new(mode: Mode) -> Self {
        Self { result: ResultSet::new(mode) }
    }

    pub fn record(&mut self, violation: Violation) {
        let accumulate = self.result.mode == Mode::Nested && violation.severity != Severity::Mandatory;
        let bucket = match violation.severity {
            Severity::Blocker => &mut self.result.blocker,
            Severity::Error => &mut self.result.error,
            Severity::Mandatory => &mut self.result.mandatory,
        };
        bucket.insert(violation.path, violation.message, accumulate);
    }

    pub fn finish(self) -> ResultSet {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_mode_keeps_last_message() {
        let mut agg = SeverityAggregator::new(Mode::Flat);
        agg.record(Violation::new("roof_area_1", "first", Severity::Error));
        agg.record(Violation::new("roof_area_1", "second", Severity::Error));
        let result = agg.finish();
        assert_eq!(result.error.get("roof_area_1").unwrap(), &["second".to_string()]);
        assert_eq!(result.to_json(), json!({"blocker": {}, "error": {"roof_area_1": "second"}, "mandatory": {}}));
    }

    #[test]
    fn test_nested_mode_accumulates_distinct_messages() {
        let mut agg = SeverityAggregator::new(Mode::Nested);
        let path = "/systems/hvac/0/hvac_distribution/duct/0/fraction";
        agg.record(Violation::new(path, "a", Severity::Blocker));
        agg.record(Violation::new(path, "b", Severity::Blocker));
        agg.record(Violation::new(path, "a", Severity::Blocker));
        agg.record(Violation::new("/about/year_built", "required", Severity::Mandatory));
        let result = agg.finish();
        assert_eq!(result.blocker.get(path).unwrap().len(), 2);
        assert_eq!(
            result.to_json(),
            json!({
                "blocker": {path: ["a", "b"]},
                "error": {},
                "mandatory": {"/about/year_built": "required"}
            })
        );
    }

    #[test]
    fn test_discovery_order_preserved() {
        let mut agg = SeverityAggregator::new(Mode::Flat);
        for path in ["zeta", "alpha", "mid"] {
            agg.record(Violation::new(path, "x", Severity::Error));
        }
        let result = agg.finish();
        let paths: Vec<&str> = result.error.paths().collect();
        assert_eq!(paths, vec!["zeta", "alpha", "mid"]);
        assert!(!result.is_acceptable());
    }

    #[test]
    fn test_validation_result_helpers() {
        assert!(ValidationResult::blocker_if(None).is_pass());
        assert_eq!(ValidationResult::error_if(Some("x".into())).severity, Severity::Error);
    }
}

//! Cross-validation engine
//!
//! One pass per record: structural violations from the front end, then
//! mandatory omissions, then every non-blank field's rule list. Nothing is
//! retained between calls, so a [`Validator`] can be shared across threads.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::address::{flat, nested, Mode, ParsedRecord, StructuralViolation};
use crate::config::{AreaBounds, ValidatorConfig};
use crate::derive::DerivedGeometry;
use crate::field::FieldId;
use crate::required;
use crate::result::{ResultSet, Severity, SeverityAggregator, Violation};
use crate::rules::{registry, RuleContext};
use crate::Result;

/// Validates audit records against one configuration
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a record, detecting its addressing mode
    pub fn validate(&self, input: &Value) -> ResultSet {
        match Mode::detect(input) {
            Mode::Flat => self.validate_flat(input),
            Mode::Nested => self.validate_nested(input),
        }
    }

    /// Parse JSON text and validate it
    pub fn validate_json(&self, text: &str) -> Result<ResultSet> {
        let input: Value = serde_json::from_str(text)?;
        Ok(self.validate(&input))
    }

    /// Validate a record known to use flat keys
    pub fn validate_flat(&self, input: &Value) -> ResultSet {
        let parsed = match input.as_object() {
            Some(map) => flat::parse(map),
            None => ParsedRecord {
                structural: vec![StructuralViolation {
                    field: None,
                    violation: Violation::new(
                        "/",
                        format!("record must be of type object (found {})", crate::address::schema::json_type_name(input)),
                        Severity::Blocker,
                    ),
                }],
                ..Default::default()
            },
        };
        self.run(Mode::Flat, parsed)
    }

    /// Validate a record known to use the nested tree
    pub fn validate_nested(&self, input: &Value) -> ResultSet {
        self.run(Mode::Nested, nested::parse(input))
    }

    /// Area bound set in effect for both addressing modes
    pub fn area_bounds(&self) -> AreaBounds {
        self.config.area_bounds
    }

    fn run(&self, mode: Mode, parsed: ParsedRecord) -> ResultSet {
        let ParsedRecord { record, structural } = parsed;
        let ctx = RuleContext::new(&record, self.config.clock(), self.area_bounds());
        let mut aggregator = SeverityAggregator::new(mode);
        debug!("Derived geometry: {:?}", DerivedGeometry::compute(&record));

        let mut blocked: BTreeSet<FieldId> = BTreeSet::new();
        for entry in structural {
            if let Some(field) = entry.field {
                blocked.insert(field);
            }
            aggregator.record(entry.violation);
        }

        for id in required::resolve(&record) {
            if record.value(id).is_blank() && !blocked.contains(&id) {
                aggregator.record(Violation::new(
                    mode.path(id),
                    required_message(mode, id),
                    Severity::Mandatory,
                ));
            }
        }

        let fields = record.fields();
        for (id, value) in &fields {
            if value.is_blank() || blocked.contains(id) {
                continue;
            }
            for result in registry::evaluate(&ctx, *id, value) {
                if let Some(message) = result.message {
                    aggregator.record(Violation::new(mode.path(*id), message, result.severity));
                }
            }
        }

        let result = aggregator.finish();
        debug!(
            "Validated {:?} record ({} fields): {} blocker, {} error, {} mandatory",
            mode,
            fields.len(),
            result.blocker.len(),
            result.error.len(),
            result.mandatory.len()
        );
        result
    }
}

fn required_message(mode: Mode, id: FieldId) -> String {
    match mode {
        Mode::Flat => format!("{} is required", mode.path(id)),
        Mode::Nested => format!("'{}' is a required property", id.kind.spec().nested),
    }
}

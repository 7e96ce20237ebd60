//! Rule registry
//!
//! Single source of truth for which checks run against which field kind, and
//! in what order. Built on first use and read-only afterwards.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::RuleContext;
use crate::field::{FieldId, FieldKind};
use crate::record::FieldValue;
use crate::result::{Severity, ValidationResult};

/// Rule body; receives the field being checked and its (non-blank) value
pub type Evaluator = fn(&RuleContext<'_>, FieldId, &FieldValue) -> ValidationResult;

/// What happens to the rest of a field's rule list when a rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFire {
    Continue,
    Stop,
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub evaluate: Evaluator,
    pub on_fire: OnFire,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("on_fire", &self.on_fire)
            .finish()
    }
}

/// Builder handed to the domain modules
#[derive(Default)]
pub struct Registry {
    rules: HashMap<FieldKind, Vec<Rule>>,
}

impl Registry {
    /// Append a rule that lets later rules run when it fires with an error
    pub fn add(&mut self, kind: FieldKind, name: &'static str, evaluate: Evaluator) -> &mut Self {
        self.push(kind, Rule { name, evaluate, on_fire: OnFire::Continue })
    }

    /// Append a rule that ends the field's rule list whenever it fires
    pub fn gate(&mut self, kind: FieldKind, name: &'static str, evaluate: Evaluator) -> &mut Self {
        self.push(kind, Rule { name, evaluate, on_fire: OnFire::Stop })
    }

    fn push(&mut self, kind: FieldKind, rule: Rule) -> &mut Self {
        self.rules.entry(kind).or_default().push(rule);
        self
    }
}

static REGISTRY: Lazy<HashMap<FieldKind, Vec<Rule>>> = Lazy::new(|| {
    let mut registry = Registry::default();
    super::about::register(&mut registry);
    super::envelope::register(&mut registry);
    super::hvac::register(&mut registry);
    super::ducts::register(&mut registry);
    super::hot_water::register(&mut registry);
    super::solar::register(&mut registry);
    registry.rules
});

/// Ordered rules for a field kind
pub fn rules_for(kind: FieldKind) -> &'static [Rule] {
    REGISTRY.get(&kind).map(Vec::as_slice).unwrap_or(&[])
}

/// Run a field's rule list and return every result that fired
///
/// A blocker, or any firing rule declared [`OnFire::Stop`], ends the list.
pub fn evaluate(ctx: &RuleContext<'_>, id: FieldId, value: &FieldValue) -> Vec<ValidationResult> {
    let mut fired = Vec::new();
    for rule in rules_for(id.kind) {
        let result = (rule.evaluate)(ctx, id, value);
        if result.is_pass() {
            continue;
        }
        let stop = result.severity == Severity::Blocker || rule.on_fire == OnFire::Stop;
        fired.push(result);
        if stop {
            break;
        }
    }
    fired
}

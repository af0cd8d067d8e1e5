//! Electrical rule checking.
//!
//! Six independent, side-effect-free checks over a schematic document.
//! Findings are always reported, never thrown: a document full of
//! violations still returns a complete result.

pub mod rules;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::schema::{Position, SchematicDocument};

pub use rules::{
    ConflictingPinTypesRule, DuplicateReferenceRule, MissingNetLabelRule, MissingPowerFlagRule,
    UnconnectedPinRule, UnconnectedWireRule,
};

/// Violation severity. Drives presentation only; a check never blocks
/// another check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// The six built-in rule kinds, plus an escape hatch for rules
/// registered from outside the crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    UnconnectedPin,
    ConflictingPinTypes,
    MissingPowerFlag,
    DuplicateReference,
    UnconnectedWire,
    MissingNetLabel,
    Custom(String),
}

/// A single ERC finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErcViolation {
    pub kind: ViolationKind,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Position>,
    pub object_ids: Vec<String>,
}

/// One electrical rule. Implementations are read-only over the
/// document and independent of each other.
pub trait ErcRule: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    /// The rule's nominal severity; individual violations may differ
    /// (unconnected passive pins downgrade to warning, for example).
    fn severity(&self) -> Severity;
    fn check(&self, document: &SchematicDocument) -> Vec<ErcViolation>;
}

/// Registry of rules, run in registration order.
pub struct ErcEngine {
    rules: Vec<Arc<dyn ErcRule>>,
}

impl ErcEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Arc::new(UnconnectedPinRule));
        engine.add_rule(Arc::new(ConflictingPinTypesRule));
        engine.add_rule(Arc::new(MissingPowerFlagRule));
        engine.add_rule(Arc::new(DuplicateReferenceRule));
        engine.add_rule(Arc::new(UnconnectedWireRule));
        engine.add_rule(Arc::new(MissingNetLabelRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Arc<dyn ErcRule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Arc<dyn ErcRule>] {
        &self.rules
    }

    /// Run every registered rule.
    pub fn check(&self, document: &SchematicDocument) -> Vec<ErcViolation> {
        let mut violations = Vec::new();
        for rule in &self.rules {
            violations.extend(rule.check(document));
        }
        tracing::debug!(
            document = %document.name,
            violations = violations.len(),
            "erc check complete"
        );
        violations
    }

    /// Run only the rules whose id is listed; an empty filter runs all.
    pub fn check_filtered(
        &self,
        document: &SchematicDocument,
        rule_ids: &[String],
    ) -> Vec<ErcViolation> {
        if rule_ids.is_empty() {
            return self.check(document);
        }
        let mut violations = Vec::new();
        for rule in &self.rules {
            if rule_ids.iter().any(|id| id == rule.id()) {
                violations.extend(rule.check(document));
            }
        }
        violations
    }
}

impl Default for ErcEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

//! Register a custom rule alongside the built-in set.
//!
//! The example rule flags components without a footprint assignment,
//! which matters once a netlist is handed to PCB tooling.

use std::sync::Arc;

use netguard::erc::{ErcEngine, ErcRule, ErcViolation, Severity, ViolationKind};
use netguard::schema::{
    ElectricalType, Pin, Position, SchematicComponent, SchematicDocument, Sheet,
};

struct MissingFootprintRule;

impl ErcRule for MissingFootprintRule {
    fn id(&self) -> &str {
        "missing_footprint"
    }

    fn name(&self) -> &str {
        "Missing Footprint Check"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, document: &SchematicDocument) -> Vec<ErcViolation> {
        let mut violations = Vec::new();
        for sheet in &document.sheets {
            for component in &sheet.components {
                if component.footprint.is_none() {
                    violations.push(ErcViolation {
                        kind: ViolationKind::Custom("MissingFootprint".to_string()),
                        severity: Severity::Warning,
                        message: format!("{} has no footprint assigned", component.reference),
                        location: Some(component.position.clone()),
                        object_ids: vec![component.id.clone()],
                    });
                }
            }
        }
        violations
    }
}

fn main() {
    let mut sheet = Sheet::new("top");
    sheet.components.push(
        SchematicComponent::new("R1", "10k", Position::new(0.0, 0.0)).with_pins(vec![
            Pin::new("1", "A", ElectricalType::Passive, Position::new(0.0, 0.0)),
        ]),
    );
    let mut document = SchematicDocument::new("demo");
    document.sheets.push(sheet);

    let mut engine = ErcEngine::with_default_rules();
    engine.add_rule(Arc::new(MissingFootprintRule));

    for violation in engine.check(&document) {
        println!("[{:?}] {}", violation.severity, violation.message);
    }
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use netguard::prelude::*;
use netguard::schema::{
    ElectricalType, NetLabel, Pin, Position, SchematicComponent, SchematicDocument, Sheet, Wire,
};

/// A grid of resistor pairs joined by labelled wires, large enough for
/// the spatial join and the O(n^2) wire grouping to show up.
fn synthesized_document(columns: usize) -> SchematicDocument {
    let mut sheet = Sheet::new("bench");
    for i in 0..columns {
        let x = i as f64 * 50.0;
        sheet.components.push(
            SchematicComponent::new(format!("R{}", i * 2), "10k", Position::new(x, 0.0))
                .with_pins(vec![Pin::new(
                    "1",
                    "A",
                    ElectricalType::Passive,
                    Position::new(0.0, 0.0),
                )]),
        );
        sheet.components.push(
            SchematicComponent::new(format!("R{}", i * 2 + 1), "10k", Position::new(x, 100.0))
                .with_pins(vec![Pin::new(
                    "1",
                    "A",
                    ElectricalType::Passive,
                    Position::new(0.0, 0.0),
                )]),
        );
        sheet.wires.push(Wire::new(vec![
            Position::new(x, 0.0),
            Position::new(x, 100.0),
        ]));
        sheet
            .labels
            .push(NetLabel::new(format!("COL{}", i), Position::new(x, 0.0)));
    }

    let mut doc = SchematicDocument::new("bench");
    doc.sheets.push(sheet);
    doc
}

fn bench_extract_netlist(c: &mut Criterion) {
    let doc = synthesized_document(100);
    c.bench_function("extract_netlist", |b| {
        b.iter(|| NetguardCore::extract_netlist(black_box(&doc)));
    });
}

fn bench_check_document(c: &mut Criterion) {
    let doc = synthesized_document(100);
    let options = ValidationOptions::default();
    c.bench_function("check_document", |b| {
        b.iter(|| NetguardCore::check_document(black_box(&doc), black_box(&options)));
    });
}

criterion_group!(benches, bench_extract_netlist, bench_check_document);
criterion_main!(benches);

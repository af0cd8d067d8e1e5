//! Integration tests for the file-level API.

use netguard::prelude::*;
use netguard::schema::{
    ElectricalType, Pin, Position, SchematicComponent, SchematicDocument, Sheet, Wire,
};
use std::path::Path;

fn sample_document() -> SchematicDocument {
    let mut sheet = Sheet::new("top");
    sheet.components.push(
        SchematicComponent::new("R1", "10k", Position::new(0.0, 0.0)).with_pins(vec![
            Pin::new("1", "A", ElectricalType::Passive, Position::new(0.0, 0.0)),
            Pin::new("2", "B", ElectricalType::Passive, Position::new(10.0, 0.0)),
        ]),
    );
    sheet.wires.push(Wire::new(vec![
        Position::new(0.0, 0.0),
        Position::new(0.0, 40.0),
    ]));

    let mut doc = SchematicDocument::new("sample");
    doc.sheets.push(sheet);
    doc
}

fn write_document(dir: &Path, name: &str, doc: &SchematicDocument) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(doc).unwrap()).unwrap();
    path
}

#[test]
fn check_file_roundtrips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path(), "sample.sch.json", &sample_document());

    let result = NetguardCore::check_file(&path, ValidationOptions::default())
        .expect("document should load");

    assert_eq!(result.file, path);
    // Pin 2 of R1 floats, and the wire's far end dangles.
    assert!(result.stats.warnings > 0);
    assert_eq!(result.stats.errors, 0);
    assert!(!result.has_errors());
    assert_eq!(
        result.total_violations(),
        result.violations.len()
    );
}

#[test]
fn extract_file_returns_netlist() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path(), "sample.sch.json", &sample_document());

    let netlist = NetguardCore::extract_file(&path).expect("document should load");
    assert_eq!(netlist.components.len(), 1);
    assert_eq!(netlist.components[0].reference, "R1");
    assert_eq!(netlist.nets.len(), 1);
}

#[test]
fn malformed_json_is_an_invalid_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.sch.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = NetguardCore::check_file(&path, ValidationOptions::default());
    assert!(matches!(result, Err(NetguardError::InvalidDocument(_))));
}

#[test]
fn null_document_is_an_invalid_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("null.sch.json");
    std::fs::write(&path, "null").unwrap();

    let result = NetguardCore::check_file(&path, ValidationOptions::default());
    assert!(matches!(result, Err(NetguardError::InvalidDocument(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = NetguardCore::check_file(
        Path::new("does_not_exist.sch.json"),
        ValidationOptions::default(),
    );
    assert!(matches!(result, Err(NetguardError::Io(_))));
}

#[test]
fn discover_finds_only_schematic_documents() {
    let dir = tempfile::tempdir().unwrap();
    write_document(dir.path(), "a.sch.json", &sample_document());
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    write_document(
        &dir.path().join("nested"),
        "b.sch.json",
        &sample_document(),
    );
    std::fs::write(dir.path().join("notes.json"), "{}").unwrap();
    std::fs::write(dir.path().join("readme.txt"), "hi").unwrap();

    let files = netguard::discover_documents(dir.path()).unwrap();
    assert_eq!(files.len(), 2);
}

#[test]
fn validate_project_covers_every_document() {
    let dir = tempfile::tempdir().unwrap();
    write_document(dir.path(), "a.sch.json", &sample_document());
    write_document(dir.path(), "b.sch.json", &sample_document());

    let results = NetguardCore::validate_project(dir.path(), ValidationOptions::default())
        .expect("project should validate");
    assert_eq!(results.len(), 2);
}

#[test]
fn partially_populated_document_degrades_gracefully() {
    let json = r#"{
        "id": "doc-1",
        "name": "from-editor",
        "sheets": [{
            "id": "sheet-1",
            "name": "top",
            "wires": [{"id": "w1", "points": [{"x": 0, "y": 0}, {"x": 10, "y": 0}]}]
        }]
    }"#;
    let doc: SchematicDocument = serde_json::from_str(json).unwrap();
    assert_eq!(doc.sheets.len(), 1);
    assert!(doc.sheets[0].components.is_empty());

    let netlist = NetguardCore::extract_netlist(&doc);
    assert!(netlist.nets.is_empty());
}

//! Simple check example: load a document, run ERC, print results.

use netguard::prelude::*;
use std::path::Path;

fn main() -> Result<(), NetguardError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "examples/blinky.sch.json".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example simple_check [path/to/document.sch.json]");
        std::process::exit(1);
    }

    let result = NetguardCore::check_file(path, ValidationOptions::default())?;

    println!("ERC results for: {}", result.file.display());
    println!("Total violations: {}", result.total_violations());
    println!();

    for violation in &result.violations {
        println!("  [{:?}] {:?}: {}", violation.severity, violation.kind, violation.message);
        if let Some(ref location) = violation.location {
            println!("    at ({:.2}, {:.2})", location.x, location.y);
        }
    }

    if result.has_errors() {
        println!("\nERC failed (errors present).");
        std::process::exit(1);
    }

    println!("\nERC passed (no errors).");
    Ok(())
}

//! Core validation API shared by library consumers and the CLI.
//! No UI or editor-state dependencies.

use std::path::{Path, PathBuf};

use crate::erc::{ErcEngine, ErcViolation, Severity};
use crate::netlist::{Netlist, NetlistExtractor};
use crate::schema::SchematicDocument;

#[derive(Debug, thiserror::Error)]
pub enum NetguardError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

/// Options for a validation run.
#[derive(Clone, Debug, Default)]
pub struct ValidationOptions {
    /// Rule ids to run; empty runs every default rule.
    pub rules: Vec<String>,
}

/// Per-file validation result with violations and counts.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub file: PathBuf,
    pub violations: Vec<ErcViolation>,
    pub stats: ValidationStats,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationStats {
    pub errors: usize,
    pub warnings: usize,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.stats.errors > 0
    }

    pub fn total_violations(&self) -> usize {
        self.stats.errors + self.stats.warnings
    }
}

fn violations_to_stats(violations: &[ErcViolation]) -> ValidationStats {
    let mut errors = 0;
    let mut warnings = 0;
    for v in violations {
        match v.severity {
            Severity::Error => errors += 1,
            Severity::Warning => warnings += 1,
        }
    }
    ValidationStats { errors, warnings }
}

/// Load a schematic document from a JSON file. This is the fail-fast
/// boundary for invalid input: unreadable files and malformed or null
/// JSON surface here, before any connectivity code runs.
pub fn load_document(path: &Path) -> Result<SchematicDocument, NetguardError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| NetguardError::InvalidDocument(format!("{}: {}", path.display(), e)))
}

/// Recursively discover schematic document files (`*.sch.json`) in a
/// directory.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>, NetguardError> {
    let mut files = Vec::new();
    walk_dir(dir, &mut files, 0)?;
    files.sort();
    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>, depth: usize) -> Result<(), NetguardError> {
    if depth > 20 {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with('.') || name == "node_modules" || name == "target" || name == "build"
            {
                continue;
            }
            walk_dir(&path, files, depth + 1)?;
        } else if path.is_file() {
            let name = entry.file_name();
            if name.to_str().is_some_and(|n| n.ends_with(".sch.json")) {
                files.push(path);
            }
        }
    }
    Ok(())
}

/// Core API used by both the library surface and the CLI.
pub struct NetguardCore;

impl NetguardCore {
    /// Run ERC over an in-memory document.
    pub fn check_document(
        document: &SchematicDocument,
        options: &ValidationOptions,
    ) -> Vec<ErcViolation> {
        let engine = ErcEngine::with_default_rules();
        engine.check_filtered(document, &options.rules)
    }

    /// Extract the netlist of an in-memory document.
    pub fn extract_netlist(document: &SchematicDocument) -> Netlist {
        NetlistExtractor::extract(document)
    }

    /// Load a document file and run ERC.
    pub fn check_file(
        path: &Path,
        options: ValidationOptions,
    ) -> Result<ValidationResult, NetguardError> {
        let document = load_document(path)?;
        let violations = Self::check_document(&document, &options);
        let stats = violations_to_stats(&violations);
        Ok(ValidationResult {
            file: path.to_path_buf(),
            violations,
            stats,
        })
    }

    /// Load a document file and extract its netlist.
    pub fn extract_file(path: &Path) -> Result<Netlist, NetguardError> {
        let document = load_document(path)?;
        Ok(Self::extract_netlist(&document))
    }

    /// Validate every document file in a directory.
    pub fn validate_project(
        dir: &Path,
        options: ValidationOptions,
    ) -> Result<Vec<ValidationResult>, NetguardError> {
        let files = discover_documents(dir)?;
        let mut results = Vec::new();
        for path in files {
            results.push(Self::check_file(&path, options.clone())?);
        }
        Ok(results)
    }
}

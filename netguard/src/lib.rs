//! NetGuard - schematic connectivity and electrical rule checking
//!
//! Given a schematic document expressed purely as geometry (components
//! with positioned pins, polyline wires, net labels, power ports,
//! junctions), this library determines which pins are electrically
//! joined into nets, names those nets, and validates the result against
//! a fixed set of electrical rules.
//!
//! # Quick Start
//!
//! ```
//! use netguard::prelude::*;
//! use netguard::schema::SchematicDocument;
//!
//! let document = SchematicDocument::new("blinky");
//!
//! let netlist = NetguardCore::extract_netlist(&document);
//! let violations = NetguardCore::check_document(&document, &ValidationOptions::default());
//!
//! for violation in &violations {
//!     println!("{:?}: {}", violation.severity, violation.message);
//! }
//! assert!(netlist.nets.is_empty());
//! ```
//!
//! # Features
//!
//! - **Netlist extraction**: union-find over coincident geometry,
//!   priority-based net naming, cross-sheet merge by name
//! - **ERC**: unconnected pins, driver conflicts, missing power flags,
//!   duplicate references, dangling wires, unlabeled nets
//! - **Circuit graph**: a petgraph view over the extracted netlist for
//!   downstream cross-referencing
//!
//! Both `extract` and `check` are pure, synchronous functions of the
//! document: they never mutate it and allocate all working state per
//! call.

pub mod circuit;
pub mod connectivity;
pub mod core;
pub mod erc;
pub mod geometry;
pub mod netlist;
pub mod schema;

// Re-export main types
pub use crate::core::{
    discover_documents, load_document, NetguardCore, NetguardError, ValidationOptions,
    ValidationResult, ValidationStats,
};
pub use circuit::CircuitGraph;
pub use erc::{ErcEngine, ErcRule, ErcViolation, Severity, ViolationKind};
pub use netlist::{Net, NetConnection, Netlist, NetlistExtractor};
pub use schema::SchematicDocument;

/// Extract a document's netlist (convenience wrapper).
pub fn extract_netlist(document: &SchematicDocument) -> Netlist {
    NetguardCore::extract_netlist(document)
}

/// Run every default ERC rule over a document (convenience wrapper).
pub fn check_document(document: &SchematicDocument) -> Vec<ErcViolation> {
    NetguardCore::check_document(document, &ValidationOptions::default())
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ErcViolation, NetguardCore, NetguardError, Netlist, Severity, ValidationOptions,
        ValidationResult, ValidationStats, ViolationKind,
    };
}

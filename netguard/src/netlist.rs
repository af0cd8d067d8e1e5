//! Netlist extraction.
//!
//! Resolves connectivity sheet by sheet, names each group, and folds
//! the results into a document-wide netlist: a de-duplicated component
//! list plus named nets with their pin connections. Nets on different
//! sheets that resolve to the same name (power rails, shared labels)
//! merge into one net.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::connectivity::{ConnectivityResolver, NetNamer, NodeRef};
use crate::schema::SchematicDocument;

/// A component entry in the extracted netlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetlistComponent {
    pub reference: String,
    pub value: String,
    pub footprint: Option<String>,
    pub properties: HashMap<String, String>,
}

/// One pin's membership in a net.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetConnection {
    pub component_ref: String,
    pub pin_number: String,
    pub pin_name: String,
}

/// A named net and the pins on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    pub id: String,
    pub name: String,
    pub connections: Vec<NetConnection>,
}

impl Net {
    /// All component references connected to this net.
    pub fn connected_components(&self) -> Vec<&str> {
        self.connections
            .iter()
            .map(|c| c.component_ref.as_str())
            .collect()
    }

    /// Whether a specific component is connected to this net.
    pub fn has_component(&self, component_ref: &str) -> bool {
        self.connections
            .iter()
            .any(|c| c.component_ref == component_ref)
    }
}

/// The extraction result: fresh on every call, independent of any
/// internal working structures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Netlist {
    pub components: Vec<NetlistComponent>,
    pub nets: Vec<Net>,
}

impl Netlist {
    pub fn net(&self, name: &str) -> Option<&Net> {
        self.nets.iter().find(|n| n.name == name)
    }

    pub fn component(&self, reference: &str) -> Option<&NetlistComponent> {
        self.components.iter().find(|c| c.reference == reference)
    }
}

/// Counter for synthesized net names, threaded through the extraction
/// explicitly so one counter spans every sheet of a document and two
/// unnamed groups on different sheets never collide.
#[derive(Debug)]
pub struct NetNameAllocator {
    next: usize,
}

impl NetNameAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_name(&mut self) -> String {
        let name = format!("Net{}", self.next);
        self.next += 1;
        name
    }
}

impl Default for NetNameAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Geometric netlist extractor.
pub struct NetlistExtractor;

impl NetlistExtractor {
    /// Extract the netlist for a whole document. Read-only over the
    /// document; deterministic for a fixed input.
    pub fn extract(document: &SchematicDocument) -> Netlist {
        let components = Self::collect_components(document);

        let mut allocator = NetNameAllocator::new();
        let mut nets: Vec<Net> = Vec::new();
        let mut net_index: HashMap<String, usize> = HashMap::new();

        for sheet in &document.sheets {
            let mut resolver = ConnectivityResolver::for_sheet(sheet);
            let names = NetNamer::resolve(&mut resolver, sheet);

            for (root, members) in resolver.groups() {
                let mut connections: Vec<NetConnection> = Vec::new();
                for handle in members {
                    if let NodeRef::Pin {
                        reference,
                        pin_number,
                        pin_name,
                        ..
                    } = resolver.node(handle)
                    {
                        connections.push(NetConnection {
                            component_ref: reference.clone(),
                            pin_number: pin_number.clone(),
                            pin_name: pin_name.clone(),
                        });
                    }
                }
                // Labels, ports, wire points and junctions only carry
                // connectivity; a group with no pins is not a net.
                if connections.is_empty() {
                    continue;
                }

                let name = names
                    .get(&root)
                    .cloned()
                    .unwrap_or_else(|| allocator.next_name());

                let slot = *net_index.entry(name.clone()).or_insert_with(|| {
                    nets.push(Net {
                        id: String::new(),
                        name,
                        connections: Vec::new(),
                    });
                    nets.len() - 1
                });
                let net = &mut nets[slot];
                for connection in connections {
                    let duplicate = net.connections.iter().any(|existing| {
                        existing.component_ref == connection.component_ref
                            && existing.pin_number == connection.pin_number
                    });
                    if !duplicate {
                        net.connections.push(connection);
                    }
                }
            }
        }

        for (ordinal, net) in nets.iter_mut().enumerate() {
            net.id = format!("net-{}", ordinal + 1);
        }

        tracing::debug!(
            document = %document.name,
            components = components.len(),
            nets = nets.len(),
            "extracted netlist"
        );

        Netlist { components, nets }
    }

    /// Components across all sheets, de-duplicated by reference
    /// designator; the first occurrence wins.
    fn collect_components(document: &SchematicDocument) -> Vec<NetlistComponent> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut components = Vec::new();
        for sheet in &document.sheets {
            for component in &sheet.components {
                if seen.insert(component.reference.as_str()) {
                    components.push(NetlistComponent {
                        reference: component.reference.clone(),
                        value: component.value.clone(),
                        footprint: component.footprint.clone(),
                        properties: component.properties.clone(),
                    });
                }
            }
        }
        components
    }
}

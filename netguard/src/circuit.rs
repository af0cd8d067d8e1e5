//! Graph view over an extracted netlist.
//!
//! A bipartite petgraph of component and net nodes, with one edge per
//! pin connection. Downstream consumers (BOM export, cross-probing,
//! navigation) query this instead of re-walking the netlist vectors.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::netlist::{Net, Netlist, NetlistComponent};

/// Node type in the circuit graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CircuitNode {
    Component(NetlistComponent),
    Net(Net),
}

impl CircuitNode {
    pub fn as_component(&self) -> Option<&NetlistComponent> {
        match self {
            CircuitNode::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_net(&self) -> Option<&Net> {
        match self {
            CircuitNode::Net(n) => Some(n),
            _ => None,
        }
    }
}

/// Edge type: the pin through which a component joins a net.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitEdge {
    pub pin_number: String,
    pub pin_name: String,
}

/// The bipartite component/net graph.
#[derive(Debug, Clone)]
pub struct CircuitGraph {
    graph: DiGraph<CircuitNode, CircuitEdge>,
    component_indices: HashMap<String, NodeIndex>,
    net_indices: HashMap<String, NodeIndex>,
}

impl CircuitGraph {
    /// Build the graph view from an extracted netlist.
    pub fn from_netlist(netlist: &Netlist) -> Self {
        let mut graph = DiGraph::new();
        let mut component_indices = HashMap::new();
        let mut net_indices = HashMap::new();

        for component in &netlist.components {
            let idx = graph.add_node(CircuitNode::Component(component.clone()));
            component_indices.insert(component.reference.clone(), idx);
        }

        for net in &netlist.nets {
            let net_idx = graph.add_node(CircuitNode::Net(net.clone()));
            net_indices.insert(net.name.clone(), net_idx);
            for connection in &net.connections {
                if let Some(&comp_idx) = component_indices.get(&connection.component_ref) {
                    graph.add_edge(
                        comp_idx,
                        net_idx,
                        CircuitEdge {
                            pin_number: connection.pin_number.clone(),
                            pin_name: connection.pin_name.clone(),
                        },
                    );
                }
            }
        }

        Self {
            graph,
            component_indices,
            net_indices,
        }
    }

    pub fn component(&self, reference: &str) -> Option<&NetlistComponent> {
        self.component_indices
            .get(reference)
            .and_then(|&idx| self.graph.node_weight(idx))
            .and_then(|n| n.as_component())
    }

    pub fn net(&self, name: &str) -> Option<&Net> {
        self.net_indices
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
            .and_then(|n| n.as_net())
    }

    pub fn components(&self) -> impl Iterator<Item = &NetlistComponent> {
        self.graph.node_weights().filter_map(|n| n.as_component())
    }

    pub fn nets(&self) -> impl Iterator<Item = &Net> {
        self.graph.node_weights().filter_map(|n| n.as_net())
    }

    /// Names of the nets a component touches, with the pin that touches
    /// each.
    pub fn nets_of(&self, reference: &str) -> Vec<(&str, &CircuitEdge)> {
        let Some(&idx) = self.component_indices.get(reference) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(|edge| {
                self.graph
                    .node_weight(edge.target())
                    .and_then(|n| n.as_net())
                    .map(|net| (net.name.as_str(), edge.weight()))
            })
            .collect()
    }

    /// References of the components on a net.
    pub fn components_on(&self, net_name: &str) -> Vec<&str> {
        let Some(&idx) = self.net_indices.get(net_name) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .filter_map(|edge| {
                self.graph
                    .node_weight(edge.source())
                    .and_then(|n| n.as_component())
                    .map(|c| c.reference.as_str())
            })
            .collect()
    }

    /// Whether two components share at least one net.
    pub fn share_net(&self, reference_a: &str, reference_b: &str) -> bool {
        self.nets_of(reference_a)
            .iter()
            .any(|(net, _)| self.components_on(net).contains(&reference_b))
    }

    pub fn component_count(&self) -> usize {
        self.component_indices.len()
    }

    pub fn net_count(&self) -> usize {
        self.net_indices.len()
    }
}

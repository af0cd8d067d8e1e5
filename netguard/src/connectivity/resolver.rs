//! Spatial connectivity resolution.
//!
//! A sheet's connectable entities (pins, wire points, labels, power
//! ports, junctions) are registered as nodes in an arena; a union-find
//! over the arena handles groups nodes that coincide in world space
//! within [`CONNECTIVITY_TOLERANCE`]. Wire points are additionally
//! unioned along the whole polyline: a wire is one electrical point
//! end to end, not a chain of pairwise joins.

use std::collections::HashMap;

use crate::geometry::{distance, pin_world_position, CONNECTIVITY_TOLERANCE};
use crate::schema::{Position, Sheet};

use super::node::NodeRef;

/// Disjoint-set forest with path compression and union-by-rank.
#[derive(Debug, Default)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new element, returning its handle.
    pub fn make_set(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);
        id
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Canonical representative of `id`'s group, compressing the path
    /// walked.
    pub fn find(&mut self, id: usize) -> usize {
        let mut root = id;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cursor = id;
        while self.parent[cursor] != root {
            let next = self.parent[cursor];
            self.parent[cursor] = root;
            cursor = next;
        }
        root
    }

    /// Merge the groups of `a` and `b`; the lower-rank root attaches
    /// under the higher. Returns the surviving root.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }
        if self.rank[ra] < self.rank[rb] {
            self.parent[ra] = rb;
            rb
        } else if self.rank[ra] > self.rank[rb] {
            self.parent[rb] = ra;
            ra
        } else {
            self.parent[rb] = ra;
            self.rank[ra] += 1;
            ra
        }
    }
}

/// Union-find over a sheet's connection points, keyed by [`NodeRef`].
pub struct ConnectivityResolver {
    nodes: Vec<(NodeRef, Position)>,
    index: HashMap<NodeRef, usize>,
    uf: UnionFind,
}

impl ConnectivityResolver {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            uf: UnionFind::new(),
        }
    }

    /// Build a fully joined resolver for one sheet: register every
    /// connection point, union each wire's points into a bus bar, then
    /// union all spatially coincident nodes.
    pub fn for_sheet(sheet: &Sheet) -> Self {
        let mut resolver = Self::new();

        for component in &sheet.components {
            for pin in &component.symbol.pins {
                let world = pin_world_position(component, pin);
                resolver.register(
                    NodeRef::Pin {
                        component: component.id.clone(),
                        reference: component.reference.clone(),
                        pin_number: pin.number.clone(),
                        pin_name: pin.name.clone(),
                    },
                    world,
                );
            }
        }

        for wire in &sheet.wires {
            if wire.points.len() < 2 {
                tracing::warn!(
                    wire = %wire.id,
                    points = wire.points.len(),
                    "skipping degenerate wire"
                );
                continue;
            }
            let mut first = None;
            for (index, point) in wire.points.iter().enumerate() {
                let handle = resolver.register(
                    NodeRef::WirePoint {
                        wire: wire.id.clone(),
                        index,
                    },
                    point.clone(),
                );
                match first {
                    None => first = Some(handle),
                    Some(anchor) => {
                        resolver.uf.union(anchor, handle);
                    }
                }
            }
        }

        for label in &sheet.labels {
            resolver.register(
                NodeRef::Label {
                    label: label.id.clone(),
                },
                label.position.clone(),
            );
        }

        for port in &sheet.power_ports {
            resolver.register(
                NodeRef::Power {
                    port: port.id.clone(),
                },
                port.position.clone(),
            );
        }

        for junction in &sheet.junctions {
            resolver.register(
                NodeRef::Junction {
                    junction: junction.id.clone(),
                },
                junction.position.clone(),
            );
        }

        resolver.join_coincident();
        resolver
    }

    /// Register a node (idempotent: re-registering an existing node
    /// returns its original handle and keeps its original position).
    pub fn register(&mut self, node: NodeRef, position: Position) -> usize {
        if let Some(&handle) = self.index.get(&node) {
            return handle;
        }
        let handle = self.uf.make_set();
        debug_assert_eq!(handle, self.nodes.len());
        self.index.insert(node.clone(), handle);
        self.nodes.push((node, position));
        handle
    }

    /// Handle of a previously registered node.
    pub fn lookup(&self, node: &NodeRef) -> Option<usize> {
        self.index.get(node).copied()
    }

    pub fn node(&self, handle: usize) -> &NodeRef {
        &self.nodes[handle].0
    }

    pub fn position(&self, handle: usize) -> &Position {
        &self.nodes[handle].1
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn union(&mut self, a: usize, b: usize) -> usize {
        self.uf.union(a, b)
    }

    pub fn find(&mut self, handle: usize) -> usize {
        self.uf.find(handle)
    }

    /// The final partition, ordered by each group's lowest handle so
    /// iteration order is registration order, independent of which node
    /// ended up as the union-find root.
    pub fn groups(&mut self) -> Vec<(usize, Vec<usize>)> {
        let mut by_root: HashMap<usize, Vec<usize>> = HashMap::new();
        for handle in 0..self.nodes.len() {
            let root = self.uf.find(handle);
            by_root.entry(root).or_default().push(handle);
        }
        let mut groups: Vec<(usize, Vec<usize>)> = by_root.into_iter().collect();
        groups.sort_by_key(|(_, members)| members[0]);
        groups
    }

    /// Union every pair of nodes whose world positions lie within
    /// tolerance of each other. Nodes are hashed into a grid with cell
    /// size equal to the tolerance; a qualifying pair is at most one
    /// cell apart on each axis, so the 3x3 neighborhood holds every
    /// candidate and each candidate pair is distance-checked.
    fn join_coincident(&mut self) {
        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (handle, (_, position)) in self.nodes.iter().enumerate() {
            cells
                .entry(Self::cell_of(position))
                .or_default()
                .push(handle);
        }

        for handle in 0..self.nodes.len() {
            let position = self.nodes[handle].1.clone();
            let (cx, cy) = Self::cell_of(&position);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let Some(neighbors) = cells.get(&(cx + dx, cy + dy)) else {
                        continue;
                    };
                    for &other in neighbors {
                        if other <= handle {
                            continue;
                        }
                        if distance(&position, &self.nodes[other].1) <= CONNECTIVITY_TOLERANCE {
                            self.uf.union(handle, other);
                        }
                    }
                }
            }
        }
    }

    fn cell_of(position: &Position) -> (i64, i64) {
        (
            (position.x / CONNECTIVITY_TOLERANCE).floor() as i64,
            (position.y / CONNECTIVITY_TOLERANCE).floor() as i64,
        )
    }
}

impl Default for ConnectivityResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ElectricalType, Pin, SchematicComponent, Wire};

    #[test]
    fn find_is_idempotent_and_union_merges() {
        let mut uf = UnionFind::new();
        let a = uf.make_set();
        let b = uf.make_set();
        let c = uf.make_set();

        let root_a = uf.find(a);
        assert_eq!(uf.find(root_a), root_a);
        assert_ne!(uf.find(a), uf.find(b));

        uf.union(a, b);
        assert_eq!(uf.find(a), uf.find(b));
        assert_ne!(uf.find(a), uf.find(c));

        uf.union(b, c);
        assert_eq!(uf.find(a), uf.find(c));
    }

    #[test]
    fn groups_partition_the_registered_nodes() {
        let mut resolver = ConnectivityResolver::new();
        for i in 0..6 {
            resolver.register(
                NodeRef::Junction {
                    junction: format!("j{}", i),
                },
                Position::new(i as f64 * 100.0, 0.0),
            );
        }
        resolver.union(0, 3);
        resolver.union(1, 4);

        let groups = resolver.groups();
        let total: usize = groups.iter().map(|(_, members)| members.len()).sum();
        assert_eq!(total, 6);

        let mut seen = std::collections::HashSet::new();
        for (_, members) in &groups {
            for &m in members {
                assert!(seen.insert(m), "node {} appeared in two groups", m);
            }
        }
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn register_is_idempotent() {
        let mut resolver = ConnectivityResolver::new();
        let node = NodeRef::Junction {
            junction: "j1".into(),
        };
        let a = resolver.register(node.clone(), Position::new(1.0, 1.0));
        let b = resolver.register(node, Position::new(99.0, 99.0));
        assert_eq!(a, b);
        assert_eq!(resolver.len(), 1);
        assert!((resolver.position(a).x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn coincident_nodes_union_within_tolerance() {
        let mut sheet = Sheet::new("test");
        sheet.wires.push(Wire::new(vec![
            Position::new(0.0, 0.0),
            Position::new(50.0, 0.0),
        ]));
        sheet.wires.push(Wire::new(vec![
            Position::new(51.0, 0.0),
            Position::new(100.0, 0.0),
        ]));
        sheet.wires.push(Wire::new(vec![
            Position::new(200.0, 0.0),
            Position::new(250.0, 0.0),
        ]));

        let mut resolver = ConnectivityResolver::for_sheet(&sheet);
        let w0 = resolver
            .lookup(&NodeRef::WirePoint {
                wire: sheet.wires[0].id.clone(),
                index: 0,
            })
            .unwrap();
        let w1 = resolver
            .lookup(&NodeRef::WirePoint {
                wire: sheet.wires[1].id.clone(),
                index: 1,
            })
            .unwrap();
        let w2 = resolver
            .lookup(&NodeRef::WirePoint {
                wire: sheet.wires[2].id.clone(),
                index: 0,
            })
            .unwrap();

        // 50.0 and 51.0 are within tolerance, so wires 0 and 1 merge.
        assert_eq!(resolver.find(w0), resolver.find(w1));
        assert_ne!(resolver.find(w0), resolver.find(w2));
    }

    #[test]
    fn wire_is_a_bus_bar_not_a_chain() {
        let mut sheet = Sheet::new("test");
        sheet.wires.push(Wire::new(vec![
            Position::new(0.0, 0.0),
            Position::new(500.0, 0.0),
            Position::new(500.0, 500.0),
        ]));
        let component_a = SchematicComponent::new("R1", "10k", Position::new(0.0, 0.0))
            .with_pins(vec![Pin::new(
                "1",
                "A",
                ElectricalType::Passive,
                Position::new(0.0, 0.0),
            )]);
        let component_b = SchematicComponent::new("R2", "10k", Position::new(500.0, 500.0))
            .with_pins(vec![Pin::new(
                "1",
                "A",
                ElectricalType::Passive,
                Position::new(0.0, 0.0),
            )]);
        sheet.components.push(component_a);
        sheet.components.push(component_b);

        let mut resolver = ConnectivityResolver::for_sheet(&sheet);
        let a = resolver
            .lookup(&NodeRef::Pin {
                component: sheet.components[0].id.clone(),
                reference: "R1".into(),
                pin_number: "1".into(),
                pin_name: "A".into(),
            })
            .unwrap();
        let b = resolver
            .lookup(&NodeRef::Pin {
                component: sheet.components[1].id.clone(),
                reference: "R2".into(),
                pin_number: "1".into(),
                pin_name: "A".into(),
            })
            .unwrap();
        assert_eq!(resolver.find(a), resolver.find(b));
    }

    #[test]
    fn degenerate_wires_are_skipped() {
        let mut sheet = Sheet::new("test");
        sheet.wires.push(Wire::new(vec![Position::new(0.0, 0.0)]));
        let resolver = ConnectivityResolver::for_sheet(&sheet);
        assert!(resolver.is_empty());
    }
}

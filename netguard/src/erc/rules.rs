//! The six built-in electrical rules.

use std::collections::{HashMap, HashSet};

use crate::connectivity::{ConnectivityResolver, NodeRef, UnionFind};
use crate::geometry::{pin_world_position, within_tolerance};
use crate::schema::{
    ElectricalType, Pin, Position, SchematicComponent, Sheet, SchematicDocument, Wire,
};

use super::{ErcRule, ErcViolation, Severity, ViolationKind};

// Helper views over a sheet

struct PinSite<'a> {
    component: &'a SchematicComponent,
    pin: &'a Pin,
    position: Position,
}

fn sheet_pins(sheet: &Sheet) -> Vec<PinSite<'_>> {
    let mut sites = Vec::new();
    for component in &sheet.components {
        for pin in &component.symbol.pins {
            sites.push(PinSite {
                component,
                pin,
                position: pin_world_position(component, pin),
            });
        }
    }
    sites
}

fn routed_wires(sheet: &Sheet) -> Vec<&Wire> {
    sheet.wires.iter().filter(|w| w.points.len() >= 2).collect()
}

/// Indices of wires reachable from `seed` through shared points,
/// expanded to a fixed point. Two wires share a point when any point of
/// one lies within tolerance of any point of the other.
fn wire_closure(wires: &[&Wire], seed: &Position) -> Vec<usize> {
    let mut reached: HashSet<usize> = HashSet::new();
    let mut worklist: Vec<usize> = Vec::new();

    for (index, wire) in wires.iter().enumerate() {
        if wire.points.iter().any(|p| within_tolerance(p, seed)) {
            reached.insert(index);
            worklist.push(index);
        }
    }

    while let Some(current) = worklist.pop() {
        for (index, wire) in wires.iter().enumerate() {
            if reached.contains(&index) {
                continue;
            }
            let touches = wires[current].points.iter().any(|a| {
                wire.points.iter().any(|b| within_tolerance(a, b))
            });
            if touches {
                reached.insert(index);
                worklist.push(index);
            }
        }
    }

    let mut ordered: Vec<usize> = reached.into_iter().collect();
    ordered.sort_unstable();
    ordered
}

// Rule 1: unconnected pin

pub struct UnconnectedPinRule;

impl ErcRule for UnconnectedPinRule {
    fn id(&self) -> &str {
        "unconnected_pin"
    }

    fn name(&self) -> &str {
        "Unconnected Pin Check"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, document: &SchematicDocument) -> Vec<ErcViolation> {
        let mut violations = Vec::new();
        for sheet in &document.sheets {
            let sites = sheet_pins(sheet);

            let mut anchor_points: Vec<&Position> = Vec::new();
            for wire in routed_wires(sheet) {
                anchor_points.extend(wire.points.iter());
            }
            for junction in &sheet.junctions {
                anchor_points.push(&junction.position);
            }

            for site in &sites {
                let on_wire = anchor_points
                    .iter()
                    .any(|p| within_tolerance(p, &site.position));
                let on_other_pin = sites.iter().any(|other| {
                    other.component.id != site.component.id
                        && within_tolerance(&other.position, &site.position)
                });
                if on_wire || on_other_pin {
                    continue;
                }

                let severity = if site.pin.electrical_type == ElectricalType::Passive {
                    Severity::Warning
                } else {
                    Severity::Error
                };
                violations.push(ErcViolation {
                    kind: ViolationKind::UnconnectedPin,
                    severity,
                    message: format!(
                        "Pin {} ({}) of {} is not connected",
                        site.pin.number, site.pin.name, site.component.reference
                    ),
                    location: Some(site.position.clone()),
                    object_ids: vec![site.component.id.clone(), site.pin.id.clone()],
                });
            }
        }
        violations
    }
}

// Rule 2: conflicting pin types

pub struct ConflictingPinTypesRule;

impl ErcRule for ConflictingPinTypesRule {
    fn id(&self) -> &str {
        "conflicting_pin_types"
    }

    fn name(&self) -> &str {
        "Conflicting Pin Types Check"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, document: &SchematicDocument) -> Vec<ErcViolation> {
        let mut violations = Vec::new();
        for sheet in &document.sheets {
            let sites = sheet_pins(sheet);
            let mut resolver = ConnectivityResolver::for_sheet(sheet);

            // Group pins by their connectivity root, keeping the pins of
            // each group in sheet order.
            let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
            let mut group_order: Vec<usize> = Vec::new();
            for (site_index, site) in sites.iter().enumerate() {
                let key = NodeRef::Pin {
                    component: site.component.id.clone(),
                    reference: site.component.reference.clone(),
                    pin_number: site.pin.number.clone(),
                    pin_name: site.pin.name.clone(),
                };
                let Some(handle) = resolver.lookup(&key) else {
                    continue;
                };
                let root = resolver.find(handle);
                let members = groups.entry(root).or_insert_with(|| {
                    group_order.push(root);
                    Vec::new()
                });
                members.push(site_index);
            }

            for root in group_order {
                let members = &groups[&root];
                let drivers: Vec<usize> = members
                    .iter()
                    .copied()
                    .filter(|&i| sites[i].pin.electrical_type.is_driver())
                    .collect();
                for (a_pos, &a) in drivers.iter().enumerate() {
                    for &b in &drivers[a_pos + 1..] {
                        let first = &sites[a];
                        let second = &sites[b];
                        violations.push(ErcViolation {
                            kind: ViolationKind::ConflictingPinTypes,
                            severity: Severity::Error,
                            message: format!(
                                "Conflicting drivers on one net: {} pin {} ({:?}) and {} pin {} ({:?})",
                                first.component.reference,
                                first.pin.number,
                                first.pin.electrical_type,
                                second.component.reference,
                                second.pin.number,
                                second.pin.electrical_type,
                            ),
                            location: Some(first.position.clone()),
                            object_ids: vec![
                                first.component.id.clone(),
                                first.pin.id.clone(),
                                second.component.id.clone(),
                                second.pin.id.clone(),
                            ],
                        });
                    }
                }
            }
        }
        violations
    }
}

// Rule 3: missing power flag

pub struct MissingPowerFlagRule;

impl ErcRule for MissingPowerFlagRule {
    fn id(&self) -> &str {
        "missing_power_flag"
    }

    fn name(&self) -> &str {
        "Missing Power Flag Check"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, document: &SchematicDocument) -> Vec<ErcViolation> {
        let mut violations = Vec::new();
        for sheet in &document.sheets {
            let sites = sheet_pins(sheet);
            let wires = routed_wires(sheet);

            for site in &sites {
                if site.pin.electrical_type != ElectricalType::PowerInput {
                    continue;
                }

                let port_at_pin = sheet
                    .power_ports
                    .iter()
                    .any(|port| within_tolerance(&port.position, &site.position));
                if port_at_pin {
                    continue;
                }

                let driven_at_pin = sites.iter().any(|other| {
                    other.pin.electrical_type == ElectricalType::PowerOutput
                        && within_tolerance(&other.position, &site.position)
                });
                if driven_at_pin {
                    continue;
                }

                // Follow the wire network the pin sits on; any power
                // port touching it satisfies the flag.
                let reached = wire_closure(&wires, &site.position);
                let port_on_net = reached.iter().any(|&index| {
                    wires[index].points.iter().any(|point| {
                        sheet
                            .power_ports
                            .iter()
                            .any(|port| within_tolerance(&port.position, point))
                    })
                });
                if port_on_net {
                    continue;
                }

                violations.push(ErcViolation {
                    kind: ViolationKind::MissingPowerFlag,
                    severity: Severity::Warning,
                    message: format!(
                        "Power input pin {} ({}) of {} is not driven by any power source",
                        site.pin.number, site.pin.name, site.component.reference
                    ),
                    location: Some(site.position.clone()),
                    object_ids: vec![site.component.id.clone(), site.pin.id.clone()],
                });
            }
        }
        violations
    }
}

// Rule 4: duplicate reference

pub struct DuplicateReferenceRule;

impl ErcRule for DuplicateReferenceRule {
    fn id(&self) -> &str {
        "duplicate_reference"
    }

    fn name(&self) -> &str {
        "Duplicate Reference Check"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, document: &SchematicDocument) -> Vec<ErcViolation> {
        let mut by_reference: HashMap<&str, Vec<&SchematicComponent>> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for sheet in &document.sheets {
            for component in &sheet.components {
                let entry = by_reference
                    .entry(component.reference.as_str())
                    .or_insert_with(|| {
                        order.push(component.reference.as_str());
                        Vec::new()
                    });
                entry.push(component);
            }
        }

        let mut violations = Vec::new();
        for reference in order {
            let components = &by_reference[reference];
            if components.len() < 2 {
                continue;
            }
            violations.push(ErcViolation {
                kind: ViolationKind::DuplicateReference,
                severity: Severity::Error,
                message: format!(
                    "Reference designator {} is used by {} components",
                    reference,
                    components.len()
                ),
                location: Some(components[0].position.clone()),
                object_ids: components.iter().map(|c| c.id.clone()).collect(),
            });
        }
        violations
    }
}

// Rule 5: unconnected wire

pub struct UnconnectedWireRule;

impl ErcRule for UnconnectedWireRule {
    fn id(&self) -> &str {
        "unconnected_wire"
    }

    fn name(&self) -> &str {
        "Unconnected Wire Check"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, document: &SchematicDocument) -> Vec<ErcViolation> {
        let mut violations = Vec::new();
        for sheet in &document.sheets {
            let sites = sheet_pins(sheet);
            let wires = routed_wires(sheet);

            for wire in &wires {
                // Only the terminal points can dangle; bend points are
                // interior to the polyline.
                let endpoints = [
                    wire.points.first().unwrap(),
                    wire.points.last().unwrap(),
                ];
                for endpoint in endpoints {
                    let touches_pin = sites
                        .iter()
                        .any(|site| within_tolerance(&site.position, endpoint));
                    let touches_label = sheet
                        .labels
                        .iter()
                        .any(|label| within_tolerance(&label.position, endpoint));
                    let touches_port = sheet
                        .power_ports
                        .iter()
                        .any(|port| within_tolerance(&port.position, endpoint));
                    let touches_junction = sheet
                        .junctions
                        .iter()
                        .any(|junction| within_tolerance(&junction.position, endpoint));
                    let touches_other_wire = wires.iter().any(|other| {
                        other.id != wire.id
                            && other.points.iter().any(|p| within_tolerance(p, endpoint))
                    });

                    if touches_pin
                        || touches_label
                        || touches_port
                        || touches_junction
                        || touches_other_wire
                    {
                        continue;
                    }

                    violations.push(ErcViolation {
                        kind: ViolationKind::UnconnectedWire,
                        severity: Severity::Warning,
                        message: format!(
                            "Wire endpoint at ({:.2}, {:.2}) is not connected",
                            endpoint.x, endpoint.y
                        ),
                        location: Some(endpoint.clone()),
                        object_ids: vec![wire.id.clone()],
                    });
                }
            }
        }
        violations
    }
}

// Rule 6: missing net label

pub struct MissingNetLabelRule;

impl ErcRule for MissingNetLabelRule {
    fn id(&self) -> &str {
        "missing_net_label"
    }

    fn name(&self) -> &str {
        "Missing Net Label Check"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, document: &SchematicDocument) -> Vec<ErcViolation> {
        let mut violations = Vec::new();
        for sheet in &document.sheets {
            let sites = sheet_pins(sheet);
            let wires = routed_wires(sheet);
            if wires.is_empty() {
                continue;
            }

            // Independent union-find over wires: two wires join when any
            // of their points coincide.
            let mut uf = UnionFind::new();
            for _ in 0..wires.len() {
                uf.make_set();
            }
            for i in 0..wires.len() {
                for j in (i + 1)..wires.len() {
                    let touches = wires[i].points.iter().any(|a| {
                        wires[j].points.iter().any(|b| within_tolerance(a, b))
                    });
                    if touches {
                        uf.union(i, j);
                    }
                }
            }

            let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
            for index in 0..wires.len() {
                let root = uf.find(index);
                groups.entry(root).or_default().push(index);
            }
            let mut ordered: Vec<Vec<usize>> = groups.into_values().collect();
            ordered.sort_by_key(|members| members[0]);

            for members in ordered {
                let mut connected_pins: HashSet<(&str, &str)> = HashSet::new();
                for &index in &members {
                    for point in &wires[index].points {
                        for site in &sites {
                            if within_tolerance(&site.position, point) {
                                connected_pins
                                    .insert((site.component.id.as_str(), site.pin.id.as_str()));
                            }
                        }
                    }
                }
                if connected_pins.len() < 2 {
                    continue;
                }

                let labeled = members.iter().any(|&index| {
                    wires[index].points.iter().any(|point| {
                        sheet
                            .labels
                            .iter()
                            .any(|label| within_tolerance(&label.position, point))
                    })
                });
                if labeled {
                    continue;
                }

                let first_wire = wires[members[0]];
                violations.push(ErcViolation {
                    kind: ViolationKind::MissingNetLabel,
                    severity: Severity::Warning,
                    message: format!(
                        "Net spanning {} wire(s) connects {} pins but has no net label",
                        members.len(),
                        connected_pins.len()
                    ),
                    location: first_wire.points.first().cloned(),
                    object_ids: members.iter().map(|&i| wires[i].id.clone()).collect(),
                });
            }
        }
        violations
    }
}

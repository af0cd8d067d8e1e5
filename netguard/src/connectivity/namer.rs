//! Net name resolution.
//!
//! A connectivity group gets its name from the first naming source that
//! touches it, scanned in priority order: net labels, then power ports,
//! then inline wire net names. Within one priority tier the first
//! writer wins; later sources never overwrite an assigned name.

use std::collections::HashMap;

use crate::schema::Sheet;

use super::node::NodeRef;
use super::resolver::ConnectivityResolver;

pub struct NetNamer;

impl NetNamer {
    /// Map each named group root to its resolved name. Groups touched
    /// by no naming source are absent; the extractor synthesizes names
    /// for those.
    pub fn resolve(resolver: &mut ConnectivityResolver, sheet: &Sheet) -> HashMap<usize, String> {
        let mut names: HashMap<usize, String> = HashMap::new();

        for label in &sheet.labels {
            let key = NodeRef::Label {
                label: label.id.clone(),
            };
            if let Some(handle) = resolver.lookup(&key) {
                let root = resolver.find(handle);
                names.entry(root).or_insert_with(|| label.text.clone());
            }
        }

        for port in &sheet.power_ports {
            let key = NodeRef::Power {
                port: port.id.clone(),
            };
            if let Some(handle) = resolver.lookup(&key) {
                let root = resolver.find(handle);
                names.entry(root).or_insert_with(|| port.name.clone());
            }
        }

        for wire in &sheet.wires {
            let Some(net_name) = &wire.net_name else {
                continue;
            };
            // All points of a wire share a group; the first is enough.
            let key = NodeRef::WirePoint {
                wire: wire.id.clone(),
                index: 0,
            };
            if let Some(handle) = resolver.lookup(&key) {
                let root = resolver.find(handle);
                names.entry(root).or_insert_with(|| net_name.clone());
            }
        }

        names
    }
}

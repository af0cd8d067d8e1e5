//! Connectivity node identities.
//!
//! Every connectable entity on a sheet registers one node per
//! connection point. The variant carries enough of the owning entity to
//! interpret a resolved group later without any lookup back into the
//! document.

/// Identity of one connection point, used as the union-find node key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// A component pin. Carries the pieces a net connection is made of,
    /// so extraction never has to re-parse anything.
    Pin {
        component: String,
        reference: String,
        pin_number: String,
        pin_name: String,
    },
    /// One point of a wire polyline.
    WirePoint { wire: String, index: usize },
    /// A net label's anchor point.
    Label { label: String },
    /// A power port's connection point.
    Power { port: String },
    /// A junction dot.
    Junction { junction: String },
}

impl NodeRef {
    pub fn is_pin(&self) -> bool {
        matches!(self, NodeRef::Pin { .. })
    }
}

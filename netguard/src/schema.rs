//! Schematic document model.
//!
//! These types are the input contract with the editor/file-loader
//! collaborator: a document is handed in fully built and is never
//! mutated by this crate. Collections are `#[serde(default)]` so a
//! partially populated document deserializes with empty lists instead
//! of failing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A 2-D point in schematic coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Root unit of work: a named document holding an ordered list of sheets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchematicDocument {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl SchematicDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            sheets: Vec::new(),
        }
    }
}

/// One schematic sheet. Connectivity is resolved per sheet; nets merge
/// across sheets only by resolved name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub components: Vec<SchematicComponent>,
    #[serde(default)]
    pub wires: Vec<Wire>,
    #[serde(default)]
    pub labels: Vec<NetLabel>,
    #[serde(default)]
    pub power_ports: Vec<PowerPort>,
    #[serde(default)]
    pub junctions: Vec<Junction>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            components: Vec::new(),
            wires: Vec::new(),
            labels: Vec::new(),
            power_ports: Vec::new(),
            junctions: Vec::new(),
        }
    }
}

/// A placed component instance with its embedded symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchematicComponent {
    pub id: String,
    pub reference: String, // R1, C3, U2
    pub value: String,     // 10k, 100nF, STM32F4
    #[serde(default)]
    pub footprint: Option<String>,
    pub position: Position,
    /// Rotation in degrees, counter-clockwise.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub properties: HashMap<String, String>,
    #[serde(default)]
    pub symbol: Symbol,
}

impl SchematicComponent {
    pub fn new(
        reference: impl Into<String>,
        value: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            reference: reference.into(),
            value: value.into(),
            footprint: None,
            position,
            rotation: 0.0,
            properties: HashMap::new(),
            symbol: Symbol::default(),
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_pins(mut self, pins: Vec<Pin>) -> Self {
        self.symbol.pins = pins;
        self
    }
}

/// Symbol body embedded in a component instance. Graphic items are a
/// rendering concern and are not modeled; only pins matter here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(default)]
    pub pins: Vec<Pin>,
}

/// A symbol pin. `position` is relative to the symbol origin; the world
/// position is obtained by applying the owning component's rotation and
/// translation (see [`crate::geometry::pin_world_position`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    pub id: String,
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub electrical_type: ElectricalType,
    pub position: Position,
    #[serde(default)]
    pub orientation: PinOrientation,
}

impl Pin {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        electrical_type: ElectricalType,
        position: Position,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            number: number.into(),
            electrical_type,
            position,
            orientation: PinOrientation::default(),
        }
    }
}

/// Electrical class of a pin, as declared by the symbol library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectricalType {
    Input,
    Output,
    Bidirectional,
    Passive,
    PowerInput,
    PowerOutput,
    OpenCollector,
    OpenEmitter,
    NotConnected,
    Unspecified,
}

impl Default for ElectricalType {
    fn default() -> Self {
        ElectricalType::Unspecified
    }
}

impl ElectricalType {
    /// Pins that actively drive a net. Two of these on one net conflict.
    pub fn is_driver(&self) -> bool {
        matches!(self, ElectricalType::Output | ElectricalType::PowerOutput)
    }
}

/// Which direction a pin points (0/90/180/270 degrees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinOrientation {
    Right,
    Up,
    Left,
    Down,
}

impl Default for PinOrientation {
    fn default() -> Self {
        PinOrientation::Right
    }
}

/// A polyline wire. Every point on a wire is electrically common with
/// every other point on it, like a bus bar. An optional inline net name
/// participates in net naming at the lowest priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    pub id: String,
    #[serde(default)]
    pub points: Vec<Position>,
    #[serde(default)]
    pub net_name: Option<String>,
}

impl Wire {
    pub fn new(points: Vec<Position>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            points,
            net_name: None,
        }
    }

    pub fn with_net_name(mut self, name: impl Into<String>) -> Self {
        self.net_name = Some(name.into());
        self
    }
}

/// A text annotation that names whatever coincides with its position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetLabel {
    pub id: String,
    pub position: Position,
    pub text: String,
}

impl NetLabel {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            position,
            text: text.into(),
        }
    }
}

/// A power rail symbol (VCC, GND, ...): both a connection point and a
/// net-naming source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerPort {
    pub id: String,
    pub position: Position,
    pub name: String,
    #[serde(default)]
    pub style: Option<String>,
}

impl PowerPort {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            position,
            name: name.into(),
            style: None,
        }
    }
}

/// A junction dot: a pure coincidence marker with no electrical
/// behavior of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Junction {
    pub id: String,
    pub position: Position,
}

impl Junction {
    pub fn new(position: Position) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            position,
        }
    }
}

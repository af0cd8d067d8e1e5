//! Geometry helpers shared by the connectivity resolver and the ERC
//! rules.

use crate::schema::{Pin, Position, SchematicComponent};

/// Maximum world-space distance at which two points count as the same
/// electrical point. One constant shared by the extractor and every ERC
/// rule; diverging tolerances would make the two disagree about what is
/// connected.
pub const CONNECTIVITY_TOLERANCE: f64 = 2.0;

/// Euclidean distance between two points.
pub fn distance(a: &Position, b: &Position) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Whether two points coincide within [`CONNECTIVITY_TOLERANCE`].
pub fn within_tolerance(a: &Position, b: &Position) -> bool {
    distance(a, b) <= CONNECTIVITY_TOLERANCE
}

/// World position of a pin: the symbol-relative offset rotated by the
/// component's rotation, then translated by the component's position.
///
/// Mirrored placement is not modeled; the transform is rotation and
/// translation only.
pub fn pin_world_position(component: &SchematicComponent, pin: &Pin) -> Position {
    let radians = component.rotation.to_radians();
    let cos_r = radians.cos();
    let sin_r = radians.sin();

    let rotated_x = pin.position.x * cos_r - pin.position.y * sin_r;
    let rotated_y = pin.position.x * sin_r + pin.position.y * cos_r;

    Position {
        x: component.position.x + rotated_x,
        y: component.position.y + rotated_y,
    }
}

//! Passive food resources agents compete for.

use crate::point::Point;

/// A stationary food item. Spawned by the driver at generation start and
/// removed by the environment when an agent consumes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Food {
    pub position: Point,
    /// Collision radius, fixed for the item's lifetime.
    pub radius: f64,
}

impl Food {
    pub fn new(position: Point, radius: f64) -> Self {
        Self { position, radius }
    }
}

//! Core types for nail layouts

use serde::Deserialize;

/// A nail position in the unit square
///
/// Nails have no identity of their own: a nail's index is its position in
/// the enclosing layout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Nail {
    pub x: f64,
    pub y: f64,
}

impl Nail {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check if the nail lies within [0, 1] x [0, 1]
    pub fn in_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another nail
    pub fn distance_to(&self, other: &Nail) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f64; 2]> for Nail {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Nail> for [f64; 2] {
    fn from(nail: Nail) -> Self {
        [nail.x, nail.y]
    }
}

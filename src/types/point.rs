//! Planar coordinate pair shared by every shape

use std::fmt;

/// An (x, y) coordinate pair as stored in the shapefile point arrays.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Origin
    pub const ZERO: Point = Point::new(0.0, 0.0);

    /// Compare coordinates by their IEEE-754 bit patterns.
    ///
    /// Unlike `==`, this treats two NaNs with the same payload as equal and
    /// distinguishes `0.0` from `-0.0`.
    pub fn bits_eq(&self, other: &Point) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

use std::{
    fmt::{Display, Formatter},
    ops::{Add, Mul, Neg, Sub},
};

use serde::{Deserialize, Serialize};

/// Coordinates are quantized to this lattice for identity checks.
/// Every stencil constant is a multiple of 0.005, so the lattice is exact.
const KEY_SCALE: f64 = 1000.0;

/// A point in grid space. One character cell spans one unit on each axis,
/// so positions are fractional (a cell center sits at `+0.5, +0.5`).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).length()
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Lattice key used for node identity and spatial lookups.
    pub fn quantized(self) -> (i64, i64) {
        ((self.x * KEY_SCALE).round() as i64, (self.y * KEY_SCALE).round() as i64)
    }

    pub fn approx_eq(self, other: Point) -> bool {
        self.quantized() == other.quantized()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        self + (-rhs)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

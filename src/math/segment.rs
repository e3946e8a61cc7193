use serde::{Deserialize, Serialize};

use crate::math::Point;

/// A straight segment between two grid-space points.
#[derive(Debug, Copy, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

fn orient(p: Point, q: Point, r: Point) -> f64 {
    (q - p).cross(r - p)
}

impl Segment {
    pub const fn new(a: Point, b: Point) -> Self {
        Segment { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(self.b)
    }

    pub fn translated(self, offset: Point) -> Self {
        Segment::new(self.a + offset, self.b + offset)
    }

    /// Distance from `p` to the closest point of this segment.
    /// A zero-length segment degrades to plain point distance.
    pub fn distance_to_point(&self, p: Point) -> f64 {
        let d = self.b - self.a;
        let len2 = d.dot(d);
        if len2 == 0.0 {
            return self.a.distance_to(p);
        }
        let t = ((p - self.a).dot(d) / len2).clamp(0.0, 1.0);
        (self.a + d * t).distance_to(p)
    }

    /// True iff the segments properly cross (intersect at interior points).
    /// Touching endpoints and collinear overlap do not count.
    pub fn crosses(&self, other: &Segment) -> bool {
        let d1 = orient(self.a, self.b, other.a);
        let d2 = orient(self.a, self.b, other.b);
        let d3 = orient(other.a, other.b, self.a);
        let d4 = orient(other.a, other.b, self.b);
        d1 * d2 < 0.0 && d3 * d4 < 0.0
    }

    /// Minimum distance between the two segments: 0 when they cross,
    /// otherwise the smallest of the four endpoint-to-segment distances.
    pub fn distance_to(&self, other: &Segment) -> f64 {
        if self.crosses(other) {
            return 0.0;
        }
        [
            self.distance_to_point(other.a),
            self.distance_to_point(other.b),
            other.distance_to_point(self.a),
            other.distance_to_point(self.b),
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }
}

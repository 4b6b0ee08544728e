//! Geometric primitives over raw 2D coordinates.
//!
//! These functions know nothing about landmarks or visibility; callers decide
//! which points are reliable enough to feed in.

use crate::constants::EPSILON;
use serde::{Deserialize, Serialize};

/// A 2D point, in whatever unit the caller works in
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Angle at vertex `b` between rays `b→a` and `b→c`, in degrees `[0, 180]`.
///
/// Coincident points leave the angle undefined; this returns `0.0` instead of
/// failing, since landmark jitter can collapse an edge to zero length.
#[must_use]
pub fn angle(a: Point, b: Point, c: Point) -> f64 {
    let v1 = (a.x - b.x, a.y - b.y);
    let v2 = (c.x - b.x, c.y - b.y);

    let mag1 = v1.0.hypot(v1.1);
    let mag2 = v2.0.hypot(v2.1);

    if mag1 < EPSILON || mag2 < EPSILON {
        return 0.0;
    }

    let cos_angle = ((v1.0 * v2.0 + v1.1 * v2.1) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Angle of the line `a→b` from horizontal, in degrees `[-90, 90]`.
///
/// A vertical line yields `90` when `b` lies below `a` in image coordinates and
/// `-90` otherwise.
#[must_use]
pub fn slope_angle(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    if dx == 0.0 {
        return if dy > 0.0 { 90.0 } else { -90.0 };
    }

    (dy / dx).atan().to_degrees()
}

/// Euclidean distance between two points
#[must_use]
pub fn euclidean_distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Whether `a` lies above `b` by more than `threshold` (image y grows downward)
#[must_use]
pub fn is_point_above(a: Point, b: Point, threshold: f64) -> bool {
    a.y < b.y - threshold
}

/// Whether `a` lies left of `b` by more than `threshold`
#[must_use]
pub fn is_point_to_left(a: Point, b: Point, threshold: f64) -> bool {
    a.x < b.x - threshold
}

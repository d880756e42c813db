//! Extreme Point anchors for 3D container loading.
//!
//! Anchors are candidate positions for the lower-back-left corner of the next
//! item. Instead of scanning free space, each placed box contributes the
//! points where a neighbour would touch it: on top of it, past its far end
//! along the length and past its far side along the width.
//!
//! # References
//!
//! - Crainic, T. G., Perboli, G., & Tadei, R. (2008). Extreme point-based heuristics
//!   for three-dimensional bin packing.

use nalgebra::{Point3, Vector3};
use std::cmp::Ordering;
use stowage_core::{AABB3D, EPSILON_PACK};

/// A box committed to the container being filled.
#[derive(Debug, Clone)]
pub struct PlacedBox {
    /// Position (min corner).
    pub position: Point3<f64>,
    /// Dimensions after rotation.
    pub dimensions: Vector3<f64>,
    /// Whether other boxes may rest on top.
    pub stackable: bool,
    /// Weight of the box.
    pub weight: f64,
}

impl PlacedBox {
    /// Creates a placed box.
    pub fn new(position: Point3<f64>, dimensions: Vector3<f64>, stackable: bool) -> Self {
        Self {
            position,
            dimensions,
            stackable,
            weight: 0.0,
        }
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Returns the max corner of the box.
    pub fn max_corner(&self) -> Point3<f64> {
        self.position + self.dimensions
    }

    /// Height of the top face.
    pub fn top(&self) -> f64 {
        self.position.y + self.dimensions.y
    }

    /// Returns the occupied AABB.
    pub fn aabb(&self) -> AABB3D<f64> {
        AABB3D::from_origin(self.position, self.dimensions)
    }

    /// Extreme points contributed by this box.
    fn extreme_points(&self) -> impl Iterator<Item = Point3<f64>> {
        let p = self.position;
        let max = self.max_corner();
        let above = self.stackable.then(|| Point3::new(p.x, max.y, p.z));
        above.into_iter().chain([
            Point3::new(max.x, p.y, p.z),
            Point3::new(p.x, p.y, max.z),
        ])
    }
}

#[inline]
fn grid(v: f64) -> i64 {
    (v / EPSILON_PACK).round() as i64
}

/// Lexicographic (x, y, z) order on points snapped to the packing tolerance.
pub fn anchor_order(a: &Point3<f64>, b: &Point3<f64>) -> Ordering {
    (grid(a.x), grid(a.y), grid(a.z)).cmp(&(grid(b.x), grid(b.y), grid(b.z)))
}

/// Returns true if `a` comes strictly before `b` in (x, y, z) order, with
/// coordinates within tolerance treated as equal.
pub fn precedes(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    for (pa, pb) in [(a.x, b.x), (a.y, b.y), (a.z, b.z)] {
        if (pa - pb).abs() > EPSILON_PACK {
            return pa < pb;
        }
    }
    false
}

fn same_point(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    (a.x - b.x).abs() < EPSILON_PACK
        && (a.y - b.y).abs() < EPSILON_PACK
        && (a.z - b.z).abs() < EPSILON_PACK
}

/// Candidate anchors for the next box, in try order.
///
/// The origin is always present. Points are sorted by (x, y, z) ascending
/// and points within tolerance of an earlier one are dropped.
pub fn candidate_anchors(placed: &[PlacedBox]) -> Vec<Point3<f64>> {
    let mut points: Vec<Point3<f64>> = std::iter::once(Point3::origin())
        .chain(placed.iter().flat_map(PlacedBox::extreme_points))
        .collect();
    points.sort_by(anchor_order);

    let mut anchors: Vec<Point3<f64>> = Vec::with_capacity(points.len());
    for p in points {
        if !anchors.iter().any(|a| same_point(a, &p)) {
            anchors.push(p);
        }
    }
    anchors
}

//! Rotation angles and axis-aligned bounding boxes.
//!
//! Axis convention throughout the engine: x runs along the container length,
//! y is vertical and z runs along the container width.

use nalgebra::{Matrix3, Point3, RealField, Rotation3, Vector3};
use std::f64::consts::FRAC_PI_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A quarter turn in radians.
pub const QUARTER_TURN: f64 = FRAC_PI_2;

/// Rotation matrix entries closer than this to -1, 0 or 1 are snapped.
const SNAP_EPSILON: f64 = 1e-12;

/// Euler angles (radians) applied to an item, in x-y-z order.
///
/// Only 0 and a quarter turn are produced by the orientation enumerator, but
/// the bounding box math works for any angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotationAngles {
    /// Rotation about the length axis.
    pub x: f64,
    /// Rotation about the vertical axis.
    pub y: f64,
    /// Rotation about the width axis.
    pub z: f64,
}

impl RotationAngles {
    /// Creates rotation angles from radians.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Returns true if no rotation is applied.
    pub fn is_identity(&self) -> bool {
        self.key() == (0, 0, 0)
    }

    /// Angles in degrees.
    pub fn to_degrees(&self) -> (f64, f64, f64) {
        (self.x.to_degrees(), self.y.to_degrees(), self.z.to_degrees())
    }

    /// Deduplication key: angles rounded to four decimals.
    pub fn key(&self) -> (i64, i64, i64) {
        let round = |a: f64| (a * 10_000.0).round() as i64;
        (round(self.x), round(self.y), round(self.z))
    }

    /// Rotation matrix `Rx * Ry * Rz` with floating noise snapped away.
    pub fn matrix(&self) -> Matrix3<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.z);
        (rx * ry * rz).matrix().map(snap_unit)
    }

    /// Axis-aligned extent of a box of the given size after this rotation.
    ///
    /// The box is rotated about its center; the result is the size of the
    /// world-space bounding box of its eight corners.
    pub fn rotated_extent(&self, extent: &Vector3<f64>) -> Vector3<f64> {
        let m = self.matrix();
        let half = extent / 2.0;
        let mut corners = Vec::with_capacity(8);
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    let corner = Vector3::new(sx * half.x, sy * half.y, sz * half.z);
                    corners.push(Point3::from(m * corner));
                }
            }
        }

        AABB3D::from_points(&corners)
            .map(|aabb| aabb.extent())
            .unwrap_or(*extent)
    }
}

fn snap_unit(v: f64) -> f64 {
    for target in [-1.0, 0.0, 1.0] {
        if (v - target).abs() < SNAP_EPSILON {
            return target;
        }
    }
    v
}

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AABB3D<S: RealField + Copy> {
    /// Minimum corner.
    pub min: Point3<S>,
    /// Maximum corner.
    pub max: Point3<S>,
}

impl<S: RealField + Copy> AABB3D<S> {
    /// Creates a new AABB from min/max corners.
    pub fn new(min: Point3<S>, max: Point3<S>) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from its minimum corner and size.
    pub fn from_origin(origin: Point3<S>, size: Vector3<S>) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Creates an AABB from a set of points.
    pub fn from_points(points: &[Point3<S>]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;

        for p in points.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    /// Returns the size along each axis.
    pub fn extent(&self) -> Vector3<S> {
        self.max - self.min
    }

    /// Returns the volume of the AABB.
    pub fn volume(&self) -> S {
        let e = self.extent();
        e.x * e.y * e.z
    }

    /// Returns the center point of the AABB.
    pub fn center(&self) -> Point3<S> {
        nalgebra::center(&self.min, &self.max)
    }
}

impl AABB3D<f64> {
    /// Returns true if the two boxes share positive volume.
    ///
    /// Intervals are shrunk by `epsilon` so touching faces do not count.
    pub fn overlaps(&self, other: &Self, epsilon: f64) -> bool {
        self.overlaps_x(other, epsilon)
            && overlap_1d(self.min.y, self.max.y, other.min.y, other.max.y, epsilon)
            && self.overlaps_z(other, epsilon)
    }

    /// Returns true if the footprints (x/z projections) share positive area.
    pub fn footprint_overlaps(&self, other: &Self, epsilon: f64) -> bool {
        self.overlaps_x(other, epsilon) && self.overlaps_z(other, epsilon)
    }

    /// Returns the extent of the footprint intersection along x and z.
    ///
    /// Negative values mean the footprints are disjoint on that axis.
    pub fn footprint_contact(&self, other: &Self) -> (f64, f64) {
        let dx = self.max.x.min(other.max.x) - self.min.x.max(other.min.x);
        let dz = self.max.z.min(other.max.z) - self.min.z.max(other.min.z);
        (dx, dz)
    }

    /// Returns true if this box lies within `outer`, allowing `epsilon` slack.
    pub fn within(&self, outer: &Self, epsilon: f64) -> bool {
        self.min.x >= outer.min.x - epsilon
            && self.max.x <= outer.max.x + epsilon
            && self.min.y >= outer.min.y - epsilon
            && self.max.y <= outer.max.y + epsilon
            && self.min.z >= outer.min.z - epsilon
            && self.max.z <= outer.max.z + epsilon
    }

    fn overlaps_x(&self, other: &Self, epsilon: f64) -> bool {
        overlap_1d(self.min.x, self.max.x, other.min.x, other.max.x, epsilon)
    }

    fn overlaps_z(&self, other: &Self, epsilon: f64) -> bool {
        overlap_1d(self.min.z, self.max.z, other.min.z, other.max.z, epsilon)
    }
}

#[inline]
fn overlap_1d(a_min: f64, a_max: f64, b_min: f64, b_max: f64, epsilon: f64) -> bool {
    a_min < b_max - epsilon && a_max > b_min + epsilon
}

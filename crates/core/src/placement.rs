//! Placement record for a loaded item instance.

use nalgebra::{Point3, Vector3};

use crate::transform::{RotationAngles, AABB3D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of an item definition.
pub type ItemId = String;

/// The placement of one item instance inside a container.
///
/// `position` is the lower-back-left corner in container-local coordinates
/// and is the canonical record; render positions are derived from it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// The ID of the item definition.
    pub item_id: ItemId,

    /// Display name of the item definition.
    pub name: String,

    /// Unique instance identifier (`{item_id}_instance_{n}`).
    pub instance_id: String,

    /// Instance ordinal (0-based) within the item's quantity.
    pub instance: usize,

    /// Index of the container this instance was loaded into.
    pub container_index: usize,

    /// Lower-back-left corner (x = length, y = height, z = width).
    pub position: Point3<f64>,

    /// Applied rotation.
    pub rotation: RotationAngles,

    /// Bounding box size after rotation (x = length, y = height, z = width).
    pub dimensions: Vector3<f64>,

    /// Nominal dimensions before rotation (length, height, width).
    pub nominal_dimensions: Vector3<f64>,

    /// Weight of the instance.
    pub weight: f64,

    /// Resolved display color (`#RRGGBB`).
    pub color: String,
}

impl Placement {
    /// Returns the occupied bounding box in container coordinates.
    pub fn aabb(&self) -> AABB3D<f64> {
        AABB3D::from_origin(self.position, self.dimensions)
    }

    /// Returns the max corner of the bounding box.
    pub fn max_corner(&self) -> Point3<f64> {
        self.position + self.dimensions
    }

    /// Returns the bounding box volume.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Returns true if the instance sits on the container floor.
    pub fn on_floor(&self, epsilon: f64) -> bool {
        self.position.y.abs() <= epsilon
    }

    /// Render-space center of the instance.
    ///
    /// Containers are laid out along x, centered on the origin and separated
    /// by `gap`; each container is centered on its own x/z midpoint with its
    /// floor at y = 0.
    pub fn world_center(
        &self,
        container_length: f64,
        container_width: f64,
        container_count: usize,
        gap: f64,
    ) -> Point3<f64> {
        let offset_x = container_offset_x(
            self.container_index,
            container_count,
            container_length,
            gap,
        );
        let center = self.aabb().center();
        Point3::new(
            center.x - container_length / 2.0 + offset_x,
            center.y,
            center.z - container_width / 2.0,
        )
    }
}

/// X offset of container `index` when `count` containers are shown side by side.
pub fn container_offset_x(index: usize, count: usize, length: f64, gap: f64) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    let mid = (count - 1) as f64 / 2.0;
    (index as f64 - mid) * (length + gap)
}

/// Placement statistics for a set of placements.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementStats {
    /// Total number of placements.
    pub count: usize,
    /// Number of placements with a non-identity rotation.
    pub rotated_count: usize,
    /// Number of placements stacked above the floor.
    pub stacked_count: usize,
    /// Distribution of placements per container.
    pub container_distribution: std::collections::BTreeMap<usize, usize>,
}

impl PlacementStats {
    /// Computes statistics from a set of placements.
    pub fn from_placements(placements: &[Placement]) -> Self {
        let mut stats = Self {
            count: placements.len(),
            ..Default::default()
        };

        for p in placements {
            if !p.rotation.is_identity() {
                stats.rotated_count += 1;
            }
            if !p.on_floor(1e-3) {
                stats.stacked_count += 1;
            }
            *stats
                .container_distribution
                .entry(p.container_index)
                .or_insert(0) += 1;
        }

        stats
    }
}

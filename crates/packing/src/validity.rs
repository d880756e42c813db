//! Placement admissibility: bounds, overlap and support.

use nalgebra::{Point3, Vector3};
use stowage_core::{AABB3D, EPSILON_VALIDITY};

use crate::boundary::ContainerSpec;
use crate::extreme_point::PlacedBox;

/// Checks whether a box of size `dims` may be placed at `position`.
///
/// Checks run in order and stop at the first failure:
/// 1. the box lies within the container,
/// 2. it shares no volume with an existing box,
/// 3. when above the floor, nothing non-stackable sits under any part of
///    its base and at least one stackable top face gives it contact of
///    positive area.
pub fn is_valid(
    position: &Point3<f64>,
    dims: &Vector3<f64>,
    container: &ContainerSpec,
    existing: &[PlacedBox],
) -> bool {
    let eps = EPSILON_VALIDITY;
    let candidate = AABB3D::from_origin(*position, *dims);

    if !candidate.within(&container.aabb(), eps) {
        return false;
    }

    if existing.iter().any(|b| candidate.overlaps(&b.aabb(), eps)) {
        return false;
    }

    if position.y > eps {
        return is_supported(&candidate, existing, eps);
    }

    true
}

fn is_supported(candidate: &AABB3D<f64>, existing: &[PlacedBox], eps: f64) -> bool {
    let base = candidate.min.y;
    let under = |b: &&PlacedBox| (b.top() - base).abs() < eps;

    // Any footprint overlap with a non-stackable top rules the pose out,
    // whatever else is underneath.
    let on_fragile = existing
        .iter()
        .filter(under)
        .filter(|b| !b.stackable)
        .any(|b| candidate.footprint_overlaps(&b.aabb(), eps));
    if on_fragile {
        return false;
    }

    existing.iter().filter(under).filter(|b| b.stackable).any(|b| {
        let (dx, dz) = candidate.footprint_contact(&b.aabb());
        dx > eps && dz > eps
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> ContainerSpec {
        ContainerSpec::new(2.0, 2.0, 2.0)
    }

    fn unit() -> Vector3<f64> {
        Vector3::new(1.0, 1.0, 1.0)
    }

    fn floor_box(x: f64, z: f64, stackable: bool) -> PlacedBox {
        PlacedBox::new(Point3::new(x, 0.0, z), unit(), stackable)
    }

    #[test]
    fn test_bounds() {
        assert!(is_valid(&Point3::origin(), &unit(), &container(), &[]));
        assert!(is_valid(&Point3::new(1.0, 0.0, 1.0), &unit(), &container(), &[]));
        assert!(!is_valid(&Point3::new(1.5, 0.0, 0.0), &unit(), &container(), &[]));
        // Float noise within tolerance is absorbed.
        assert!(is_valid(
            &Point3::new(1.000_5, 0.0, 0.0),
            &unit(),
            &container(),
            &[]
        ));
    }

    #[test]
    fn test_overlap() {
        let existing = vec![floor_box(0.0, 0.0, true)];
        assert!(!is_valid(&Point3::new(0.5, 0.0, 0.5), &unit(), &container(), &existing));
        // Face contact is fine.
        assert!(is_valid(&Point3::new(1.0, 0.0, 0.0), &unit(), &container(), &existing));
    }

    #[test]
    fn test_floating_rejected() {
        let existing = vec![floor_box(0.0, 0.0, true)];
        assert!(!is_valid(&Point3::new(1.0, 1.0, 0.0), &unit(), &container(), &existing));
    }

    #[test]
    fn test_supported_on_stackable() {
        let existing = vec![floor_box(0.0, 0.0, true)];
        assert!(is_valid(&Point3::new(0.0, 1.0, 0.0), &unit(), &container(), &existing));
        // Partial contact is enough.
        let half = Vector3::new(1.0, 1.0, 0.5);
        assert!(is_valid(&Point3::new(0.5, 1.0, 0.0), &half, &container(), &existing));
    }

    #[test]
    fn test_edge_contact_is_not_support() {
        let existing = vec![floor_box(0.0, 0.0, true)];
        // Touches the supporting top only along an edge.
        assert!(!is_valid(&Point3::new(1.0, 1.0, 0.0), &unit(), &container(), &existing));
    }

    #[test]
    fn test_non_stackable_blocks_even_with_other_support() {
        let existing = vec![floor_box(0.0, 0.0, true), floor_box(1.0, 0.0, false)];
        let wide = Vector3::new(2.0, 1.0, 1.0);
        assert!(!is_valid(&Point3::new(0.0, 1.0, 0.0), &wide, &container(), &existing));
        assert!(!is_valid(&Point3::new(1.0, 1.0, 0.0), &unit(), &container(), &existing));
        assert!(is_valid(&Point3::new(0.0, 1.0, 0.0), &unit(), &container(), &existing));
    }
}

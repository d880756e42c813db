//! Candidate orientation enumeration.

use crate::boundary::ContainerSpec;
use crate::geometry::{ItemSpec, Shape};
use stowage_core::{RotationAngles, EPSILON_PACK, QUARTER_TURN};

/// Orientations to try for an item, in search priority order.
///
/// The identity comes first. Boxes then get each permitted single-axis
/// quarter turn (x, y, z) followed by the compound turns (x+y, x+z, y+z)
/// whose axes are both permitted. Cylinders only get single-axis turns,
/// in the order y, x, z. Duplicates by rounded angle are dropped.
pub fn candidate_orientations(item: &ItemSpec) -> Vec<RotationAngles> {
    let allow = item.rotation();
    let r = QUARTER_TURN;
    let mut candidates = vec![RotationAngles::identity()];

    match item.shape() {
        Shape::Box { .. } => {
            if allow.x {
                candidates.push(RotationAngles::new(r, 0.0, 0.0));
            }
            if allow.y {
                candidates.push(RotationAngles::new(0.0, r, 0.0));
            }
            if allow.z {
                candidates.push(RotationAngles::new(0.0, 0.0, r));
            }
            if allow.x && allow.y {
                candidates.push(RotationAngles::new(r, r, 0.0));
            }
            if allow.x && allow.z {
                candidates.push(RotationAngles::new(r, 0.0, r));
            }
            if allow.y && allow.z {
                candidates.push(RotationAngles::new(0.0, r, r));
            }
        }
        Shape::Cylinder { .. } => {
            if allow.y {
                candidates.push(RotationAngles::new(0.0, r, 0.0));
            }
            if allow.x {
                candidates.push(RotationAngles::new(r, 0.0, 0.0));
            }
            if allow.z {
                candidates.push(RotationAngles::new(0.0, 0.0, r));
            }
        }
    }

    let mut seen = Vec::with_capacity(candidates.len());
    candidates.retain(|rot| {
        let key = rot.key();
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });
    candidates
}

/// Returns true if the item fits the empty container in at least one of its
/// candidate orientations.
pub fn fits_any_orientation(item: &ItemSpec, container: &ContainerSpec) -> bool {
    let interior = container.extent();
    candidate_orientations(item).iter().any(|rot| {
        let dims = item.effective_dimensions(rot);
        dims.x <= interior.x + EPSILON_PACK
            && dims.y <= interior.y + EPSILON_PACK
            && dims.z <= interior.z + EPSILON_PACK
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RotationPermissions;

    #[test]
    fn test_box_all_axes() {
        let item = ItemSpec::box_shape("B1", 1.0, 2.0, 3.0);
        let orientations = candidate_orientations(&item);

        assert_eq!(orientations.len(), 7);
        assert!(orientations[0].is_identity());
        assert_eq!(orientations[1], RotationAngles::new(QUARTER_TURN, 0.0, 0.0));
        assert_eq!(
            orientations[6],
            RotationAngles::new(0.0, QUARTER_TURN, QUARTER_TURN)
        );
    }

    #[test]
    fn test_box_fixed() {
        let item =
            ItemSpec::box_shape("B1", 1.0, 2.0, 3.0).with_rotation(RotationPermissions::none());
        let orientations = candidate_orientations(&item);
        assert_eq!(orientations, vec![RotationAngles::identity()]);
    }

    #[test]
    fn test_box_upright_only() {
        let item =
            ItemSpec::box_shape("B1", 1.0, 2.0, 3.0).with_rotation(RotationPermissions::upright());
        let orientations = candidate_orientations(&item);
        assert_eq!(orientations.len(), 2);
        assert_eq!(orientations[1], RotationAngles::new(0.0, QUARTER_TURN, 0.0));
    }

    #[test]
    fn test_cylinder_order() {
        let drum = ItemSpec::cylinder("D1", 0.5, 1.0);
        let orientations = candidate_orientations(&drum);

        assert_eq!(orientations.len(), 4);
        assert_eq!(orientations[1], RotationAngles::new(0.0, QUARTER_TURN, 0.0));
        assert_eq!(orientations[2], RotationAngles::new(QUARTER_TURN, 0.0, 0.0));
        assert_eq!(orientations[3], RotationAngles::new(0.0, 0.0, QUARTER_TURN));
    }

    #[test]
    fn test_enumeration_is_deterministic() {
        let item = ItemSpec::box_shape("B1", 1.0, 2.0, 3.0);
        assert_eq!(candidate_orientations(&item), candidate_orientations(&item));
    }

    #[test]
    fn test_fits_any_orientation() {
        let container = ContainerSpec::new(2.0, 2.0, 2.0);
        let too_big = ItemSpec::box_shape("B1", 3.0, 3.0, 3.0);
        assert!(!fits_any_orientation(&too_big, &container));

        // Tall item only fits when laid down.
        let container = ContainerSpec::new(3.0, 1.0, 1.0);
        let tall = ItemSpec::box_shape("B2", 1.0, 1.0, 3.0);
        assert!(fits_any_orientation(&tall, &container));
        let fixed = tall.with_rotation(RotationPermissions::none());
        assert!(!fits_any_orientation(&fixed, &container));
    }
}

//! Item instances: one physical unit per unit of item quantity.

use nalgebra::{Point3, Vector3};
use std::cmp::Ordering;
use stowage_core::{RotationAngles, UnplacedReason, EPSILON_PACK};

use crate::geometry::ItemSpec;

/// One physical unit of an item definition, alive for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInstance {
    /// Index of the item definition in the input slice.
    pub item_index: usize,
    /// Unique identifier (`{item_id}_instance_{n}`).
    pub instance_id: String,
    /// Ordinal within the item's quantity.
    pub ordinal: usize,
    /// Applied rotation once placed.
    pub rotation: RotationAngles,
    /// Effective dimensions under `rotation`.
    pub dimensions: Vector3<f64>,
    /// Whether the instance has been committed to a container.
    pub placed: bool,
    /// Lower-back-left corner in container-local coordinates.
    pub position: Option<Point3<f64>>,
    /// Container the instance was loaded into.
    pub container_index: Option<usize>,
    /// Reasons collected from failed container attempts.
    pub failures: Vec<UnplacedReason>,
}

impl ItemInstance {
    /// Creates an unplaced instance of `item`.
    pub fn new(item_index: usize, item: &ItemSpec, ordinal: usize) -> Self {
        Self {
            item_index,
            instance_id: format!("{}_instance_{}", item.id(), ordinal),
            ordinal,
            rotation: RotationAngles::identity(),
            dimensions: item.nominal_extent(),
            placed: false,
            position: None,
            container_index: None,
            failures: Vec::new(),
        }
    }

    /// Records a failed attempt. Repeated reasons are kept once.
    pub fn record_failure(&mut self, reason: UnplacedReason) {
        if !self.failures.contains(&reason) {
            self.failures.push(reason);
        }
    }

    /// Commits the instance to a container.
    pub fn commit(
        &mut self,
        container_index: usize,
        position: Point3<f64>,
        rotation: RotationAngles,
        dimensions: Vector3<f64>,
    ) {
        self.placed = true;
        self.container_index = Some(container_index);
        self.position = Some(position);
        self.rotation = rotation;
        self.dimensions = dimensions;
    }
}

/// Expands item quantities into instances, in item order.
pub fn expand_instances(items: &[ItemSpec]) -> Vec<ItemInstance> {
    items
        .iter()
        .enumerate()
        .flat_map(|(idx, item)| {
            (0..item.quantity()).map(move |n| ItemInstance::new(idx, item, n))
        })
        .collect()
}

/// Sorts instances largest first: by nominal volume descending, then by
/// largest dimension descending. Volumes within tolerance count as equal and
/// equal keys keep their input order.
pub fn sort_instances(instances: &mut [ItemInstance], items: &[ItemSpec]) {
    let volume_key =
        |inst: &ItemInstance| (items[inst.item_index].volume() / EPSILON_PACK).round() as i64;
    instances.sort_by(|a, b| {
        volume_key(b).cmp(&volume_key(a)).then_with(|| {
            let da = items[a.item_index].max_dimension();
            let db = items[b.item_index].max_dimension();
            db.partial_cmp(&da).unwrap_or(Ordering::Equal)
        })
    });
}

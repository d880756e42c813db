//! Greedy FFD / BFD loading of a single container.

use std::time::Instant;

use log::debug;
use nalgebra::{Point3, Vector3};
use stowage_core::{
    Placement, ProgressCallback, ProgressInfo, RotationAngles, Strategy, UnplacedReason,
    EPSILON_PACK,
};

use crate::boundary::ContainerSpec;
use crate::extreme_point::{candidate_anchors, precedes, PlacedBox};
use crate::geometry::ItemSpec;
use crate::instance::ItemInstance;
use crate::orientation::candidate_orientations;
use crate::validity::is_valid;

/// Colors handed out to items without their own display color.
pub const FALLBACK_PALETTE: [&str; 6] = [
    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF",
];

/// State that lives for one packing run.
pub struct RunContext<'a> {
    strategy: Strategy,
    total: usize,
    placed: usize,
    palette_cursor: usize,
    start: Instant,
    progress: Option<&'a ProgressCallback>,
}

impl<'a> RunContext<'a> {
    /// Creates a context for a run over `total` instances.
    pub fn new(strategy: Strategy, total: usize) -> Self {
        Self {
            strategy,
            total,
            placed: 0,
            palette_cursor: 0,
            start: Instant::now(),
            progress: None,
        }
    }

    /// Attaches a progress callback.
    pub fn with_progress(mut self, callback: &'a ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Strategy of this run.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Instances placed so far across containers.
    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Milliseconds since the run started.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn resolve_color(&mut self, item: &ItemSpec) -> String {
        match item.color() {
            Some(c) => c.to_string(),
            None => {
                let c = FALLBACK_PALETTE[self.palette_cursor % FALLBACK_PALETTE.len()];
                self.palette_cursor += 1;
                c.to_string()
            }
        }
    }
}

/// A chosen pose for one instance.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    position: Point3<f64>,
    rotation: RotationAngles,
    dimensions: Vector3<f64>,
}

/// What one container ended up holding.
#[derive(Debug, Clone, Default)]
pub struct ContainerLoad {
    /// Container index.
    pub index: usize,
    /// Committed placements, in commit order.
    pub placements: Vec<Placement>,
    /// Boxes in the container, used for anchors and validity.
    pub boxes: Vec<PlacedBox>,
    /// Total loaded weight.
    pub weight: f64,
}

impl ContainerLoad {
    /// Total loaded bounding-box volume.
    pub fn volume(&self) -> f64 {
        self.placements.iter().map(Placement::volume).sum()
    }
}

/// Loads instances from `pool` into container `index`.
///
/// The pool must already be in packing order. Placed instances are marked
/// committed; the rest get a failure reason for this container.
pub fn pack_container(
    items: &[ItemSpec],
    container: &ContainerSpec,
    index: usize,
    pool: &mut [ItemInstance],
    ctx: &mut RunContext<'_>,
) -> ContainerLoad {
    let strategy = ctx.strategy;
    let mut load = ContainerLoad {
        index,
        ..Default::default()
    };
    ctx.palette_cursor = 0;

    debug!(
        "Container {}: trying {} instances with {}",
        index + 1,
        pool.len(),
        strategy.abbreviation()
    );

    for inst in pool.iter_mut().filter(|i| !i.placed) {
        let item = &items[inst.item_index];

        if load.weight + item.weight() > container.max_payload() + EPSILON_PACK {
            inst.record_failure(UnplacedReason::ExceedsWeightLimit {
                container: index,
                strategy,
            });
            continue;
        }

        let anchors = candidate_anchors(&load.boxes);
        let found = match strategy {
            Strategy::FirstFitDecreasing => first_fit(item, container, &anchors, &load.boxes),
            Strategy::BestFitDecreasing => best_fit(item, container, &anchors, &load.boxes),
        };

        let Some(c) = found else {
            inst.record_failure(UnplacedReason::NoSuitableSpace {
                container: index,
                strategy,
            });
            continue;
        };

        inst.commit(index, c.position, c.rotation, c.dimensions);
        load.boxes.push(
            PlacedBox::new(c.position, c.dimensions, item.is_stackable())
                .with_weight(item.weight()),
        );
        load.weight += item.weight();

        let color = ctx.resolve_color(item);
        load.placements.push(Placement {
            item_id: item.id().clone(),
            name: item.name().to_string(),
            instance_id: inst.instance_id.clone(),
            instance: inst.ordinal,
            container_index: index,
            position: c.position,
            rotation: c.rotation,
            dimensions: c.dimensions,
            nominal_dimensions: item.nominal_extent(),
            weight: item.weight(),
            color,
        });
        ctx.placed += 1;

        debug!(
            "Placed {} at ({:.3}, {:.3}, {:.3}) in container {}",
            inst.instance_id,
            c.position.x,
            c.position.y,
            c.position.z,
            index + 1
        );

        if let Some(callback) = ctx.progress {
            callback(ProgressInfo {
                container_index: index,
                placed: ctx.placed,
                total: ctx.total,
                container_weight: load.weight,
                elapsed_ms: ctx.elapsed_ms(),
            });
        }
    }

    load
}

/// First admissible pose in orientation-major, anchor-minor order.
fn first_fit(
    item: &ItemSpec,
    container: &ContainerSpec,
    anchors: &[Point3<f64>],
    boxes: &[PlacedBox],
) -> Option<Candidate> {
    for rotation in candidate_orientations(item) {
        let dims = item.effective_dimensions(&rotation);
        if let Some(anchor) = anchors
            .iter()
            .find(|a| is_valid(a, &dims, container, boxes))
        {
            return Some(Candidate {
                position: *anchor,
                rotation,
                dimensions: dims,
            });
        }
    }
    None
}

/// Admissible pose with the smallest (x, y, z) anchor; earliest wins ties.
fn best_fit(
    item: &ItemSpec,
    container: &ContainerSpec,
    anchors: &[Point3<f64>],
    boxes: &[PlacedBox],
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for rotation in candidate_orientations(item) {
        let dims = item.effective_dimensions(&rotation);
        for anchor in anchors {
            if !is_valid(anchor, &dims, container, boxes) {
                continue;
            }
            let better = match &best {
                None => true,
                Some(b) => precedes(anchor, &b.position),
            };
            if better {
                best = Some(Candidate {
                    position: *anchor,
                    rotation,
                    dimensions: dims,
                });
            }
        }
    }
    best
}

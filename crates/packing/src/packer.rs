//! Multi-container loading solver.

use crate::boundary::ContainerSpec;
use crate::geometry::ItemSpec;
use crate::instance::{expand_instances, sort_instances, ItemInstance};
use crate::orientation::fits_any_orientation;
use crate::strategy::{pack_container, ContainerLoad, RunContext};
use stowage_core::solver::{Config, ProgressCallback, Solver};
use stowage_core::{
    ContainerSummary, PackingResult, Placement, Result, UnplacedReason, UnplacedReport,
};

use nalgebra::Point3;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Container loading solver.
///
/// Fills identical containers in order, carrying whatever did not fit into
/// the next one.
pub struct Packer {
    config: Config,
    cancelled: Arc<AtomicBool>,
}

impl Packer {
    /// Creates a new packer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a handle that cancels the run when set, e.g. from another thread.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Render-space center of a placement for this packer's layout.
    pub fn world_position(&self, placement: &Placement, container: &ContainerSpec) -> Point3<f64> {
        world_position(
            placement,
            container,
            self.config.container_count,
            self.config.container_gap,
        )
    }

    fn validate(&self, items: &[ItemSpec], container: &ContainerSpec) -> Result<()> {
        self.config.validate()?;
        container.validate()?;
        for item in items {
            item.validate()?;
        }
        Ok(())
    }

    fn run(
        &self,
        items: &[ItemSpec],
        container: &ContainerSpec,
        progress: Option<&ProgressCallback>,
    ) -> Result<PackingResult> {
        self.validate(items, container)?;
        self.cancelled.store(false, Ordering::Relaxed);

        let start = Instant::now();
        let strategy = self.config.strategy;
        let count = self.config.container_count;

        let instances = expand_instances(items);
        let total = instances.len();
        let mut ctx = RunContext::new(strategy, total);
        if let Some(callback) = progress {
            ctx = ctx.with_progress(callback);
        }

        // Items that fit in no orientation never enter a container.
        let fits: Vec<bool> = items
            .iter()
            .map(|item| fits_any_orientation(item, container))
            .collect();
        let (mut pool, mut oversized): (Vec<ItemInstance>, Vec<ItemInstance>) =
            instances.into_iter().partition(|inst| fits[inst.item_index]);
        for inst in &mut oversized {
            inst.record_failure(UnplacedReason::ExceedsContainerDimensions);
        }
        for (item, _) in items.iter().zip(&fits).filter(|(_, fits)| !**fits) {
            log::warn!(
                "'{}' exceeds the container in every orientation, skipping {} unit(s)",
                item.name(),
                item.quantity()
            );
        }

        sort_instances(&mut pool, items);

        let mut loads: Vec<ContainerLoad> = Vec::with_capacity(count);
        let mut cancelled = false;
        for index in 0..count {
            if self.cancelled.load(Ordering::Relaxed) {
                log::warn!("Run cancelled before container {}", index + 1);
                cancelled = true;
                break;
            }
            if pool.is_empty() {
                loads.push(ContainerLoad {
                    index,
                    ..Default::default()
                });
                continue;
            }

            let load = pack_container(items, container, index, &mut pool, &mut ctx);
            log::debug!(
                "Container {}: {} placed, {:.1} kg",
                index + 1,
                load.placements.len(),
                load.weight
            );
            loads.push(load);
            pool.retain(|inst| !inst.placed);
        }
        while loads.len() < count {
            let index = loads.len();
            loads.push(ContainerLoad {
                index,
                ..Default::default()
            });
        }

        if !pool.is_empty() {
            log::warn!(
                "{} instance(s) not packed in any of {} container(s)",
                pool.len(),
                count
            );
        }

        // Report in input order so entries appear in item order.
        let mut leftovers: Vec<ItemInstance> = oversized;
        for mut inst in pool {
            inst.record_failure(UnplacedReason::NotPackedInAnyContainer);
            leftovers.push(inst);
        }
        leftovers.sort_by_key(|inst| (inst.item_index, inst.ordinal));
        let mut report = UnplacedReport::new();
        for inst in &leftovers {
            report.record(items[inst.item_index].name(), &inst.failures);
        }

        let mut result = PackingResult::new(strategy);
        result.containers = loads
            .iter()
            .map(|load| summarize(load, container))
            .collect();
        result.placements = loads.into_iter().flat_map(|l| l.placements).collect();
        result.unplaced = report.finish();
        result.total_weight = result.containers.iter().map(|c| c.packed_weight).sum();
        result.total_volume = result.containers.iter().map(|c| c.packed_volume).sum();
        result.utilization = result.total_volume / (container.volume() * count as f64);
        result.containers_used = count;
        result.cancelled = cancelled;
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        log::info!(
            "{}: placed {}/{} instances in {} container(s), utilization {}",
            strategy.abbreviation(),
            result.placed_count(),
            total,
            count,
            result.utilization_percent()
        );

        Ok(result)
    }
}

fn summarize(load: &ContainerLoad, container: &ContainerSpec) -> ContainerSummary {
    let volume = load.volume();
    ContainerSummary {
        index: load.index,
        item_count: load.placements.len(),
        packed_weight: load.weight,
        packed_volume: volume,
        volume_utilization: volume / container.volume(),
        weight_utilization: load.weight / container.max_payload(),
    }
}

/// Render-space center of a placement.
///
/// Containers sit side by side along x, `gap` apart and centered on the
/// origin; each container is centered on its own length and width with its
/// floor at y = 0.
pub fn world_position(
    placement: &Placement,
    container: &ContainerSpec,
    container_count: usize,
    gap: f64,
) -> Point3<f64> {
    placement.world_center(container.length(), container.width(), container_count, gap)
}

impl Solver for Packer {
    type Item = ItemSpec;
    type Container = ContainerSpec;

    fn solve(&self, items: &[Self::Item], container: &Self::Container) -> Result<PackingResult> {
        self.run(items, container, None)
    }

    fn solve_with_progress(
        &self,
        items: &[Self::Item],
        container: &Self::Container,
        callback: ProgressCallback,
    ) -> Result<PackingResult> {
        self.run(items, container, Some(&callback))
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

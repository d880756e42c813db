//! Run reports: console summaries and JSON output.

use serde::Serialize;
use std::fs;
use std::path::Path;
use stowage::packing::{world_position, ContainerSpec};
use stowage::{Config, PackingResult, PackingSummary};

/// Placement position in render space.
#[derive(Debug, Clone, Serialize)]
pub struct WorldPlacement {
    /// Instance identifier.
    pub instance_id: String,
    /// Container index.
    pub container_index: usize,
    /// Center of the instance with containers laid out side by side.
    pub center: [f64; 3],
}

/// Everything written for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Container that was filled.
    pub container: ContainerSpec,
    /// Headline numbers.
    pub summary: PackingSummary,
    /// Full result.
    pub result: PackingResult,
    /// Render-space centers, in placement order.
    pub world: Vec<WorldPlacement>,
}

impl RunReport {
    /// Builds a report for a finished run.
    pub fn new(result: PackingResult, container: &ContainerSpec, config: &Config) -> Self {
        let world = result
            .placements
            .iter()
            .map(|p| {
                let c = world_position(
                    p,
                    container,
                    config.container_count,
                    config.container_gap,
                );
                WorldPlacement {
                    instance_id: p.instance_id.clone(),
                    container_index: p.container_index,
                    center: [c.x, c.y, c.z],
                }
            })
            .collect();

        Self {
            container: container.clone(),
            summary: PackingSummary::from(&result),
            result,
            world,
        }
    }

    /// Saves the report as pretty JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Prints a human readable summary.
    pub fn print_summary(&self) {
        let s = &self.summary;
        println!("\n{}", s.strategy);
        println!("{:-<60}", "");
        println!(
            "  Container:   {} ({:.2} x {:.2} x {:.2} m, {:.0} kg) x {}",
            self.container.name(),
            self.container.length(),
            self.container.width(),
            self.container.height(),
            self.container.max_payload(),
            s.containers
        );
        println!(
            "  Placed:      {}/{} instances",
            s.total_placed, s.total_requested
        );
        println!(
            "  Loaded:      {:.1} kg, {:.3} m3, utilization {:.1}%",
            s.total_weight, s.total_volume, s.utilization_percent
        );
        println!("  Time:        {} ms", s.time_ms);
        if self.result.cancelled {
            println!("  (cancelled)");
        }

        for c in &self.result.containers {
            println!(
                "  Cont. {:<3} items={:<4} weight={:<10.1} volume={:.1}% payload={:.1}%",
                c.index + 1,
                c.item_count,
                c.packed_weight,
                c.volume_utilization * 100.0,
                c.weight_utilization * 100.0
            );
        }

        if !self.result.unplaced.is_empty() {
            println!("\n  Unplaced:");
            for entry in &self.result.unplaced {
                println!(
                    "    {:<20} x{:<4} {}",
                    entry.item_name,
                    entry.quantity,
                    entry.reason()
                );
            }
        }
    }
}

//! Packing result representation.

use std::fmt;

use crate::placement::{Placement, PlacementStats};
use crate::solver::Strategy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why an instance could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum UnplacedReason {
    /// The item fits the container in no orientation. Decided once, before
    /// any container attempt.
    ExceedsContainerDimensions,
    /// Loading the item would exceed the container's remaining payload.
    ExceedsWeightLimit {
        /// Container index (0-based).
        container: usize,
        /// Strategy that attempted the placement.
        strategy: Strategy,
    },
    /// Every orientation and anchor failed bounds, overlap or support.
    NoSuitableSpace {
        /// Container index (0-based).
        container: usize,
        /// Strategy that attempted the placement.
        strategy: Strategy,
    },
    /// Still unplaced after the last requested container.
    NotPackedInAnyContainer,
}

impl fmt::Display for UnplacedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnplacedReason::ExceedsContainerDimensions => {
                write!(f, "Exceeds container dimensions in all orientations.")
            }
            UnplacedReason::ExceedsWeightLimit {
                container,
                strategy,
            } => write!(
                f,
                "Exceeds weight limit (Cont. {} - {}).",
                container + 1,
                strategy.abbreviation()
            ),
            UnplacedReason::NoSuitableSpace {
                container,
                strategy,
            } => write!(
                f,
                "No suitable space/orientation (Cont. {} - {}).",
                container + 1,
                strategy.abbreviation()
            ),
            UnplacedReason::NotPackedInAnyContainer => {
                write!(f, "Not packed in any available container.")
            }
        }
    }
}

/// Consolidated unplaced report line for one item name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnplacedEntry {
    /// Item display name.
    pub item_name: String,
    /// Number of unplaced instances.
    pub quantity: usize,
    /// Distinct reasons, in order of first occurrence.
    pub reasons: Vec<UnplacedReason>,
}

impl UnplacedEntry {
    /// All reasons joined with `"; "`.
    pub fn reason(&self) -> String {
        self.reasons
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Returns true if any reason matches the predicate.
    pub fn has_reason(&self, predicate: impl Fn(&UnplacedReason) -> bool) -> bool {
        self.reasons.iter().any(predicate)
    }
}

/// Accumulates per-instance unplaced records and consolidates them by name.
#[derive(Debug, Default)]
pub struct UnplacedReport {
    entries: Vec<UnplacedEntry>,
}

impl UnplacedReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one unplaced instance with the reasons collected for it.
    ///
    /// Reasons are merged into the entry for `item_name`; duplicates are
    /// dropped, the instance is counted once.
    pub fn record(&mut self, item_name: &str, reasons: &[UnplacedReason]) {
        let idx = match self.entries.iter().position(|e| e.item_name == item_name) {
            Some(idx) => idx,
            None => {
                self.entries.push(UnplacedEntry {
                    item_name: item_name.to_string(),
                    quantity: 0,
                    reasons: Vec::new(),
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[idx];
        entry.quantity += 1;
        for reason in reasons {
            if !entry.reasons.contains(reason) {
                entry.reasons.push(*reason);
            }
        }
    }

    /// Total number of unplaced instances recorded.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Returns the consolidated entries.
    pub fn finish(self) -> Vec<UnplacedEntry> {
        self.entries
    }
}

/// Per-container load statistics.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerSummary {
    /// Container index (0-based).
    pub index: usize,
    /// Number of instances loaded.
    pub item_count: usize,
    /// Total loaded weight.
    pub packed_weight: f64,
    /// Total loaded bounding-box volume.
    pub packed_volume: f64,
    /// Loaded volume / container volume (0.0 - 1.0).
    pub volume_utilization: f64,
    /// Loaded weight / maximum payload (0.0 - 1.0).
    pub weight_utilization: f64,
}

/// Result of a packing run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackingResult {
    /// Placements for all loaded instances, in commit order.
    pub placements: Vec<Placement>,

    /// Consolidated unplaced report.
    pub unplaced: Vec<UnplacedEntry>,

    /// Statistics for each requested container.
    pub containers: Vec<ContainerSummary>,

    /// Total loaded weight across containers.
    pub total_weight: f64,

    /// Total loaded volume across containers.
    pub total_volume: f64,

    /// Loaded volume / total container volume (0.0 - 1.0).
    pub utilization: f64,

    /// Strategy used.
    pub strategy: Strategy,

    /// Number of containers requested for the run.
    pub containers_used: usize,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,

    /// Whether the run was cancelled before the last container.
    pub cancelled: bool,
}

impl PackingResult {
    /// Creates an empty result.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            placements: Vec::new(),
            unplaced: Vec::new(),
            containers: Vec::new(),
            total_weight: 0.0,
            total_volume: 0.0,
            utilization: 0.0,
            strategy,
            containers_used: 0,
            computation_time_ms: 0,
            cancelled: false,
        }
    }

    /// Returns true if every instance was loaded.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Returns the number of loaded instances.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns the number of unplaced instances, summed over all entries.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.iter().map(|e| e.quantity).sum()
    }

    /// Placements loaded into the given container.
    pub fn placements_in(&self, container_index: usize) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(move |p| p.container_index == container_index)
    }

    /// Looks up the unplaced entry for an item name.
    pub fn unplaced_for(&self, item_name: &str) -> Option<&UnplacedEntry> {
        self.unplaced.iter().find(|e| e.item_name == item_name)
    }

    /// Computes placement statistics.
    pub fn placement_stats(&self) -> PlacementStats {
        PlacementStats::from_placements(&self.placements)
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.utilization * 100.0)
    }
}

/// Summary statistics for a packing result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackingSummary {
    /// Total instances requested.
    pub total_requested: usize,
    /// Total instances loaded.
    pub total_placed: usize,
    /// Total instances left behind.
    pub total_unplaced: usize,
    /// Loaded weight.
    pub total_weight: f64,
    /// Loaded volume.
    pub total_volume: f64,
    /// Utilization percentage.
    pub utilization_percent: f64,
    /// Number of containers.
    pub containers: usize,
    /// Computation time in milliseconds.
    pub time_ms: u64,
    /// Strategy used.
    pub strategy: String,
}

impl From<&PackingResult> for PackingSummary {
    fn from(result: &PackingResult) -> Self {
        Self {
            total_requested: result.placed_count() + result.unplaced_count(),
            total_placed: result.placed_count(),
            total_unplaced: result.unplaced_count(),
            total_weight: result.total_weight,
            total_volume: result.total_volume,
            utilization_percent: result.utilization * 100.0,
            containers: result.containers_used,
            time_ms: result.computation_time_ms,
            strategy: result.strategy.name().to_string(),
        }
    }
}

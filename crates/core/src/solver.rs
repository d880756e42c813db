//! Solver traits and configuration.

use std::fmt;
use std::str::FromStr;

use crate::result::PackingResult;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Packing strategy.
///
/// Both strategies sort instances by descending volume, then by descending
/// largest dimension. They differ only in how a placement is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// First-Fit-Decreasing: commit the first admissible placement.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "ffd"))]
    FirstFitDecreasing,
    /// Best-Fit-Decreasing: commit the admissible placement closest to the
    /// back-left-bottom corner.
    #[cfg_attr(feature = "serde", serde(rename = "bfd"))]
    BestFitDecreasing,
}

impl Strategy {
    /// Short identifier (`ffd` / `bfd`).
    pub fn id(&self) -> &'static str {
        match self {
            Strategy::FirstFitDecreasing => "ffd",
            Strategy::BestFitDecreasing => "bfd",
        }
    }

    /// Upper-case abbreviation used in reports.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Strategy::FirstFitDecreasing => "FFD",
            Strategy::BestFitDecreasing => "BFD",
        }
    }

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::FirstFitDecreasing => "First Fit Decreasing (FFD)",
            Strategy::BestFitDecreasing => "Best Fit Decreasing (BFD)",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ffd" | "first-fit" | "first-fit-decreasing" => Ok(Strategy::FirstFitDecreasing),
            "bfd" | "best-fit" | "best-fit-decreasing" => Ok(Strategy::BestFitDecreasing),
            other => Err(Error::ConfigError(format!(
                "unknown strategy '{}', expected 'ffd' or 'bfd'",
                other
            ))),
        }
    }
}

/// Configuration for a packing run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Packing strategy.
    pub strategy: Strategy,

    /// Number of identical containers to fill, in order.
    pub container_count: usize,

    /// Gap between containers when laid out side by side for rendering.
    pub container_gap: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            container_count: 1,
            container_gap: 0.5,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the packing strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the number of containers.
    pub fn with_container_count(mut self, count: usize) -> Self {
        self.container_count = count;
        self
    }

    /// Sets the render gap between containers.
    pub fn with_container_gap(mut self, gap: f64) -> Self {
        self.container_gap = gap;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.container_count == 0 {
            return Err(Error::ConfigError(
                "At least one container must be requested".into(),
            ));
        }
        if !self.container_gap.is_finite() || self.container_gap < 0.0 {
            return Err(Error::ConfigError(
                "Container gap must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// Progress callback invoked after each committed placement.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Progress information during packing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressInfo {
    /// Container currently being filled (0-based).
    pub container_index: usize,
    /// Instances placed so far across all containers.
    pub placed: usize,
    /// Instances taking part in the run.
    pub total: usize,
    /// Weight loaded into the current container.
    pub container_weight: f64,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
}

impl ProgressInfo {
    /// Fraction of instances placed so far (0.0 - 1.0).
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.placed as f64 / self.total as f64
        }
    }
}

/// Trait for container loading solvers.
pub trait Solver {
    /// The item definition type this solver handles.
    type Item;
    /// The container type this solver handles.
    type Container;

    /// Packs the items into the configured number of containers.
    fn solve(&self, items: &[Self::Item], container: &Self::Container) -> Result<PackingResult>;

    /// Packs with a progress callback.
    fn solve_with_progress(
        &self,
        items: &[Self::Item],
        container: &Self::Container,
        callback: ProgressCallback,
    ) -> Result<PackingResult>;

    /// Requests cancellation; observed between containers.
    fn cancel(&self);
}

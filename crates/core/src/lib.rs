//! # Stowage Core
//!
//! Core types and abstractions for the Stowage container loading engine.
//!
//! This crate provides the types shared by the packing algorithms and the
//! front-ends built on top of them.
//!
//! ## Core Components
//!
//! - **Solver trait**: Common interface for container loading solvers
//! - **Configuration**: `Config` and the `Strategy` enum (FFD / BFD)
//! - **Transform types**: Rotation angles and 3D AABBs
//! - **Results**: Placements, per-container summaries and the unplaced report
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod placement;
pub mod result;
pub mod solver;
pub mod transform;

// Re-exports
pub use error::{Error, Result};
pub use placement::{container_offset_x, ItemId, Placement, PlacementStats};
pub use result::{
    ContainerSummary, PackingResult, PackingSummary, UnplacedEntry, UnplacedReason,
    UnplacedReport,
};
pub use solver::{Config, ProgressCallback, ProgressInfo, Solver, Strategy};
pub use transform::{RotationAngles, AABB3D, QUARTER_TURN};

/// Tolerance for placement validity checks (bounds, overlap, support).
pub const EPSILON_VALIDITY: f64 = 1e-3;

/// Tolerance for packing comparisons (anchor ordering, weight, pre-filter).
pub const EPSILON_PACK: f64 = 1e-4;

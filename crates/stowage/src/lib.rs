//! # Stowage
//!
//! Container loading optimization for boxes and cylinders.
//!
//! This crate loads heterogeneous items into one or more identical
//! rectangular containers with greedy first-fit / best-fit decreasing
//! heuristics, respecting bounds, overlap, vertical support, non-stackable
//! items and payload limits.
//!
//! ## Quick Start
//!
//! ```rust
//! use stowage::packing::{ContainerSpec, ItemSpec, Packer};
//! use stowage::{Config, Solver, Strategy};
//!
//! let container = ContainerSpec::preset("20' Dry").unwrap();
//! let items = vec![
//!     ItemSpec::box_shape("pallet", 1.2, 0.8, 1.0).with_quantity(6).with_weight(400.0),
//!     ItemSpec::cylinder("drum", 0.58, 0.88).with_quantity(4).with_weight(180.0),
//! ];
//!
//! let packer = Packer::new(Config::new().with_strategy(Strategy::FirstFitDecreasing));
//! let result = packer.solve(&items, &container).unwrap();
//! assert_eq!(result.placed_count() + result.unplaced_count(), 10);
//! ```
//!
//! ## Feature Flags
//!
//! - `packing` (default): packing algorithms
//! - `serde`: Serialization support

/// Core types and abstractions.
pub use stowage_core as core;

/// Container loading algorithms.
#[cfg(feature = "packing")]
pub use stowage_packing as packing;

// Re-export commonly used types at root level
pub use stowage_core::{
    Config, Error, PackingResult, PackingSummary, Placement, Result, Solver, Strategy,
    UnplacedEntry, UnplacedReason,
};

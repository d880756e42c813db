//! # Stowage Packing
//!
//! 3D container loading algorithms for the Stowage engine.
//!
//! Boxes and upright cylinders are loaded into identical rectangular
//! containers with greedy first-fit / best-fit decreasing heuristics driven
//! by extreme point anchors. Every placement is checked for bounds, overlap
//! and vertical support before it is committed.
//!
//! ## Example
//!
//! ```
//! use stowage_packing::{ContainerSpec, ItemSpec, Packer};
//! use stowage_core::{Config, Solver, Strategy};
//!
//! let items = vec![ItemSpec::box_shape("crate", 1.0, 1.0, 1.0)
//!     .with_quantity(4)
//!     .with_weight(25.0)];
//! let container = ContainerSpec::new(2.0, 2.0, 2.0).with_max_payload(1000.0);
//!
//! let packer = Packer::new(Config::new().with_strategy(Strategy::BestFitDecreasing));
//! let result = packer.solve(&items, &container).unwrap();
//! assert_eq!(result.placed_count(), 4);
//! ```

pub mod boundary;
pub mod extreme_point;
pub mod geometry;
pub mod instance;
pub mod orientation;
pub mod packer;
pub mod strategy;
pub mod validity;

// Re-exports
pub use boundary::{ContainerSpec, UNLIMITED_PAYLOAD};
pub use extreme_point::{candidate_anchors, PlacedBox};
pub use geometry::{effective_dimensions, ItemSpec, RotationPermissions, Shape};
pub use instance::{expand_instances, ItemInstance};
pub use orientation::{candidate_orientations, fits_any_orientation};
pub use packer::{world_position, Packer};
pub use strategy::FALLBACK_PALETTE;
pub use validity::is_valid;
pub use stowage_core::{Config, Error, PackingResult, Placement, Result, Strategy};

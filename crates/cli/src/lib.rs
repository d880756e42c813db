//! Command-line support for Stowage
//!
//! This crate provides:
//! - Job file loading (inline container or standard preset)
//! - Run reports with console summaries and JSON output

mod job;
mod report;

pub use job::{template, Job, JobError, JobFile};
pub use report::{RunReport, WorldPlacement};

//! Packing job files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stowage::packing::{ContainerSpec, ItemSpec, RotationPermissions};
use stowage::{Config, Strategy};
use thiserror::Error;

/// Errors that can occur when loading a job.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown container preset '{0}'")]
    UnknownPreset(String),

    #[error("Invalid job: {0}")]
    InvalidJob(String),
}

/// A job as written on disk.
///
/// The container is given either inline or by preset name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFile {
    /// Inline container specification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerSpec>,
    /// Name of a standard container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Number of identical containers.
    #[serde(default = "default_containers")]
    pub containers: usize,
    /// Packing strategy.
    #[serde(default)]
    pub strategy: Strategy,
    /// Items to load.
    pub items: Vec<ItemSpec>,
}

fn default_containers() -> usize {
    1
}

/// A job ready to run.
#[derive(Debug, Clone)]
pub struct Job {
    /// Container to fill.
    pub container: ContainerSpec,
    /// Solver configuration.
    pub config: Config,
    /// Items to load.
    pub items: Vec<ItemSpec>,
}

impl Job {
    /// Loads a job from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, JobError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a job from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, JobError> {
        let raw: JobFile = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Overrides the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.config = self.config.with_strategy(strategy);
        self
    }

    /// Overrides the container count.
    pub fn with_containers(mut self, count: usize) -> Self {
        self.config = self.config.with_container_count(count);
        self
    }

    /// Total number of instances requested.
    pub fn instance_count(&self) -> usize {
        self.items.iter().map(|i| i.quantity()).sum()
    }
}

impl TryFrom<JobFile> for Job {
    type Error = JobError;

    fn try_from(raw: JobFile) -> Result<Self, JobError> {
        let container = match (raw.container, raw.preset) {
            (Some(_), Some(_)) => {
                return Err(JobError::InvalidJob(
                    "give either 'container' or 'preset', not both".into(),
                ))
            }
            (Some(container), None) => container,
            (None, Some(name)) => {
                ContainerSpec::preset(&name).ok_or(JobError::UnknownPreset(name))?
            }
            (None, None) => {
                return Err(JobError::InvalidJob(
                    "missing 'container' or 'preset'".into(),
                ))
            }
        };

        let config = Config::new()
            .with_strategy(raw.strategy)
            .with_container_count(raw.containers);

        Ok(Self {
            container,
            config,
            items: raw.items,
        })
    }
}

/// Example job written by the `template` command.
pub fn template() -> JobFile {
    JobFile {
        container: None,
        preset: Some("20' Dry".into()),
        containers: 1,
        strategy: Strategy::FirstFitDecreasing,
        items: vec![
            ItemSpec::box_shape("pallet", 1.2, 0.8, 1.0)
                .with_name("Euro pallet")
                .with_quantity(8)
                .with_weight(350.0)
                .with_rotation(RotationPermissions::upright()),
            ItemSpec::cylinder("drum", 0.58, 0.88)
                .with_name("Steel drum")
                .with_quantity(6)
                .with_weight(180.0)
                .with_color("#3366CC"),
            ItemSpec::box_shape("crate", 1.0, 1.0, 0.7)
                .with_name("Glass crate")
                .with_quantity(2)
                .with_weight(120.0)
                .with_non_stackable(true),
        ],
    }
}

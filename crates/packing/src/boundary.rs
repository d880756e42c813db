//! Container specifications.

use nalgebra::{Point3, Vector3};
use stowage_core::{Error, Result, AABB3D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Payload used when a container carries no practical weight limit.
pub const UNLIMITED_PAYLOAD: f64 = 999_999.0;

/// A rectangular shipping container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerSpec {
    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    name: String,

    /// Interior length (x).
    length: f64,

    /// Interior width (z).
    width: f64,

    /// Interior height (y).
    height: f64,

    /// Maximum payload in kilograms.
    #[cfg_attr(feature = "serde", serde(default = "default_payload"))]
    max_payload: f64,
}

#[cfg(feature = "serde")]
fn default_payload() -> f64 {
    UNLIMITED_PAYLOAD
}

/// Interior dimensions and payloads of common ISO containers:
/// (name, length, width, height, max payload).
const PRESETS: &[(&str, f64, f64, f64, f64)] = &[
    ("Custom", 12.0, 2.3, 2.3, UNLIMITED_PAYLOAD),
    ("20' Dry", 5.90, 2.35, 2.39, 28_280.0),
    ("40' Dry", 12.03, 2.35, 2.39, 26_680.0),
    ("40' HC", 12.03, 2.35, 2.69, 28_500.0),
    ("45' HC", 13.56, 2.35, 2.69, 27_700.0),
    ("20' Reefer", 5.44, 2.29, 2.27, 27_480.0),
    ("40' Reefer", 11.56, 2.29, 2.25, 25_980.0),
    ("20' Open Top", 5.89, 2.35, 2.35, 28_080.0),
];

impl ContainerSpec {
    /// Creates a container with the given interior dimensions and no
    /// practical payload limit.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            name: String::from("Custom"),
            length,
            width,
            height,
            max_payload: UNLIMITED_PAYLOAD,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the maximum payload.
    pub fn with_max_payload(mut self, payload: f64) -> Self {
        self.max_payload = payload;
        self
    }

    /// Looks up a standard container by name (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(n, ..)| n.eq_ignore_ascii_case(name.trim()))
            .map(|&(n, l, w, h, p)| Self::new(l, w, h).with_name(n).with_max_payload(p))
    }

    /// All standard containers.
    pub fn presets() -> Vec<Self> {
        PRESETS
            .iter()
            .map(|&(n, l, w, h, p)| Self::new(l, w, h).with_name(n).with_max_payload(p))
            .collect()
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the interior length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the interior width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the interior height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the maximum payload.
    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Interior extent in container axes (x = length, y = height, z = width).
    pub fn extent(&self) -> Vector3<f64> {
        Vector3::new(self.length, self.height, self.width)
    }

    /// Interior space as an AABB anchored at the origin.
    pub fn aabb(&self) -> AABB3D<f64> {
        AABB3D::from_origin(Point3::origin(), self.extent())
    }

    /// Interior volume.
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// Validates the container specification.
    pub fn validate(&self) -> Result<()> {
        let dims = [self.length, self.width, self.height];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(Error::InvalidContainer(format!(
                "All dimensions of '{}' must be positive",
                self.name
            )));
        }

        if !self.max_payload.is_finite() || self.max_payload <= 0.0 {
            return Err(Error::InvalidContainer(format!(
                "Maximum payload of '{}' must be positive",
                self.name
            )));
        }

        Ok(())
    }
}

impl Default for ContainerSpec {
    fn default() -> Self {
        Self::new(12.0, 2.3, 2.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_container_volume() {
        let container = ContainerSpec::new(2.0, 3.0, 4.0);
        assert_relative_eq!(container.volume(), 24.0, epsilon = 0.001);
        assert_eq!(container.extent(), Vector3::new(2.0, 4.0, 3.0));
    }

    #[test]
    fn test_presets() {
        let hc = ContainerSpec::preset("40' hc").unwrap();
        assert_eq!(hc.name(), "40' HC");
        assert_relative_eq!(hc.height(), 2.69);
        assert_relative_eq!(hc.max_payload(), 28_500.0);

        assert!(ContainerSpec::preset("53' Domestic").is_none());
        assert_eq!(ContainerSpec::presets().len(), 8);
        assert!(ContainerSpec::presets().iter().all(|c| c.validate().is_ok()));
    }

    #[test]
    fn test_validation() {
        assert!(ContainerSpec::new(2.0, 2.0, 2.0).validate().is_ok());
        assert!(ContainerSpec::new(-2.0, 2.0, 2.0).validate().is_err());
        assert!(ContainerSpec::new(2.0, 2.0, 2.0)
            .with_max_payload(0.0)
            .validate()
            .is_err());
    }
}

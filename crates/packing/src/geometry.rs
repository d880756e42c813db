//! Item definitions and effective dimensions.

use nalgebra::Vector3;
use stowage_core::{Error, ItemId, Result, RotationAngles};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical shape of an item.
///
/// Cylinders stand upright by default: their axis runs along y and their
/// footprint is a `diameter × diameter` square.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "lowercase"))]
pub enum Shape {
    /// Rectangular box.
    Box {
        /// Extent along the container length (x).
        length: f64,
        /// Extent along the container width (z).
        width: f64,
        /// Vertical extent (y).
        height: f64,
    },
    /// Upright cylinder.
    Cylinder {
        /// Diameter of the base.
        diameter: f64,
        /// Height along the cylinder axis.
        height: f64,
    },
}

impl Shape {
    /// Nominal length (x). Equals the diameter for cylinders.
    pub fn length(&self) -> f64 {
        match *self {
            Shape::Box { length, .. } => length,
            Shape::Cylinder { diameter, .. } => diameter,
        }
    }

    /// Nominal width (z). Equals the diameter for cylinders.
    pub fn width(&self) -> f64 {
        match *self {
            Shape::Box { width, .. } => width,
            Shape::Cylinder { diameter, .. } => diameter,
        }
    }

    /// Nominal height (y).
    pub fn height(&self) -> f64 {
        match *self {
            Shape::Box { height, .. } | Shape::Cylinder { height, .. } => height,
        }
    }

    /// Returns true for cylinders.
    pub fn is_cylinder(&self) -> bool {
        matches!(self, Shape::Cylinder { .. })
    }

    /// Lower-case shape name.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Box { .. } => "box",
            Shape::Cylinder { .. } => "cylinder",
        }
    }
}

/// Axes about which an item may be turned a quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RotationPermissions {
    /// Rotation about the length axis.
    pub x: bool,
    /// Rotation about the vertical axis.
    pub y: bool,
    /// Rotation about the width axis.
    pub z: bool,
}

impl Default for RotationPermissions {
    fn default() -> Self {
        Self::all()
    }
}

impl RotationPermissions {
    /// All axes allowed.
    pub fn all() -> Self {
        Self {
            x: true,
            y: true,
            z: true,
        }
    }

    /// No rotation allowed.
    pub fn none() -> Self {
        Self {
            x: false,
            y: false,
            z: false,
        }
    }

    /// Only turns about the vertical axis (the item stays upright).
    pub fn upright() -> Self {
        Self {
            x: false,
            y: true,
            z: false,
        }
    }

    /// Returns true if any axis is allowed.
    pub fn any(&self) -> bool {
        self.x || self.y || self.z
    }
}

/// An item definition to be loaded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemSpec {
    /// Unique identifier.
    id: ItemId,

    /// Display name. Falls back to the id when empty.
    #[cfg_attr(feature = "serde", serde(default))]
    name: String,

    /// Shape and nominal dimensions.
    #[cfg_attr(feature = "serde", serde(flatten))]
    shape: Shape,

    /// Weight of one unit.
    #[cfg_attr(feature = "serde", serde(default))]
    weight: f64,

    /// Number of units.
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    quantity: usize,

    /// Nothing may be placed on top of this item.
    #[cfg_attr(feature = "serde", serde(default))]
    non_stackable: bool,

    /// Display color (`#RRGGBB`).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    color: Option<String>,

    /// Allowed rotation axes.
    #[cfg_attr(feature = "serde", serde(default))]
    rotation: RotationPermissions,
}

#[cfg(feature = "serde")]
fn default_quantity() -> usize {
    1
}

impl ItemSpec {
    /// Creates an item with the given shape.
    pub fn new(id: impl Into<ItemId>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            shape,
            weight: 0.0,
            quantity: 1,
            non_stackable: false,
            color: None,
            rotation: RotationPermissions::default(),
        }
    }

    /// Creates a box item.
    pub fn box_shape(id: impl Into<ItemId>, length: f64, width: f64, height: f64) -> Self {
        Self::new(
            id,
            Shape::Box {
                length,
                width,
                height,
            },
        )
    }

    /// Creates an upright cylinder item.
    pub fn cylinder(id: impl Into<ItemId>, diameter: f64, height: f64) -> Self {
        Self::new(id, Shape::Cylinder { diameter, height })
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, n: usize) -> Self {
        self.quantity = n;
        self
    }

    /// Sets the weight per unit.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Marks the item as non-stackable.
    pub fn with_non_stackable(mut self, non_stackable: bool) -> Self {
        self.non_stackable = non_stackable;
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the rotation permissions.
    pub fn with_rotation(mut self, rotation: RotationPermissions) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns the identifier.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Returns the shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the weight per unit.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    /// Returns whether other items may rest on top of this one.
    pub fn is_stackable(&self) -> bool {
        !self.non_stackable
    }

    /// Returns the display color, if any.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the rotation permissions.
    pub fn rotation(&self) -> RotationPermissions {
        self.rotation
    }

    /// Nominal extent before rotation (x = length, y = height, z = width).
    pub fn nominal_extent(&self) -> Vector3<f64> {
        Vector3::new(self.shape.length(), self.shape.height(), self.shape.width())
    }

    /// Nominal bounding volume `length × width × height`.
    pub fn volume(&self) -> f64 {
        self.shape.length() * self.shape.width() * self.shape.height()
    }

    /// Largest nominal dimension.
    pub fn max_dimension(&self) -> f64 {
        self.shape
            .length()
            .max(self.shape.width())
            .max(self.shape.height())
    }

    /// Effective dimensions under the given rotation.
    pub fn effective_dimensions(&self, rotation: &RotationAngles) -> Vector3<f64> {
        effective_dimensions(self, rotation)
    }

    /// Validates the item definition.
    pub fn validate(&self) -> Result<()> {
        let dims_ok = match self.shape {
            Shape::Box {
                length,
                width,
                height,
            } => positive(length) && positive(width) && positive(height),
            Shape::Cylinder { diameter, height } => positive(diameter) && positive(height),
        };
        if !dims_ok {
            return Err(Error::InvalidItem(format!(
                "All dimensions for '{}' must be positive",
                self.id
            )));
        }

        if self.quantity == 0 {
            return Err(Error::InvalidItem(format!(
                "Quantity for '{}' must be at least 1",
                self.id
            )));
        }

        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(Error::InvalidItem(format!(
                "Weight for '{}' cannot be negative",
                self.id
            )));
        }

        if let Some(color) = &self.color {
            if !is_hex_color(color) {
                return Err(Error::InvalidItem(format!(
                    "Color '{}' for '{}' is not of the form #RRGGBB",
                    color, self.id
                )));
            }
        }

        Ok(())
    }
}

/// Axis-aligned extent of an item after rotation.
///
/// The canonical bounding box (`L × H × W` for boxes, `D × H × D` for
/// cylinders) is rotated by `Rx · Ry · Rz` and measured in container axes.
pub fn effective_dimensions(item: &ItemSpec, rotation: &RotationAngles) -> Vector3<f64> {
    rotation.rotated_extent(&item.nominal_extent())
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Returns true for `#RRGGBB` strings.
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s.chars().skip(1).all(|c| c.is_ascii_hexdigit())
}

//! The four user-supplied frustum dimensions.

use serde::{Deserialize, Serialize};

use crate::{PatternError, Result};

/// Frustum dimensions in millimeters.
///
/// The domain expects `bottom_diameter > top_diameter > 0` and
/// `height > 0`. Nothing here enforces that on construction: call
/// [`DimensionSet::validate`] before solving if the values come from a user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionSet {
    /// Diameter of the wide (bottom) rim.
    pub bottom_diameter: f64,
    /// Diameter of the narrow (top) rim.
    pub top_diameter: f64,
    /// Perpendicular distance between the two rims.
    pub height: f64,
    /// Width of the flap attached along the seam edge.
    #[serde(default)]
    pub allowance_width: f64,
}

impl DimensionSet {
    /// Create a new dimension set.
    pub fn new(bottom_diameter: f64, top_diameter: f64, height: f64, allowance_width: f64) -> Self {
        Self {
            bottom_diameter,
            top_diameter,
            height,
            allowance_width,
        }
    }

    /// Radius of the bottom rim.
    pub fn bottom_radius(&self) -> f64 {
        self.bottom_diameter / 2.0
    }

    /// Radius of the top rim.
    pub fn top_radius(&self) -> f64 {
        self.top_diameter / 2.0
    }

    /// Check the domain invariants.
    ///
    /// Checks run in a fixed order: finiteness of every field, positivity of
    /// the frustum dimensions, the allowance sign, then the taper.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(PatternError::NonFinite { field, value });
            }
        }
        for (field, value) in [
            ("bottom diameter", self.bottom_diameter),
            ("top diameter", self.top_diameter),
            ("height", self.height),
        ] {
            if value <= 0.0 {
                return Err(PatternError::NonPositive { field, value });
            }
        }
        if self.allowance_width < 0.0 {
            return Err(PatternError::NegativeAllowance(self.allowance_width));
        }
        if self.bottom_diameter <= self.top_diameter {
            return Err(PatternError::NotTapered {
                bottom_diameter: self.bottom_diameter,
                top_diameter: self.top_diameter,
            });
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("bottom diameter", self.bottom_diameter),
            ("top diameter", self.top_diameter),
            ("height", self.height),
            ("allowance width", self.allowance_width),
        ]
    }
}

impl Default for DimensionSet {
    fn default() -> Self {
        Self::new(200.0, 80.0, 150.0, 10.0)
    }
}

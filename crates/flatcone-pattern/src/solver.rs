//! Pattern solver: frustum dimensions to annular-sector development.

use std::f64::consts::{PI, TAU};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DimensionSet, PatternError, Result};

/// The flat development of a frustum's lateral surface.
///
/// An annular sector centered on the apex of the (virtual) full cone. The
/// outer arc unrolls the bottom rim, the inner arc the top rim. All lengths
/// are millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Radius of the bottom rim.
    pub bottom_radius: f64,
    /// Radius of the top rim.
    pub top_radius: f64,
    /// Distance between the rims measured along the lateral surface.
    pub slant_length: f64,
    /// Radius of the arc that forms the bottom rim.
    pub outer_radius: f64,
    /// Radius of the arc that forms the top rim.
    pub inner_radius: f64,
    /// Angular sweep of the sector in degrees.
    pub sector_angle_degrees: f64,
    /// Circumference of the bottom rim.
    pub bottom_circumference: f64,
    /// Circumference of the top rim.
    pub top_circumference: f64,
}

impl Pattern {
    /// Sector sweep in radians.
    pub fn sector_angle_radians(&self) -> f64 {
        self.sector_angle_degrees * PI / 180.0
    }

    /// Whether the sector arcs must be drawn as the major arc.
    pub fn is_large_arc(&self) -> bool {
        large_arc_flag(self.sector_angle_radians())
    }

    /// Length of the outer arc of the sector.
    pub fn outer_arc_length(&self) -> f64 {
        self.outer_radius * self.sector_angle_radians()
    }

    /// Length of the inner arc of the sector.
    pub fn inner_arc_length(&self) -> f64 {
        self.inner_radius * self.sector_angle_radians()
    }

    /// Whether every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }

    fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("bottom radius", self.bottom_radius),
            ("top radius", self.top_radius),
            ("slant length", self.slant_length),
            ("outer radius", self.outer_radius),
            ("inner radius", self.inner_radius),
            ("sector angle", self.sector_angle_degrees),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }

    /// Whether the sector closes into a full annulus within
    /// [`FULL_TURN_TOLERANCE`] along the outer arc.
    pub fn is_full_turn(&self) -> bool {
        full_turn_gap(self.outer_radius, self.sector_angle_radians()) < FULL_TURN_TOLERANCE
    }

    /// Conditions that still yield a drawing but deserve the user's attention.
    pub fn warnings(&self) -> Vec<PatternWarning> {
        let mut warnings = Vec::new();
        if self.is_full_turn() {
            warnings.push(PatternWarning::SectorClosesFullTurn {
                sector_angle_degrees: self.sector_angle_degrees,
            });
        } else if self.sector_angle_degrees > 360.0 {
            warnings.push(PatternWarning::SectorExceedsFullTurn {
                sector_angle_degrees: self.sector_angle_degrees,
            });
        }
        warnings
    }
}

/// Whether an arc with the given sweep is the major arc of its circle.
///
/// Arc primitives that take endpoints plus a radius (SVG `A`) are ambiguous
/// between the two arcs joining the endpoints; sweeps beyond a half turn
/// need the flag set or the minor arc is drawn instead.
pub fn large_arc_flag(sweep_radians: f64) -> bool {
    sweep_radians > PI
}

/// Arc distance, in millimeters, below which a sector counts as a full turn.
///
/// Closer than this, the two ends of each arc print to the same coordinate
/// at the default precision and the straight edges coincide.
pub const FULL_TURN_TOLERANCE: f64 = 1e-3;

/// Length of the arc of `radius` between a sweep and a full turn.
///
/// Zero for an exact full annulus; measures the missing wedge below a full
/// turn and the overlap above it.
pub fn full_turn_gap(radius: f64, sweep_radians: f64) -> f64 {
    radius * (sweep_radians - TAU).abs()
}

/// A non-fatal problem with a solved pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PatternWarning {
    /// The sector is a full annulus (or within tolerance of one).
    ///
    /// Each arc starts and ends at the same point, so SVG renderers drop
    /// the arcs and leave only the coinciding straight edges.
    SectorClosesFullTurn {
        /// The solved sweep.
        sector_angle_degrees: f64,
    },
    /// The sector sweeps more than a full turn and overlaps itself.
    ///
    /// Happens when the slant length is shorter than the bottom radius, i.e.
    /// a very flat frustum.
    SectorExceedsFullTurn {
        /// The solved sweep.
        sector_angle_degrees: f64,
    },
}

impl fmt::Display for PatternWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternWarning::SectorClosesFullTurn {
                sector_angle_degrees,
            } => write!(
                f,
                "sector angle {:.3}° closes a full turn; the arc endpoints coincide",
                sector_angle_degrees
            ),
            PatternWarning::SectorExceedsFullTurn {
                sector_angle_degrees,
            } => write!(
                f,
                "sector angle {:.3}° exceeds a full turn; the pattern overlaps itself",
                sector_angle_degrees
            ),
        }
    }
}

/// Solve the development of a frustum.
///
/// Total over finite input: degenerate dimensions (zero bottom radius, for
/// one) produce NaN or infinite fields instead of an error. Use
/// [`solve_checked`] for user input.
pub fn solve_pattern(dimensions: &DimensionSet) -> Pattern {
    let bottom_radius = dimensions.bottom_radius();
    let top_radius = dimensions.top_radius();
    let slant_length = dimensions.height.hypot(bottom_radius - top_radius);
    let outer_radius = slant_length;
    let inner_radius = outer_radius * (top_radius / bottom_radius);
    let sector_angle_degrees = 360.0 * bottom_radius / outer_radius;

    Pattern {
        bottom_radius,
        top_radius,
        slant_length,
        outer_radius,
        inner_radius,
        sector_angle_degrees,
        bottom_circumference: 2.0 * PI * bottom_radius,
        top_circumference: 2.0 * PI * top_radius,
    }
}

/// Validate the dimensions, solve, and reject a non-finite result.
pub fn solve_checked(dimensions: &DimensionSet) -> Result<Pattern> {
    dimensions.validate()?;
    let pattern = solve_pattern(dimensions);
    if let Some(field) = pattern.first_non_finite() {
        return Err(PatternError::DegeneratePattern(field));
    }
    debug!(
        outer_radius = pattern.outer_radius,
        inner_radius = pattern.inner_radius,
        sector_angle = pattern.sector_angle_degrees,
        "solved frustum pattern"
    );
    Ok(pattern)
}

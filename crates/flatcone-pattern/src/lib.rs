#![warn(missing_docs)]

//! Flat pattern of a cone frustum.
//!
//! Unrolls the lateral surface of a right-circular frustum into an annular
//! sector, adds a seam allowance flap along one straight edge, and places
//! both in a drawing frame: a pixel frame for previews or a full-scale
//! millimeter frame for export.
//!
//! The pipeline is pure and recomputed on demand:
//!
//! ```text
//! DimensionSet → solve_pattern → Pattern → build_boundary_path ┐
//!                                        → build_allowance_flap ┴→ Drawing
//! ```
//!
//! # Example
//!
//! ```
//! use flatcone_pattern::{compose, DimensionSet, DrawingSettings};
//!
//! let dims = DimensionSet::new(200.0, 80.0, 150.0, 10.0);
//! let c = compose(&dims, &DrawingSettings::default()).unwrap();
//!
//! // The outer arc unrolls the bottom rim
//! let arc = c.pattern.outer_arc_length();
//! assert!((arc - c.pattern.bottom_circumference).abs() < 1e-9);
//! assert!(c.export.boundary.large_arc);
//! ```

pub mod boundary;
pub mod dimensions;
pub mod document;
pub mod drawing;
pub mod error;
pub mod flap;
pub mod solver;

pub use boundary::{build_boundary_path, format_coord, ArcSweep, BoundaryPath, PathSegment};
pub use dimensions::DimensionSet;
pub use document::{DocumentFormat, PatternDocument};
pub use drawing::{
    build_drawing, compose, Composition, Drawing, DrawingSettings, FrameKind,
    DEFAULT_EXPORT_MARGIN, DEFAULT_PRECISION, DEFAULT_PREVIEW_FILL, DEFAULT_PREVIEW_SIZE,
};
pub use error::{PatternError, Result};
pub use flap::{build_allowance_flap, seam_normal, AllowanceFlap};
pub use flatcone_math::{Frame2, Point2, Vec2};
pub use solver::{
    full_turn_gap, large_arc_flag, solve_checked, solve_pattern, Pattern, PatternWarning,
    FULL_TURN_TOLERANCE,
};

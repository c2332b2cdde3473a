//! Closed outline of the annular sector.

use flatcone_math::{Frame2, Point2};

use crate::Pattern;

/// Direction an arc travels from its start point to its end point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcSweep {
    /// Increasing polar angle (clockwise on screen in a y-down frame).
    Increasing,
    /// Decreasing polar angle.
    Decreasing,
}

impl ArcSweep {
    /// SVG `sweep-flag` value.
    pub fn flag(self) -> u8 {
        match self {
            ArcSweep::Increasing => 1,
            ArcSweep::Decreasing => 0,
        }
    }
}

/// One drawing instruction of a boundary path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Start a new subpath.
    MoveTo {
        /// Target point.
        to: Point2,
    },
    /// Circular arc from the current point.
    Arc {
        /// Arc radius in frame units.
        radius: f64,
        /// Take the major arc.
        large_arc: bool,
        /// Travel direction.
        sweep: ArcSweep,
        /// End point.
        to: Point2,
    },
    /// Straight line from the current point.
    LineTo {
        /// End point.
        to: Point2,
    },
    /// Straight line back to the subpath start.
    Close,
}

impl PathSegment {
    /// Point the pen is at after this instruction, if it names one.
    pub fn end(&self) -> Option<Point2> {
        match self {
            PathSegment::MoveTo { to }
            | PathSegment::Arc { to, .. }
            | PathSegment::LineTo { to } => Some(*to),
            PathSegment::Close => None,
        }
    }
}

/// The annular-sector outline in a drawing frame.
///
/// Traced as: outer start, outer arc (increasing angle) to outer end, line
/// to inner end, inner arc (decreasing angle) back to inner start, close.
/// The closing line is the seam edge at angle 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPath {
    /// Sector center (the frame origin).
    pub center: Point2,
    /// Outer arc radius in frame units.
    pub outer_radius: f64,
    /// Inner arc radius in frame units.
    pub inner_radius: f64,
    /// Outer arc point at angle 0.
    pub outer_start: Point2,
    /// Outer arc point at the sector angle.
    pub outer_end: Point2,
    /// Inner arc point at the sector angle.
    pub inner_end: Point2,
    /// Inner arc point at angle 0.
    pub inner_start: Point2,
    /// Sector sweep in radians.
    pub sweep_angle: f64,
    /// Both arcs are major arcs.
    pub large_arc: bool,
}

impl BoundaryPath {
    /// The outline as an ordered instruction list.
    pub fn segments(&self) -> [PathSegment; 5] {
        [
            PathSegment::MoveTo {
                to: self.outer_start,
            },
            PathSegment::Arc {
                radius: self.outer_radius,
                large_arc: self.large_arc,
                sweep: ArcSweep::Increasing,
                to: self.outer_end,
            },
            PathSegment::LineTo { to: self.inner_end },
            PathSegment::Arc {
                radius: self.inner_radius,
                large_arc: self.large_arc,
                sweep: ArcSweep::Decreasing,
                to: self.inner_start,
            },
            PathSegment::Close,
        ]
    }

    /// SVG path data for the outline, with `precision` decimal digits.
    pub fn to_path_data(&self, precision: usize) -> String {
        let point = |p: Point2| {
            format!(
                "{} {}",
                format_coord(p.x, precision),
                format_coord(p.y, precision)
            )
        };

        self.segments()
            .into_iter()
            .map(|seg| match seg {
                PathSegment::MoveTo { to } => format!("M {}", point(to)),
                PathSegment::Arc {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let r = format_coord(radius, precision);
                    format!(
                        "A {} {} 0 {} {} {}",
                        r,
                        r,
                        u8::from(large_arc),
                        sweep.flag(),
                        point(to)
                    )
                }
                PathSegment::LineTo { to } => format!("L {}", point(to)),
                PathSegment::Close => "Z".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Format a coordinate with a fixed number of decimals.
pub fn format_coord(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// Build the sector outline of `pattern` in `frame`.
pub fn build_boundary_path(pattern: &Pattern, frame: &Frame2) -> BoundaryPath {
    let theta = pattern.sector_angle_radians();
    BoundaryPath {
        center: frame.origin,
        outer_radius: frame.apply_length(pattern.outer_radius),
        inner_radius: frame.apply_length(pattern.inner_radius),
        outer_start: frame.polar_point(pattern.outer_radius, 0.0),
        outer_end: frame.polar_point(pattern.outer_radius, theta),
        inner_end: frame.polar_point(pattern.inner_radius, theta),
        inner_start: frame.polar_point(pattern.inner_radius, 0.0),
        sweep_angle: theta,
        large_arc: pattern.is_large_arc(),
    }
}

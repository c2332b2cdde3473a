//! Seam allowance flap along the angle-0 edge.

use flatcone_math::{Frame2, Point2, Vec2};

use crate::Pattern;

/// Unit normal of the seam edge at polar angle `seam_angle` (radians).
///
/// Perpendicular to the radial direction, rotated a quarter turn toward
/// decreasing angle. With the seam pinned at angle 0 this is `(0, -1)`:
/// "up" in a y-down drawing, away from the sector body.
pub fn seam_normal(seam_angle: f64) -> Vec2 {
    let (s, c) = seam_angle.sin_cos();
    Vec2::new(s, -c)
}

/// Quadrilateral flap attached to the seam edge of the sector.
///
/// Only the angle-0 edge carries a flap; the edge at the sector angle is
/// left bare and overlaps the flap once the pattern is rolled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllowanceFlap {
    /// Seam point on the inner arc.
    pub inner_edge_start: Point2,
    /// Seam point on the outer arc.
    pub outer_edge_start: Point2,
    /// Outer seam point pushed out by the allowance.
    pub outer_edge_extended: Point2,
    /// Inner seam point pushed out by the allowance.
    pub inner_edge_extended: Point2,
    /// Flap width in frame units.
    pub width: f64,
}

impl AllowanceFlap {
    /// Corners in boundary order.
    pub fn points(&self) -> [Point2; 4] {
        [
            self.inner_edge_start,
            self.outer_edge_start,
            self.outer_edge_extended,
            self.inner_edge_extended,
        ]
    }

    /// The shared edge with the sector, inner point first.
    pub fn seam_edge(&self) -> (Point2, Point2) {
        (self.inner_edge_start, self.outer_edge_start)
    }

    /// Signed area (shoelace), in squared frame units.
    pub fn signed_area(&self) -> f64 {
        let pts = self.points();
        let mut twice = 0.0;
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            twice += a.x * b.y - b.x * a.y;
        }
        twice / 2.0
    }
}

/// Build the allowance flap of `pattern` in `frame`.
///
/// `normal` is the outward unit normal of the seam edge in the frame; it is
/// not derived from the arcs, so it must match where the seam sits (see
/// [`seam_normal`]). `allowance_width` is in millimeters.
pub fn build_allowance_flap(
    pattern: &Pattern,
    allowance_width: f64,
    frame: &Frame2,
    normal: &Vec2,
) -> AllowanceFlap {
    let inner_edge_start = frame.polar_point(pattern.inner_radius, 0.0);
    let outer_edge_start = frame.polar_point(pattern.outer_radius, 0.0);
    let width = frame.apply_length(allowance_width);
    let offset = frame.apply_vec(&(normal * allowance_width));

    AllowanceFlap {
        inner_edge_start,
        outer_edge_start,
        outer_edge_extended: outer_edge_start + offset,
        inner_edge_extended: inner_edge_start + offset,
        width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_boundary_path, solve_pattern, DimensionSet};
    use approx::assert_relative_eq;

    #[test]
    fn test_seam_normal_at_zero() {
        assert_eq!(seam_normal(0.0), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_seam_normal_is_perpendicular() {
        for angle in [0.3_f64, 1.2, 2.9, 4.0] {
            let radial = Vec2::new(angle.cos(), angle.sin());
            let n = seam_normal(angle);
            assert!(radial.dot(&n).abs() < 1e-12);
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_flap_attaches_to_boundary() {
        let dims = DimensionSet::default();
        let pattern = solve_pattern(&dims);
        for frame in [
            Frame2::identity(),
            Frame2::new(Point2::new(210.0, 210.0), 1.104_988),
            Frame2::new(Point2::new(176.554_944, 176.554_944), 1.0),
        ] {
            let path = build_boundary_path(&pattern, &frame);
            let flap =
                build_allowance_flap(&pattern, dims.allowance_width, &frame, &seam_normal(0.0));
            assert_eq!(flap.inner_edge_start, path.inner_start);
            assert_eq!(flap.outer_edge_start, path.outer_start);
        }
    }

    #[test]
    fn test_flap_extension() {
        let pattern = solve_pattern(&DimensionSet::default());
        let frame = Frame2::new(Point2::new(0.0, 0.0), 2.0);
        let flap = build_allowance_flap(&pattern, 10.0, &frame, &seam_normal(0.0));

        assert_eq!(flap.width, 20.0);
        assert_eq!(flap.outer_edge_extended.x, flap.outer_edge_start.x);
        assert_eq!(flap.outer_edge_extended.y, -20.0);
        assert_eq!(flap.inner_edge_extended.y, -20.0);
    }

    #[test]
    fn test_flap_is_simple_quad() {
        let pattern = solve_pattern(&DimensionSet::default());
        let flap = build_allowance_flap(&pattern, 10.0, &Frame2::identity(), &seam_normal(0.0));
        let seam_len = pattern.outer_radius - pattern.inner_radius;

        // A rectangle: |area| = seam length x width
        assert_relative_eq!(flap.signed_area().abs(), seam_len * 10.0, max_relative = 1e-12);
        let (a, b) = flap.seam_edge();
        assert_relative_eq!((b - a).norm(), seam_len, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_allowance_collapses() {
        let pattern = solve_pattern(&DimensionSet::default());
        let flap = build_allowance_flap(&pattern, 0.0, &Frame2::identity(), &seam_normal(0.0));
        assert_eq!(flap.outer_edge_extended, flap.outer_edge_start);
        assert_eq!(flap.signed_area(), 0.0);
    }
}

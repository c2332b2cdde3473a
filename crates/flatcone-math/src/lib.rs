#![warn(missing_docs)]

//! Math types for flatcone pattern geometry.
//!
//! Thin wrappers around nalgebra providing the 2D points and vectors used
//! by the pattern builders, and [`Frame2`], the mapping from design
//! millimeters into a drawing's coordinate frame.

use nalgebra::Vector2;

/// A point in a 2D drawing plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// A uniform-scale coordinate frame.
///
/// Maps a point given in design millimeters, relative to the pattern
/// center, to `origin + p * scale` in the frame's units (pixels for a
/// preview, millimeters for an export). There is no rotation: the local
/// +x axis is the frame's +x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame2 {
    /// Position of the pattern center in frame units.
    pub origin: Point2,
    /// Frame units per millimeter.
    pub scale: f64,
}

impl Frame2 {
    /// Create a frame from an origin and a scale factor.
    pub fn new(origin: Point2, scale: f64) -> Self {
        Self { origin, scale }
    }

    /// Identity frame: origin at (0, 0), one unit per millimeter.
    pub fn identity() -> Self {
        Self {
            origin: Point2::origin(),
            scale: 1.0,
        }
    }

    /// Scale a length from millimeters into frame units.
    pub fn apply_length(&self, length: f64) -> f64 {
        length * self.scale
    }

    /// Scale a vector from millimeters into frame units.
    pub fn apply_vec(&self, v: &Vec2) -> Vec2 {
        v * self.scale
    }

    /// Map a local point (millimeters, relative to the pattern center).
    pub fn apply_point(&self, p: &Point2) -> Point2 {
        Point2::new(
            self.origin.x + p.x * self.scale,
            self.origin.y + p.y * self.scale,
        )
    }

    /// Point at `radius` millimeters from the origin, at `angle` radians
    /// from the local +x axis.
    ///
    /// Every arc endpoint of a pattern goes through this function, so two
    /// points built from the same radius and angle are bit-identical.
    pub fn polar_point(&self, radius: f64, angle: f64) -> Point2 {
        let (s, c) = angle.sin_cos();
        self.apply_point(&Point2::new(radius * c, radius * s))
    }
}

impl Default for Frame2 {
    fn default() -> Self {
        Self::identity()
    }
}

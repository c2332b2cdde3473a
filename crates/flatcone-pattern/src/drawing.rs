//! Drawing composer: places the pattern in a preview or export frame.

use flatcone_math::{Frame2, Point2};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    build_allowance_flap, build_boundary_path, seam_normal, solve_checked, AllowanceFlap,
    BoundaryPath, DimensionSet, Pattern, PatternError, PatternWarning, Result,
};

/// Side length of the square preview viewport, in pixels.
pub const DEFAULT_PREVIEW_SIZE: f64 = 420.0;

/// Fraction of the preview half-width the outer radius maps to.
pub const DEFAULT_PREVIEW_FILL: f64 = 0.85;

/// Blank border around an exported pattern, in millimeters.
pub const DEFAULT_EXPORT_MARGIN: f64 = 5.0;

/// Decimal digits written for serialized coordinates.
pub const DEFAULT_PRECISION: usize = 4;

/// Coordinate-frame policy for a drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameKind {
    /// Pixel frame fitted to a square viewport.
    Preview {
        /// Viewport side length in pixels.
        viewport: f64,
        /// Fraction of the half-width covered by the outer radius.
        fill: f64,
    },
    /// Full-scale millimeter frame (one unit per millimeter).
    Export {
        /// Border around pattern and flap in millimeters.
        margin: f64,
    },
}

impl FrameKind {
    /// Preview frame with the default viewport.
    pub fn preview() -> Self {
        FrameKind::Preview {
            viewport: DEFAULT_PREVIEW_SIZE,
            fill: DEFAULT_PREVIEW_FILL,
        }
    }

    /// Export frame with the default margin.
    pub fn export() -> Self {
        FrameKind::Export {
            margin: DEFAULT_EXPORT_MARGIN,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            FrameKind::Preview { .. } => "preview",
            FrameKind::Export { .. } => "export",
        }
    }
}

/// User-tunable drawing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingSettings {
    /// Preview viewport side length in pixels.
    pub preview_size: f64,
    /// Fraction of the preview half-width covered by the pattern.
    pub preview_fill: f64,
    /// Export margin in millimeters.
    pub export_margin: f64,
    /// Decimal digits in serialized coordinates.
    pub precision: usize,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            preview_size: DEFAULT_PREVIEW_SIZE,
            preview_fill: DEFAULT_PREVIEW_FILL,
            export_margin: DEFAULT_EXPORT_MARGIN,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl DrawingSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !self.preview_size.is_finite() || self.preview_size <= 0.0 {
            return Err(PatternError::InvalidSettings(format!(
                "preview_size must be positive, got {}",
                self.preview_size
            )));
        }
        if !(self.preview_fill > 0.0 && self.preview_fill <= 1.0) {
            return Err(PatternError::InvalidSettings(format!(
                "preview_fill must be in (0, 1], got {}",
                self.preview_fill
            )));
        }
        if !self.export_margin.is_finite() || self.export_margin < 0.0 {
            return Err(PatternError::InvalidSettings(format!(
                "export_margin must not be negative, got {}",
                self.export_margin
            )));
        }
        if self.precision > 12 {
            return Err(PatternError::InvalidSettings(format!(
                "precision must be at most 12 digits, got {}",
                self.precision
            )));
        }
        Ok(())
    }

    /// Preview frame policy for these settings.
    pub fn preview_frame(&self) -> FrameKind {
        FrameKind::Preview {
            viewport: self.preview_size,
            fill: self.preview_fill,
        }
    }

    /// Export frame policy for these settings.
    pub fn export_frame(&self) -> FrameKind {
        FrameKind::Export {
            margin: self.export_margin,
        }
    }
}

/// A pattern placed in a concrete coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawing {
    /// Frame policy the drawing was built with.
    pub kind: FrameKind,
    /// Origin and scale used for every point.
    pub frame: Frame2,
    /// Canvas width in frame units.
    pub width: f64,
    /// Canvas height in frame units.
    pub height: f64,
    /// Sector outline.
    pub boundary: BoundaryPath,
    /// Seam allowance flap.
    pub flap: AllowanceFlap,
    /// Decimal digits for serialized coordinates.
    pub precision: usize,
}

impl Drawing {
    /// Whether this is a full-scale millimeter drawing.
    pub fn is_export(&self) -> bool {
        matches!(self.kind, FrameKind::Export { .. })
    }

    /// Same drawing serialized with a different coordinate precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

/// Place `pattern` and its flap in the frame chosen by `kind`.
///
/// Preview: the outer radius maps to `fill * viewport / 2`, centered in the
/// viewport; a non-positive (or NaN) outer radius falls back to scale 1.
/// Export: scale 1, origin at `(r_max, r_max)` with
/// `r_max = outer_radius + allowance_width + margin`, so the canvas
/// `[0, 2 r_max]²` holds everything without negative coordinates.
pub fn build_drawing(pattern: &Pattern, allowance_width: f64, kind: FrameKind) -> Drawing {
    let (frame, extent) = match kind {
        FrameKind::Preview { viewport, fill } => {
            let half = viewport / 2.0;
            let scale = if pattern.outer_radius > 0.0 {
                (half * fill) / pattern.outer_radius
            } else {
                1.0
            };
            (Frame2::new(Point2::new(half, half), scale), viewport)
        }
        FrameKind::Export { margin } => {
            let r_max = pattern.outer_radius + allowance_width + margin;
            (Frame2::new(Point2::new(r_max, r_max), 1.0), 2.0 * r_max)
        }
    };

    let boundary = build_boundary_path(pattern, &frame);
    let flap = build_allowance_flap(pattern, allowance_width, &frame, &seam_normal(0.0));

    debug!(
        kind = kind.name(),
        scale = frame.scale,
        origin_x = frame.origin.x,
        origin_y = frame.origin.y,
        extent,
        "composed drawing"
    );

    Drawing {
        kind,
        frame,
        width: extent,
        height: extent,
        boundary,
        flap,
        precision: DEFAULT_PRECISION,
    }
}

/// Everything derived from one set of dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Input dimensions.
    pub dimensions: DimensionSet,
    /// Solved development.
    pub pattern: Pattern,
    /// Pixel drawing for on-screen display.
    pub preview: Drawing,
    /// Millimeter drawing for export.
    pub export: Drawing,
    /// Non-fatal findings about the pattern.
    pub warnings: Vec<PatternWarning>,
}

/// Validate, solve, and build both drawings.
///
/// Recomputed from scratch on every call; there is no cached state.
pub fn compose(dimensions: &DimensionSet, settings: &DrawingSettings) -> Result<Composition> {
    settings.validate()?;
    let pattern = solve_checked(dimensions)?;
    let preview = build_drawing(&pattern, dimensions.allowance_width, settings.preview_frame())
        .with_precision(settings.precision);
    let export = build_drawing(&pattern, dimensions.allowance_width, settings.export_frame())
        .with_precision(settings.precision);

    let warnings = pattern.warnings();
    for w in &warnings {
        warn!("{}", w);
    }

    Ok(Composition {
        dimensions: *dimensions,
        pattern,
        preview,
        export,
        warnings,
    })
}

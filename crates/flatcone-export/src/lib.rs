#![warn(missing_docs)]

//! Vector-document export for flatcone drawings.
//!
//! Two sinks for a composed [`Drawing`]:
//! - [`svg`]: SVG text, full-scale (millimeter canvas) or preview styled
//! - [`dxf`]: DXF R12 for laser cutting and CNC services
//!
//! # Example
//!
//! ```
//! use flatcone_export::serialize_export_drawing;
//! use flatcone_pattern::{compose, DimensionSet, DrawingSettings};
//!
//! let c = compose(&DimensionSet::default(), &DrawingSettings::default()).unwrap();
//! let svg = serialize_export_drawing(&c.export);
//! assert!(svg.contains("mm\""));
//! ```

pub mod dxf;
pub mod svg;

use std::path::Path;

use flatcone_pattern::Drawing;
use tracing::info;

pub use dxf::{DxfEntity, DxfPatternDocument, DxfPoint, PATTERN_LAYER, SEAM_LAYER};
pub use svg::{export_svg, serialize_export_drawing, svg_string, write_svg, SvgStyle};

/// File name for a full-scale export when the user gives none.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "cone_pattern_with_seam_mm.svg";

/// File name for a preview image when the user gives none.
pub const DEFAULT_PREVIEW_FILE_NAME: &str = "cone_pattern_preview.svg";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Scalable Vector Graphics.
    Svg,
    /// AutoCAD DXF R12.
    Dxf,
}

impl ExportFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "svg" => Some(ExportFormat::Svg),
            "dxf" => Some(ExportFormat::Dxf),
            _ => None,
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Dxf => "dxf",
        }
    }
}

/// Write a full-scale drawing to `path` in `format`.
///
/// SVG coordinates use the drawing's precision; DXF always uses six digits.
pub fn export_drawing(
    drawing: &Drawing,
    format: ExportFormat,
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    let path = path.as_ref();
    match format {
        ExportFormat::Svg => {
            export_svg(
                drawing,
                &SvgStyle::export().with_precision(drawing.precision),
                path,
            )?
        }
        ExportFormat::Dxf => DxfPatternDocument::from_drawing(drawing).export(path)?,
    }
    info!(
        path = %path.display(),
        format = format.extension(),
        width_mm = drawing.width,
        "exported pattern"
    );
    Ok(())
}

//! SVG export of pattern drawings.
//!
//! The export style produces a full-scale document whose width and height
//! are declared in millimeters, so it prints or cuts at 1:1. The preview
//! style is a pixel-sized image for display.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flatcone_pattern::{format_coord, Drawing, Point2, DEFAULT_PRECISION};

/// Presentation attributes of an SVG pattern document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgStyle {
    /// Unit suffix for the root `width`/`height` of an export drawing
    /// (`Some("mm")`), or `None` for unitless user units.
    pub units: Option<String>,
    /// Decimal digits written for every coordinate.
    pub precision: usize,
    /// Stroke width in frame units.
    pub stroke_width: f64,
    /// Fill of the sector outline.
    pub outline_fill: String,
    /// Stroke of the sector outline.
    pub outline_stroke: String,
    /// Fill of the allowance flap.
    pub flap_fill: String,
    /// Stroke of the allowance flap.
    pub flap_stroke: String,
    /// Stroke color of an extra line drawn over the seam edge, if any.
    pub seam_line: Option<String>,
}

impl SvgStyle {
    /// Full-scale style: unfilled outlines, millimeter canvas.
    pub fn export() -> Self {
        Self {
            units: Some("mm".to_string()),
            precision: DEFAULT_PRECISION,
            stroke_width: 0.5,
            outline_fill: "none".to_string(),
            outline_stroke: "#000".to_string(),
            flap_fill: "none".to_string(),
            flap_stroke: "red".to_string(),
            seam_line: None,
        }
    }

    /// On-screen style: tinted sector, translucent flap, marked seam.
    pub fn preview() -> Self {
        Self {
            units: None,
            precision: DEFAULT_PRECISION,
            stroke_width: 1.0,
            outline_fill: "#dbeafe".to_string(),
            outline_stroke: "#0b5668".to_string(),
            flap_fill: "rgba(255,0,0,0.12)".to_string(),
            flap_stroke: "red".to_string(),
            seam_line: Some("#222".to_string()),
        }
    }

    /// Same style with a different coordinate precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn fmt(&self, value: f64) -> String {
        format_coord(value, self.precision)
    }

    fn fmt_point(&self, p: &Point2) -> String {
        format!("{},{}", self.fmt(p.x), self.fmt(p.y))
    }
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self::export()
    }
}

/// Render a drawing as SVG text.
///
/// The style's units apply only to export drawings; a preview drawing is
/// always written in unitless user units.
pub fn svg_string(drawing: &Drawing, style: &SvgStyle) -> String {
    SvgDocument { drawing, style }.to_string()
}

/// Serialize a full-scale drawing with the export style at the drawing's
/// own precision.
pub fn serialize_export_drawing(drawing: &Drawing) -> String {
    svg_string(
        drawing,
        &SvgStyle::export().with_precision(drawing.precision),
    )
}

/// Write a drawing as SVG to any writer.
pub fn write_svg(drawing: &Drawing, style: &SvgStyle, writer: &mut impl Write) -> io::Result<()> {
    write!(writer, "{}", SvgDocument { drawing, style })
}

/// Write a drawing as an SVG file.
pub fn export_svg(drawing: &Drawing, style: &SvgStyle, path: impl AsRef<Path>) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_svg(drawing, style, &mut writer)?;
    writer.flush()
}

struct SvgDocument<'a> {
    drawing: &'a Drawing,
    style: &'a SvgStyle,
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (drawing, style) = (self.drawing, self.style);
        let w = style.fmt(drawing.width);
        let h = style.fmt(drawing.height);
        // Pixel coordinates must never be declared as millimeters
        let unit = match style.units.as_deref() {
            Some(unit) if drawing.is_export() => unit,
            _ => "",
        };

        writeln!(f, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}{unit}" height="{h}{unit}" viewBox="0 0 {w} {h}">"#
        )?;

        writeln!(
            f,
            r#"  <path d="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            drawing.boundary.to_path_data(style.precision),
            style.outline_fill,
            style.outline_stroke,
            style.stroke_width
        )?;

        let points: Vec<String> = drawing
            .flap
            .points()
            .iter()
            .map(|p| style.fmt_point(p))
            .collect();
        writeln!(
            f,
            r#"  <polygon points="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            points.join(" "),
            style.flap_fill,
            style.flap_stroke,
            style.stroke_width
        )?;

        if let Some(color) = &style.seam_line {
            let (a, b) = drawing.flap.seam_edge();
            writeln!(
                f,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                style.fmt(a.x),
                style.fmt(a.y),
                style.fmt(b.x),
                style.fmt(b.y),
                color,
                style.stroke_width
            )?;
        }

        writeln!(f, "</svg>")
    }
}

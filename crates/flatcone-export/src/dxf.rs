//! DXF export of pattern drawings for laser and CNC cutting.
//!
//! Writes DXF R12 with millimeter units and two layers:
//! - `PATTERN`: the sector outline (two arcs, two straight edges)
//! - `SEAM`: the allowance flap as a closed polyline
//!
//! DXF is y-up and its arcs always run counter-clockwise, so the drawing
//! is mirrored vertically on the way out.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flatcone_pattern::{full_turn_gap, Drawing, Point2, FULL_TURN_TOLERANCE};

/// Layer for the sector outline.
pub const PATTERN_LAYER: &str = "PATTERN";

/// Layer for the allowance flap.
pub const SEAM_LAYER: &str = "SEAM";

/// `$INSUNITS` code for millimeters.
const UNITS_MILLIMETERS: u8 = 4;

/// `$INSUNITS` code for unitless drawings.
const UNITS_UNITLESS: u8 = 0;

/// A 2D point in DXF (y-up) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DxfPoint {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl DxfPoint {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One DXF entity.
#[derive(Debug, Clone, PartialEq)]
pub enum DxfEntity {
    /// Counter-clockwise circular arc.
    Arc {
        /// Arc center.
        center: DxfPoint,
        /// Arc radius.
        radius: f64,
        /// Start angle in degrees, in `[0, 360)`.
        start_angle: f64,
        /// End angle in degrees, in `[0, 360]`; 360 only for a full circle.
        end_angle: f64,
        /// Layer name.
        layer: &'static str,
    },
    /// Line segment.
    Line {
        /// Start point.
        start: DxfPoint,
        /// End point.
        end: DxfPoint,
        /// Layer name.
        layer: &'static str,
    },
    /// Lightweight polyline.
    Polyline {
        /// Ordered vertices.
        points: Vec<DxfPoint>,
        /// Whether the polyline forms a closed loop.
        closed: bool,
        /// Layer name.
        layer: &'static str,
    },
}

/// DXF document for one pattern.
pub struct DxfPatternDocument {
    entities: Vec<DxfEntity>,
    insunits: u8,
}

impl DxfPatternDocument {
    /// Build the document for a drawing.
    ///
    /// Export drawings are declared in millimeters; a preview drawing is in
    /// pixels and is written unitless. A sector within tolerance of a full
    /// turn becomes two full circles. A sector beyond a full turn cannot be
    /// expressed as a single DXF arc and wraps around.
    pub fn from_drawing(drawing: &Drawing) -> Self {
        let flip = |p: &Point2| DxfPoint::new(p.x, drawing.height - p.y);
        let b = &drawing.boundary;

        // Increasing angle in the y-down frame is decreasing angle after the
        // flip, so each arc runs CCW from -sweep up to 0.
        let (start_angle, end_angle) =
            if full_turn_gap(b.outer_radius, b.sweep_angle) < FULL_TURN_TOLERANCE {
                (0.0, 360.0)
            } else {
                (normalize_degrees(-b.sweep_angle.to_degrees()), 0.0)
            };
        let center = flip(&b.center);

        let mut entities = vec![
            DxfEntity::Arc {
                center,
                radius: b.outer_radius,
                start_angle,
                end_angle,
                layer: PATTERN_LAYER,
            },
            DxfEntity::Line {
                start: flip(&b.outer_end),
                end: flip(&b.inner_end),
                layer: PATTERN_LAYER,
            },
            DxfEntity::Arc {
                center,
                radius: b.inner_radius,
                start_angle,
                end_angle,
                layer: PATTERN_LAYER,
            },
            DxfEntity::Line {
                start: flip(&b.inner_start),
                end: flip(&b.outer_start),
                layer: PATTERN_LAYER,
            },
        ];

        entities.push(DxfEntity::Polyline {
            points: drawing.flap.points().iter().map(flip).collect(),
            closed: true,
            layer: SEAM_LAYER,
        });

        let insunits = if drawing.is_export() {
            UNITS_MILLIMETERS
        } else {
            UNITS_UNITLESS
        };

        Self { entities, insunits }
    }

    /// Entities in write order.
    pub fn entities(&self) -> &[DxfEntity] {
        &self.entities
    }

    /// Export to a DXF file.
    pub fn export(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.export_to_writer(&mut writer)?;
        writer.flush()
    }

    /// Export into an in-memory buffer.
    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.export_to_writer(&mut buffer)?;
        Ok(buffer)
    }

    /// Export to any writer.
    pub fn export_to_writer(&self, writer: &mut impl Write) -> std::io::Result<()> {
        // Header
        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "HEADER")?;
        writeln!(writer, "9")?;
        writeln!(writer, "$ACADVER")?;
        writeln!(writer, "1")?;
        writeln!(writer, "AC1009")?; // DXF R12
        writeln!(writer, "9")?;
        writeln!(writer, "$INSUNITS")?;
        writeln!(writer, "70")?;
        writeln!(writer, "{}", self.insunits)?;
        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        self.write_tables(writer)?;

        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "ENTITIES")?;

        for entity in &self.entities {
            match entity {
                DxfEntity::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    layer,
                } => self.write_arc(writer, center, *radius, *start_angle, *end_angle, layer)?,
                DxfEntity::Line { start, end, layer } => {
                    self.write_line(writer, start, end, layer)?
                }
                DxfEntity::Polyline {
                    points,
                    closed,
                    layer,
                } => self.write_polyline(writer, points, *closed, layer)?,
            }
        }

        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        writeln!(writer, "0")?;
        writeln!(writer, "EOF")?;

        Ok(())
    }

    fn write_tables(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "TABLES")?;

        writeln!(writer, "0")?;
        writeln!(writer, "TABLE")?;
        writeln!(writer, "2")?;
        writeln!(writer, "LAYER")?;
        writeln!(writer, "70")?;
        writeln!(writer, "2")?; // 2 layers

        // (name, ACI color): 7 = white/black, 1 = red
        for (name, color) in [(PATTERN_LAYER, 7), (SEAM_LAYER, 1)] {
            writeln!(writer, "0")?;
            writeln!(writer, "LAYER")?;
            writeln!(writer, "2")?;
            writeln!(writer, "{}", name)?;
            writeln!(writer, "70")?;
            writeln!(writer, "0")?;
            writeln!(writer, "62")?;
            writeln!(writer, "{}", color)?;
            writeln!(writer, "6")?;
            writeln!(writer, "CONTINUOUS")?;
        }

        writeln!(writer, "0")?;
        writeln!(writer, "ENDTAB")?;
        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        Ok(())
    }

    fn write_arc(
        &self,
        writer: &mut impl Write,
        center: &DxfPoint,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        layer: &str,
    ) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "ARC")?;
        writeln!(writer, "8")?;
        writeln!(writer, "{}", layer)?;
        writeln!(writer, "10")?;
        writeln!(writer, "{:.6}", center.x)?;
        writeln!(writer, "20")?;
        writeln!(writer, "{:.6}", center.y)?;
        writeln!(writer, "40")?;
        writeln!(writer, "{:.6}", radius)?;
        writeln!(writer, "50")?;
        writeln!(writer, "{:.6}", start_angle)?;
        writeln!(writer, "51")?;
        writeln!(writer, "{:.6}", end_angle)?;

        Ok(())
    }

    fn write_line(
        &self,
        writer: &mut impl Write,
        start: &DxfPoint,
        end: &DxfPoint,
        layer: &str,
    ) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "LINE")?;
        writeln!(writer, "8")?;
        writeln!(writer, "{}", layer)?;
        writeln!(writer, "10")?;
        writeln!(writer, "{:.6}", start.x)?;
        writeln!(writer, "20")?;
        writeln!(writer, "{:.6}", start.y)?;
        writeln!(writer, "11")?;
        writeln!(writer, "{:.6}", end.x)?;
        writeln!(writer, "21")?;
        writeln!(writer, "{:.6}", end.y)?;

        Ok(())
    }

    fn write_polyline(
        &self,
        writer: &mut impl Write,
        points: &[DxfPoint],
        closed: bool,
        layer: &str,
    ) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "LWPOLYLINE")?;
        writeln!(writer, "8")?;
        writeln!(writer, "{}", layer)?;
        writeln!(writer, "90")?;
        writeln!(writer, "{}", points.len())?;
        writeln!(writer, "70")?;
        writeln!(writer, "{}", if closed { 1 } else { 0 })?;

        for p in points {
            writeln!(writer, "10")?;
            writeln!(writer, "{:.6}", p.x)?;
            writeln!(writer, "20")?;
            writeln!(writer, "{:.6}", p.y)?;
        }

        Ok(())
    }
}

/// Map an angle in degrees into `[0, 360)`, never returning `-0.0`.
fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs, and
    // keeps the sign of an exact multiple of -360
    if a >= 360.0 || a == 0.0 {
        0.0
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use flatcone_pattern::{build_drawing, solve_pattern, DimensionSet, FrameKind};

    fn export_drawing() -> Drawing {
        let dims = DimensionSet::default();
        build_drawing(&solve_pattern(&dims), dims.allowance_width, FrameKind::export())
    }

    #[test]
    fn test_normalize_degrees() {
        assert_relative_eq!(normalize_degrees(-90.0), 270.0);
        assert_relative_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(-1e-18), 0.0);
        assert!(normalize_degrees(-360.0).is_sign_positive());
        assert!(normalize_degrees(-720.0).is_sign_positive());
    }

    #[test]
    fn test_full_annulus_is_full_circles() {
        let dims = DimensionSet::new(200.0, 80.0, 80.0, 10.0);
        let drawing = build_drawing(&solve_pattern(&dims), dims.allowance_width, FrameKind::export());
        let doc = DxfPatternDocument::from_drawing(&drawing);

        for entity in &doc.entities()[..4] {
            if let DxfEntity::Arc {
                start_angle,
                end_angle,
                ..
            } = entity
            {
                assert_eq!(*start_angle, 0.0);
                assert_eq!(*end_angle, 360.0);
                assert!(start_angle.is_sign_positive());
            }
        }
        let content = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
        assert!(content.contains("\n51\n360.000000\n"));
        assert!(!content.contains("-0.000000"));
    }

    #[test]
    fn test_units_follow_drawing_kind() {
        let header = |drawing: &Drawing| {
            let bytes = DxfPatternDocument::from_drawing(drawing).to_bytes().unwrap();
            String::from_utf8(bytes).unwrap()
        };
        assert!(header(&export_drawing()).contains("$INSUNITS\n70\n4\n"));

        let dims = DimensionSet::default();
        let preview =
            build_drawing(&solve_pattern(&dims), dims.allowance_width, FrameKind::preview());
        assert!(header(&preview).contains("$INSUNITS\n70\n0\n"));
    }

    #[test]
    fn test_entities() {
        let drawing = export_drawing();
        let doc = DxfPatternDocument::from_drawing(&drawing);
        let entities = doc.entities();
        assert_eq!(entities.len(), 5);

        match &entities[0] {
            DxfEntity::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                layer,
            } => {
                assert_relative_eq!(*radius, 161.554_944_214_035, max_relative = 1e-12);
                assert_relative_eq!(center.x, drawing.width / 2.0, max_relative = 1e-12);
                assert_relative_eq!(center.y, drawing.height / 2.0, max_relative = 1e-12);
                // CCW sweep from start to 360 equals the sector angle
                assert_relative_eq!(
                    360.0 - start_angle,
                    222.834_405_812_462,
                    max_relative = 1e-9
                );
                assert_eq!(*end_angle, 0.0);
                assert_eq!(*layer, PATTERN_LAYER);
            }
            other => panic!("expected outer arc, got {:?}", other),
        }

        assert!(matches!(
            &entities[4],
            DxfEntity::Polyline { points, closed: true, layer: SEAM_LAYER } if points.len() == 4
        ));
    }

    #[test]
    fn test_flap_above_seam_after_flip() {
        // Flap extends toward -y on screen, which is +y in DXF
        let doc = DxfPatternDocument::from_drawing(&export_drawing());
        match &doc.entities()[4] {
            DxfEntity::Polyline { points, .. } => {
                assert_relative_eq!(points[2].y - points[1].y, 10.0, max_relative = 1e-12);
            }
            other => panic!("expected flap polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_dxf_structure() {
        let doc = DxfPatternDocument::from_drawing(&export_drawing());
        let content = String::from_utf8(doc.to_bytes().unwrap()).unwrap();

        assert!(content.contains("AC1009"));
        assert!(content.contains("$INSUNITS"));
        assert!(content.contains("TABLES"));
        assert!(content.contains("PATTERN"));
        assert!(content.contains("SEAM"));
        assert_eq!(content.matches("\nARC\n").count(), 2);
        assert_eq!(content.matches("\nLINE\n").count(), 2);
        assert_eq!(content.matches("\nLWPOLYLINE\n").count(), 1);
        assert!(content.ends_with("EOF\n"));
    }

    #[test]
    fn test_dxf_file() {
        let path = std::env::temp_dir().join("flatcone_test_pattern.dxf");
        let doc = DxfPatternDocument::from_drawing(&export_drawing());
        doc.export(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("ENTITIES"));
        let _ = std::fs::remove_file(&path);
    }
}

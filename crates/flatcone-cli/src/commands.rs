//! Subcommand handlers.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use flatcone_export::{
    export_drawing, export_svg, ExportFormat, SvgStyle, DEFAULT_EXPORT_FILE_NAME,
    DEFAULT_PREVIEW_FILE_NAME,
};
use flatcone_pattern::{compose, Composition, Pattern, PatternDocument, PatternWarning};

fn compose_document(doc: &PatternDocument) -> Result<Composition> {
    compose(&doc.dimensions, &doc.settings).context("invalid pattern dimensions")
}

/// Human-readable summary of a solved pattern, three decimals throughout.
pub fn readout(pattern: &Pattern, warnings: &[PatternWarning]) -> String {
    let mut out = String::new();
    out.push_str("Pattern (mm):\n");
    out.push_str(&format!(
        "  Outer radius (pattern R): {:.3}\n",
        pattern.outer_radius
    ));
    out.push_str(&format!("  Inner radius:             {:.3}\n", pattern.inner_radius));
    out.push_str(&format!(
        "  Sector angle:             {:.3}°\n",
        pattern.sector_angle_degrees
    ));
    out.push_str(&format!(
        "  Bottom arc length:        {:.3}\n",
        pattern.bottom_circumference
    ));
    out.push_str(&format!(
        "  Top arc length:           {:.3}\n",
        pattern.top_circumference
    ));
    out.push_str(&format!("  Slant length:             {:.3}\n", pattern.slant_length));

    if !warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in warnings {
            out.push_str(&format!("  - {}\n", w));
        }
    }
    out
}

/// Machine-readable output of `solve --json`.
#[derive(Serialize)]
struct SolveReport<'a> {
    pattern: &'a Pattern,
    warnings: &'a [PatternWarning],
}

fn solve_json(composition: &Composition) -> Result<String> {
    let report = SolveReport {
        pattern: &composition.pattern,
        warnings: &composition.warnings,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn solve(doc: &PatternDocument, json: bool) -> Result<()> {
    let composition = compose_document(doc)?;
    if json {
        println!("{}", solve_json(&composition)?);
    } else {
        print!("{}", readout(&composition.pattern, &composition.warnings));
    }
    Ok(())
}

pub fn export(doc: &PatternDocument, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE_NAME));
    let Some(format) = ExportFormat::from_path(&output) else {
        bail!(
            "Unknown output format: {}. Supported: .svg, .dxf",
            output.display()
        );
    };

    let composition = compose_document(doc)?;
    export_drawing(&composition.export, format, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Exported {:.3} x {:.3} mm pattern to {}",
        composition.export.width,
        composition.export.height,
        output.display()
    );
    Ok(())
}

pub fn preview(doc: &PatternDocument, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_PREVIEW_FILE_NAME));
    if ExportFormat::from_path(&output) != Some(ExportFormat::Svg) {
        bail!("Preview output must be .svg: {}", output.display());
    }

    let composition = compose_document(doc)?;
    let style = SvgStyle::preview().with_precision(composition.preview.precision);
    export_svg(&composition.preview, &style, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(path = %output.display(), size = composition.preview.width, "wrote preview");
    println!("Wrote preview to {}", output.display());
    Ok(())
}

pub fn init(doc: &PatternDocument, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    // Refuse to write a document that would fail to load into a pattern.
    compose_document(doc)?;
    doc.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("Wrote {}", path.display());
    Ok(())
}

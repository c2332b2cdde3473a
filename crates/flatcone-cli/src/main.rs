//! flatcone CLI - flat patterns for cone frustums
//!
//! Solves the development of a frustum, then writes it as a full-scale
//! SVG/DXF cutting pattern or a preview image.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use flatcone_pattern::{DimensionSet, PatternDocument};

mod commands;

#[derive(Parser)]
#[command(name = "flatcone")]
#[command(version)]
#[command(about = "Flat pattern generator for cone frustums with seam allowance", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print pattern radii, sector angle and arc lengths
    Solve {
        #[command(flatten)]
        pattern: PatternArgs,
        /// Print the solved pattern as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the full-scale pattern (format from extension: .svg, .dxf)
    Export {
        /// Output file
        output: Option<PathBuf>,
        #[command(flatten)]
        pattern: PatternArgs,
    },
    /// Write a preview image of the pattern as SVG
    Preview {
        /// Output file
        output: Option<PathBuf>,
        /// Viewport side length in pixels
        #[arg(long)]
        viewport: Option<f64>,
        #[command(flatten)]
        pattern: PatternArgs,
    },
    /// Write a pattern document (.toml or .json) with the current values
    Init {
        /// Document to create
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
        #[command(flatten)]
        pattern: PatternArgs,
    },
}

/// Dimensions and settings shared by every command.
///
/// Flags override the document given with `--config`, which overrides the
/// built-in defaults.
#[derive(Args, Debug, Default)]
struct PatternArgs {
    /// Pattern document (.toml or .json) to start from
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Bottom rim diameter in mm
    #[arg(long, value_name = "MM")]
    bottom_diameter: Option<f64>,
    /// Top rim diameter in mm
    #[arg(long, value_name = "MM")]
    top_diameter: Option<f64>,
    /// Height between the rims in mm
    #[arg(long, value_name = "MM")]
    height: Option<f64>,
    /// Seam allowance width in mm
    #[arg(long, value_name = "MM")]
    allowance: Option<f64>,
    /// Export margin in mm
    #[arg(long, value_name = "MM")]
    margin: Option<f64>,
    /// Decimal digits in SVG coordinates
    #[arg(long)]
    precision: Option<usize>,
}

impl PatternArgs {
    fn resolve(&self) -> Result<PatternDocument> {
        let mut doc = match &self.config {
            Some(path) => PatternDocument::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => PatternDocument::new(DimensionSet::default()),
        };

        let dims = &mut doc.dimensions;
        if let Some(v) = self.bottom_diameter {
            dims.bottom_diameter = v;
        }
        if let Some(v) = self.top_diameter {
            dims.top_diameter = v;
        }
        if let Some(v) = self.height {
            dims.height = v;
        }
        if let Some(v) = self.allowance {
            dims.allowance_width = v;
        }
        if let Some(v) = self.margin {
            doc.settings.export_margin = v;
        }
        if let Some(v) = self.precision {
            doc.settings.precision = v;
        }

        Ok(doc)
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Solve { pattern, json } => {
            commands::solve(&pattern.resolve()?, json)?;
        }
        Commands::Export { output, pattern } => {
            commands::export(&pattern.resolve()?, output)?;
        }
        Commands::Preview {
            output,
            viewport,
            pattern,
        } => {
            let mut doc = pattern.resolve()?;
            if let Some(v) = viewport {
                doc.settings.preview_size = v;
            }
            commands::preview(&doc, output)?;
        }
        Commands::Init {
            path,
            force,
            pattern,
        } => {
            commands::init(&pattern.resolve()?, &path, force)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::try_parse_from(["flatcone", "solve"]).unwrap();
        match cli.command {
            Commands::Solve { pattern, json } => {
                assert!(!json);
                let doc = pattern.resolve().unwrap();
                assert_eq!(doc.dimensions, DimensionSet::default());
            }
            _ => panic!("expected solve"),
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "flatcone",
            "-vv",
            "export",
            "out.dxf",
            "--bottom-diameter",
            "300",
            "--height",
            "75.5",
            "--allowance",
            "0",
            "--margin",
            "12",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Export { output, pattern } => {
                assert_eq!(output, Some(PathBuf::from("out.dxf")));
                let doc = pattern.resolve().unwrap();
                assert_eq!(doc.dimensions.bottom_diameter, 300.0);
                assert_eq!(doc.dimensions.top_diameter, 80.0);
                assert_eq!(doc.dimensions.height, 75.5);
                assert_eq!(doc.dimensions.allowance_width, 0.0);
                assert_eq!(doc.settings.export_margin, 12.0);
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_flags_override_config() {
        let path = std::env::temp_dir().join("flatcone_cli_args_test.toml");
        PatternDocument::new(DimensionSet::new(500.0, 100.0, 250.0, 20.0))
            .save(&path)
            .unwrap();

        let args = PatternArgs {
            config: Some(path.clone()),
            top_diameter: Some(150.0),
            ..PatternArgs::default()
        };
        let doc = args.resolve().unwrap();
        assert_eq!(doc.dimensions.bottom_diameter, 500.0);
        assert_eq!(doc.dimensions.top_diameter, 150.0);
        assert_eq!(doc.dimensions.allowance_width, 20.0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_config_is_error() {
        let args = PatternArgs {
            config: Some(PathBuf::from("/nonexistent/flatcone.toml")),
            ..PatternArgs::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("failed to load"));
    }

    #[test]
    fn test_preview_viewport_flag() {
        let cli =
            Cli::try_parse_from(["flatcone", "preview", "p.svg", "--viewport", "800"]).unwrap();
        match cli.command {
            Commands::Preview { viewport, .. } => assert_eq!(viewport, Some(800.0)),
            _ => panic!("expected preview"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["flatcone"]).is_err());
    }
}

//! Error types for pattern construction.

use thiserror::Error;

/// Errors that can occur while validating inputs or loading pattern documents.
///
/// The solver itself never fails; these are raised by the explicit
/// validation step that runs before it.
#[derive(Error, Debug)]
pub enum PatternError {
    /// A dimension is NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NonFinite {
        /// Name of the offending dimension.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A dimension that must be strictly positive is zero or negative.
    #[error("{field} must be greater than zero, got {value} mm")]
    NonPositive {
        /// Name of the offending dimension.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The allowance width is negative.
    #[error("allowance width must not be negative, got {0} mm")]
    NegativeAllowance(f64),

    /// The frustum does not narrow from bottom to top.
    #[error(
        "bottom diameter ({bottom_diameter} mm) must be larger than top diameter ({top_diameter} mm)"
    )]
    NotTapered {
        /// Bottom rim diameter.
        bottom_diameter: f64,
        /// Top rim diameter.
        top_diameter: f64,
    },

    /// A solved pattern field came out NaN or infinite.
    #[error("pattern is degenerate: {0} is not finite")]
    DegeneratePattern(&'static str),

    /// Drawing settings are out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A pattern document could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML pattern document could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A pattern document could not be written as TOML.
    #[error("TOML write error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A JSON pattern document could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for pattern operations.
pub type Result<T> = std::result::Result<T, PatternError>;

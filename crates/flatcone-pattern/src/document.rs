//! Pattern documents: dimensions plus drawing settings, stored as TOML or JSON.
//!
//! ```toml
//! [dimensions]
//! bottom_diameter = 200.0
//! top_diameter = 80.0
//! height = 150.0
//! allowance_width = 10.0
//!
//! [settings]
//! export_margin = 5.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DimensionSet, DrawingSettings, Result};

/// On-disk encoding of a [`PatternDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "toml" => Some(DocumentFormat::Toml),
            "json" => Some(DocumentFormat::Json),
            _ => None,
        }
    }
}

/// A saved pattern configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternDocument {
    /// Frustum dimensions.
    pub dimensions: DimensionSet,
    /// Drawing settings; defaults apply to any missing key.
    #[serde(default)]
    pub settings: DrawingSettings,
}

impl PatternDocument {
    /// Create a document from dimensions with default settings.
    pub fn new(dimensions: DimensionSet) -> Self {
        Self {
            dimensions,
            settings: DrawingSettings::default(),
        }
    }

    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse text in the given format.
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self> {
        match format {
            DocumentFormat::Toml => Self::from_toml(text),
            DocumentFormat::Json => Self::from_json(text),
        }
    }

    /// Serialize in the given format.
    pub fn render(&self, format: DocumentFormat) -> Result<String> {
        match format {
            DocumentFormat::Toml => self.to_toml(),
            DocumentFormat::Json => self.to_json(),
        }
    }

    /// Load a document; JSON if the extension says so, TOML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path).unwrap_or(DocumentFormat::Toml);
        let text = fs::read_to_string(path)?;
        Self::parse(&text, format)
    }

    /// Save a document; JSON if the extension says so, TOML otherwise.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path).unwrap_or(DocumentFormat::Toml);
        fs::write(path, self.render(format)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatternError;

    #[test]
    fn test_parse_toml_with_defaults() {
        let text = r#"
            [dimensions]
            bottom_diameter = 300.0
            top_diameter = 120.0
            height = 90.0
        "#;
        let doc = PatternDocument::from_toml(text).unwrap();
        assert_eq!(doc.dimensions.bottom_diameter, 300.0);
        assert_eq!(doc.dimensions.allowance_width, 0.0);
        assert_eq!(doc.settings, DrawingSettings::default());
    }

    #[test]
    fn test_partial_settings() {
        let text = r#"
            [dimensions]
            bottom_diameter = 200.0
            top_diameter = 80.0
            height = 150.0
            allowance_width = 10.0

            [settings]
            export_margin = 12.5
        "#;
        let doc = PatternDocument::from_toml(text).unwrap();
        assert_eq!(doc.settings.export_margin, 12.5);
        assert_eq!(doc.settings.preview_size, 420.0);
        assert_eq!(doc.settings.precision, 4);
    }

    #[test]
    fn test_toml_written_back() {
        let doc = PatternDocument::default();
        let text = doc.to_toml().unwrap();
        assert!(text.contains("[dimensions]"));
        assert!(text.contains("bottom_diameter = 200.0"));
        assert!(text.contains("[settings]"));
        assert_eq!(PatternDocument::from_toml(&text).unwrap(), doc);
    }

    #[test]
    fn test_json_document() {
        let json = r#"{"dimensions":{"bottom_diameter":200.0,"top_diameter":80.0,"height":150.0,"allowance_width":10.0}}"#;
        let doc = PatternDocument::from_json(json).unwrap();
        assert_eq!(doc.dimensions, DimensionSet::default());
        assert!(doc.to_json().unwrap().contains("\"preview_fill\": 0.85"));
    }

    #[test]
    fn test_missing_dimensions_is_error() {
        let err = PatternDocument::from_toml("[settings]\nprecision = 2\n").unwrap_err();
        assert!(matches!(err, PatternError::Toml(_)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path("cone.TOML"),
            Some(DocumentFormat::Toml)
        );
        assert_eq!(
            DocumentFormat::from_path("dir/cone.json"),
            Some(DocumentFormat::Json)
        );
        assert_eq!(DocumentFormat::from_path("cone.svg"), None);
        assert_eq!(DocumentFormat::from_path("cone"), None);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("flatcone_document_test.json");
        let doc = PatternDocument::new(DimensionSet::new(120.0, 60.0, 80.0, 6.0));
        doc.save(&path).unwrap();
        assert_eq!(PatternDocument::load(&path).unwrap(), doc);
        let _ = std::fs::remove_file(&path);
    }
}

// src/pipeline/config.rs
use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use sunquote_render_pdf::{ContentTemplates, DocumentSettings};
use sunquote_types::Palette;

fn default_work_dir() -> PathBuf {
    std::env::temp_dir().join("sunquote")
}

/// Everything a [`ProposalGenerator`](super::ProposalGenerator) needs to run.
///
/// All fields have defaults, so a config file only lists what it overrides:
///
/// ```json
/// { "raster_dpi": 200, "document": { "author": "Level5" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Parent of the per-request scratch directories.
    pub work_dir: PathBuf,
    pub raster_dpi: f32,
    /// Brand colours shared by the images and the document.
    pub palette: Palette,
    pub document: DocumentSettings,
    pub content: ContentTemplates,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            raster_dpi: 150.0,
            palette: Palette::default(),
            document: DocumentSettings::default(),
            content: ContentTemplates::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, PipelineError> {
        let config: Self = serde_json::from_str(raw)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, PipelineError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub(crate) fn check(&self) -> Result<(), PipelineError> {
        if !(self.raster_dpi.is_finite() && self.raster_dpi > 0.0) {
            return Err(PipelineError::Config(format!(
                "raster_dpi must be a positive number, got {}",
                self.raster_dpi
            )));
        }
        let margins = self.document.margins_cm;
        if !(margins.is_finite() && (0.0..10.0).contains(&margins)) {
            return Err(PipelineError::Config(format!(
                "document.margins_cm must be between 0 and 10, got {}",
                self.document.margins_cm
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default() {
        let config = GeneratorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.raster_dpi, 150.0);
        assert!(config.work_dir.ends_with("sunquote"));
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = GeneratorConfig::from_json_str(
            r#"{ "raster_dpi": 96, "document": { "author": "ACME" } }"#,
        )
        .unwrap();
        assert_eq!(config.raster_dpi, 96.0);
        assert_eq!(config.document.author, "ACME");
        assert_eq!(config.document.title, "Proposta Comercial");
        assert_eq!(config.content, ContentTemplates::default());
    }

    #[test]
    fn non_positive_dpi_is_rejected() {
        let err = GeneratorConfig::from_json_str(r#"{ "raster_dpi": 0 }"#).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = GeneratorConfig::from_json_str("{ raster_dpi: }").unwrap_err();
        assert!(matches!(err, PipelineError::Json(_)));
    }
}

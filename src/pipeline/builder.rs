// src/pipeline/builder.rs
use super::config::GeneratorConfig;
use super::generator::ProposalGenerator;
use crate::error::PipelineError;
use std::fs;
use std::path::{Path, PathBuf};
use sunquote_render_pdf::{ContentTemplates, DocumentSettings};
use sunquote_types::Palette;

/// A builder for creating a [`ProposalGenerator`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    /// Creates a new `GeneratorBuilder` with the default configuration.
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts from a complete configuration, e.g. one loaded from disk.
    pub fn from_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Loads the whole configuration from a JSON file, replacing the current one.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config = GeneratorConfig::from_json_file(path.as_ref())?;
        Ok(self)
    }

    /// Sets the parent directory of the per-request scratch directories.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.work_dir = dir.into();
        self
    }

    /// Sets the resolution of the chart and table images.
    pub fn with_raster_dpi(mut self, dpi: f32) -> Self {
        self.config.raster_dpi = dpi;
        self
    }

    pub fn with_content(mut self, content: ContentTemplates) -> Self {
        self.config.content = content;
        self
    }

    /// Loads the content templates from a JSON file.
    pub fn with_content_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config.content = ContentTemplates::from_json_file(path.as_ref())?;
        Ok(self)
    }

    pub fn with_document_settings(mut self, settings: DocumentSettings) -> Self {
        self.config.document = settings;
        self
    }

    /// Overrides the brand colours used by the images and the document.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.config.palette = palette;
        self
    }

    /// Validates the configuration, creates the work directory and builds the generator.
    pub fn build(self) -> Result<ProposalGenerator, PipelineError> {
        self.config.check()?;
        fs::create_dir_all(&self.config.work_dir).map_err(|e| {
            PipelineError::Config(format!(
                "work directory '{}' cannot be created: {}",
                self.config.work_dir.display(),
                e
            ))
        })?;
        log::debug!("Proposal generator ready, work dir {}", self.config.work_dir.display());
        Ok(ProposalGenerator::new(self.config))
    }
}
